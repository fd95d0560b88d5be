//! Dependency ordering of tables over their foreign keys.

use super::{Registry, SchemaError, TableSchema};
use std::collections::HashSet;

impl Registry {
    /// Group tables into creation waves.
    ///
    /// Wave 0 holds tables without foreign keys; every later wave holds tables
    /// whose targets all live in earlier waves. Declaration order is kept
    /// within a wave. References to tables outside the registry are ignored
    /// here; `validate` reports those.
    ///
    /// # Errors
    /// Returns `SchemaError::Cycle` with the unplaced tables if the foreign
    /// keys form a cycle.
    pub fn creation_waves(&self) -> Result<Vec<Vec<&'static TableSchema>>, SchemaError> {
        let mut placed: HashSet<&'static str> = HashSet::new();
        let mut remaining: Vec<&'static TableSchema> = self.tables().to_vec();
        let mut waves = Vec::new();

        while !remaining.is_empty() {
            let (ready, blocked): (Vec<&'static TableSchema>, Vec<&'static TableSchema>) =
                remaining.into_iter().partition(|t| {
                    t.dependencies()
                        .iter()
                        .all(|dep| placed.contains(dep) || self.get(dep).is_none())
                });

            if ready.is_empty() {
                return Err(SchemaError::Cycle(
                    blocked.iter().map(|t| t.name.to_string()).collect(),
                ));
            }

            placed.extend(ready.iter().map(|t| t.name));
            waves.push(ready);
            remaining = blocked;
        }

        Ok(waves)
    }

    /// Creation waves flattened into a single sequence.
    ///
    /// # Errors
    /// Same as [`Registry::creation_waves`].
    pub fn creation_order(&self) -> Result<Vec<&'static TableSchema>, SchemaError> {
        Ok(self.creation_waves()?.into_iter().flatten().collect())
    }
}

use serde::Serialize;

/// Which branch a reconcile run took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileMode {
    /// Create tables that are missing, leave the rest.
    CreateMissing,
    /// Drop and recreate every table.
    ForceReset,
}

/// Outcome of a reconcile run. Table names appear in the order they were
/// processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub mode: ReconcileMode,
    pub created: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
    pub dropped: Vec<&'static str>,
}

impl ReconcileReport {
    pub fn new(mode: ReconcileMode) -> Self {
        Self {
            mode,
            created: Vec::new(),
            skipped: Vec::new(),
            dropped: Vec::new(),
        }
    }

    /// Whether the run changed the store.
    pub fn changed(&self) -> bool {
        !self.created.is_empty() || !self.dropped.is_empty()
    }
}

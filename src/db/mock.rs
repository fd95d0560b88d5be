//! In-memory schema store for testing without a database file.

use super::{SchemaStore, StoreError};
use crate::schema::TableSchema;
use async_trait::async_trait;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

/// Operation recorded by [`MockStore`], in completion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    HasTable(String),
    Drop(String),
    DropFailed(String),
    Create(String),
}

#[derive(Debug, Default)]
struct MockState {
    /// Table name to the tables it references.
    tables: BTreeMap<String, Vec<String>>,
    events: Vec<StoreEvent>,
}

/// Mock store that keeps table names in memory and records every operation.
///
/// In strict mode it behaves like an engine that checks foreign keys eagerly:
/// a create fails while a referenced table is missing, and a drop fails while
/// another existing table references the target.
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    state: Arc<Mutex<MockState>>,
    strict: bool,
    unavailable: bool,
    failing_creates: HashSet<String>,
}

impl MockStore {
    /// Create a new, empty, lenient mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enforce foreign keys on create and drop.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Fail every operation as if storage were unreachable.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Fail creation of the named table.
    pub fn with_failing_create(mut self, name: &str) -> Self {
        self.failing_creates.insert(name.to_string());
        self
    }

    /// Pre-populate a table without recording an event.
    pub fn with_table(self, table: &TableSchema) -> Self {
        self.lock()
            .tables
            .insert(table.name.to_string(), references_of(table));
        self
    }

    /// Names of existing tables, sorted.
    pub fn table_names(&self) -> Vec<String> {
        self.lock().tables.keys().cloned().collect()
    }

    /// Recorded operations so far.
    pub fn events(&self) -> Vec<StoreEvent> {
        self.lock().events.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the recorded state.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable("mock store is offline".to_string()));
        }
        Ok(())
    }
}

fn references_of(table: &TableSchema) -> Vec<String> {
    table
        .dependencies()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl SchemaStore for MockStore {
    async fn has_table(&self, name: &str) -> Result<bool, StoreError> {
        tokio::task::yield_now().await;
        self.check_available()?;

        let mut state = self.lock();
        state.events.push(StoreEvent::HasTable(name.to_string()));
        Ok(state.tables.contains_key(name))
    }

    async fn drop_table(&self, name: &str) -> Result<(), StoreError> {
        tokio::task::yield_now().await;
        self.check_available()?;

        let mut state = self.lock();
        let referenced_by = state
            .tables
            .iter()
            .find(|(other, refs)| other.as_str() != name && refs.iter().any(|r| r == name))
            .map(|(other, _)| other.clone());

        let result = if !state.tables.contains_key(name) {
            Err(StoreError::NoSuchTable(name.to_string()))
        } else if let (true, Some(other)) = (self.strict, referenced_by) {
            Err(StoreError::Constraint {
                table: name.to_string(),
                message: format!("referenced by {}", other),
            })
        } else {
            state.tables.remove(name);
            Ok(())
        };

        let event = match result {
            Ok(()) => StoreEvent::Drop(name.to_string()),
            Err(_) => StoreEvent::DropFailed(name.to_string()),
        };
        state.events.push(event);
        result
    }

    async fn create_table(&self, table: &TableSchema) -> Result<(), StoreError> {
        tokio::task::yield_now().await;
        self.check_available()?;

        if self.failing_creates.contains(table.name) {
            return Err(StoreError::Constraint {
                table: table.name.to_string(),
                message: "injected create failure".to_string(),
            });
        }

        let mut state = self.lock();
        if state.tables.contains_key(table.name) {
            return Err(StoreError::TableExists(table.name.to_string()));
        }

        let references = references_of(table);
        if self.strict {
            if let Some(missing) = references.iter().find(|r| !state.tables.contains_key(*r)) {
                return Err(StoreError::Constraint {
                    table: table.name.to_string(),
                    message: format!("references missing table {}", missing),
                });
            }
        }

        state.tables.insert(table.name.to_string(), references);
        state.events.push(StoreEvent::Create(table.name.to_string()));
        Ok(())
    }
}

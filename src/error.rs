use crate::db::StoreError;
use crate::schema::SchemaError;
use thiserror::Error;

/// Failure of a bootstrap run. Aborts the run; there is no retry.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Invalid schema: {0}")]
    Schema(#[from] SchemaError),
    #[error("Failed to create table {table}: {source}")]
    Create {
        table: String,
        #[source]
        source: StoreError,
    },
    #[error("Failed to inspect table {table}: {source}")]
    Inspect {
        table: String,
        #[source]
        source: StoreError,
    },
}

impl BootstrapError {
    /// Name of the table whose operation failed, if any.
    pub fn table(&self) -> Option<&str> {
        match self {
            BootstrapError::Schema(_) => None,
            BootstrapError::Create { table, .. } | BootstrapError::Inspect { table, .. } => {
                Some(table)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_error_display() {
        let err = BootstrapError::Create {
            table: "tag".to_string(),
            source: StoreError::TableExists("tag".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Failed to create table tag: Table already exists: tag"
        );
        assert_eq!(err.table(), Some("tag"));

        let err = BootstrapError::from(SchemaError::DuplicateTable("tag".to_string()));
        assert_eq!(
            err.to_string(),
            "Invalid schema: table `tag` is declared more than once"
        );
        assert_eq!(err.table(), None);
    }
}

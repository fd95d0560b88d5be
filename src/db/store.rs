//! Schema manipulation interface and its SQLite implementation.

use crate::schema::ddl::{create_table_sql, drop_table_sql};
use crate::schema::TableSchema;
use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Storage that can report, drop, and create tables.
#[async_trait]
pub trait SchemaStore: Send + Sync + fmt::Debug {
    /// Whether a table with this name exists.
    async fn has_table(&self, name: &str) -> Result<bool, StoreError>;

    /// Drop a table. Fails if the table does not exist.
    async fn drop_table(&self, name: &str) -> Result<(), StoreError>;

    /// Create a table from its descriptor. Fails if it already exists.
    async fn create_table(&self, table: &TableSchema) -> Result<(), StoreError>;
}

/// Error type for schema store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("No such table: {0}")]
    NoSuchTable(String),
    #[error("Table already exists: {0}")]
    TableExists(String),
    #[error("Constraint violation on {table}: {message}")]
    Constraint { table: String, message: String },
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Column as reported by `pragma_table_info` and `pragma_index_list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    /// Declared type, lowercased.
    pub sql_type: String,
    pub not_null: bool,
    pub primary_key: bool,
    /// Covered by a single-column `unique` constraint.
    pub unique: bool,
}

/// Foreign key as reported by `pragma_foreign_key_list`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ForeignKeyInfo {
    pub from: String,
    pub table: String,
    pub to: String,
}

/// SQLite-backed schema store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new store over the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStore { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Columns of a table in declaration order. Empty if the table is missing.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn table_columns(&self, name: &str) -> Result<Vec<ColumnInfo>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT name, type, "notnull", pk
            FROM pragma_table_info(?)
            ORDER BY cid
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        let unique = self.unique_columns(name).await?;

        let columns = rows
            .iter()
            .map(|row| -> Result<ColumnInfo, sqlx::Error> {
                let column: String = row.try_get("name")?;
                // SQLite reports the rowid alias type in upper case.
                let sql_type: String = row.try_get("type")?;
                Ok(ColumnInfo {
                    unique: unique.contains(&column),
                    name: column,
                    sql_type: sql_type.to_ascii_lowercase(),
                    not_null: row.try_get::<i64, _>("notnull")? != 0,
                    primary_key: row.try_get::<i64, _>("pk")? != 0,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(columns)
    }

    /// Columns covered by a single-column index created from a `unique`
    /// constraint.
    async fn unique_columns(&self, name: &str) -> Result<HashSet<String>, StoreError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT ii.name
            FROM pragma_index_list(?) AS il, pragma_index_info(il.name) AS ii
            WHERE il."unique" = 1
              AND il.origin = 'u'
              AND (SELECT COUNT(*) FROM pragma_index_info(il.name)) = 1
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|(c,)| c).collect())
    }

    /// Foreign keys declared on a table, sorted by source column.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn foreign_keys(&self, name: &str) -> Result<Vec<ForeignKeyInfo>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT "from", "table", "to"
            FROM pragma_foreign_key_list(?)
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        let mut fks = rows
            .iter()
            .map(|row| -> Result<ForeignKeyInfo, sqlx::Error> {
                Ok(ForeignKeyInfo {
                    from: row.try_get("from")?,
                    table: row.try_get("table")?,
                    to: row.try_get("to")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        fks.sort();
        Ok(fks)
    }

    /// Names of all user tables, sorted.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn table_names(&self) -> Result<Vec<String>, StoreError> {
        let names: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(names.into_iter().map(|(n,)| n).collect())
    }
}

#[async_trait]
impl SchemaStore for SqliteStore {
    async fn has_table(&self, name: &str) -> Result<bool, StoreError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;
        Ok(count > 0)
    }

    async fn drop_table(&self, name: &str) -> Result<(), StoreError> {
        let sql = drop_table_sql(name);
        debug!(sql = %sql, "executing");
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }

    async fn create_table(&self, table: &TableSchema) -> Result<(), StoreError> {
        let sql = create_table_sql(table);
        debug!(sql = %sql, "executing");
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }
}

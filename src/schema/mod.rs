//! Declarative table descriptors and the registry that holds them.
//!
//! This module provides:
//! - `TableSchema` / `Column` / `ForeignKey` descriptors
//! - The blog table catalog (`tables.rs`)
//! - Dependency ordering over foreign keys (`order.rs`)
//! - SQLite DDL rendering (`ddl.rs`)

pub mod ddl;
pub mod order;
pub mod tables;

use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    /// Bounded string, rendered as `varchar(255)`.
    String,
    Text,
}

impl ColumnType {
    /// SQLite type name used in `CREATE TABLE`.
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::String => "varchar(255)",
            ColumnType::Text => "text",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql_type())
    }
}

/// Reference from a column to another table's column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ForeignKey {
    pub table: &'static str,
    pub column: &'static str,
}

impl ForeignKey {
    pub const fn new(table: &'static str, column: &'static str) -> Self {
        Self { table, column }
    }
}

/// One column of a table descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub unique: bool,
    pub not_null: bool,
    pub references: Option<ForeignKey>,
}

impl Column {
    /// Plain nullable column with no constraints.
    pub const fn new(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            primary_key: false,
            auto_increment: false,
            unique: false,
            not_null: false,
            references: None,
        }
    }

    /// Auto-incrementing integer primary key.
    pub const fn increments(name: &'static str) -> Self {
        Self::new(name, ColumnType::Integer).primary().auto_increment()
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, ColumnType::Integer)
    }

    pub const fn string(name: &'static str) -> Self {
        Self::new(name, ColumnType::String)
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, ColumnType::Text)
    }

    /// Primary keys are implicitly not-null.
    pub const fn primary(mut self) -> Self {
        self.primary_key = true;
        self.not_null = true;
        self
    }

    pub const fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub const fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Attach a references-constraint to `table.column`.
    pub const fn references(mut self, table: &'static str, column: &'static str) -> Self {
        self.references = Some(ForeignKey::new(table, column));
        self
    }
}

/// Name and ordered columns of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl TableSchema {
    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Columns carrying a references-constraint, in declaration order.
    pub fn foreign_keys(&self) -> impl Iterator<Item = (&Column, ForeignKey)> + '_ {
        self.columns
            .iter()
            .filter_map(|c| c.references.map(|fk| (c, fk)))
    }

    /// Distinct tables this table depends on, excluding itself.
    pub fn dependencies(&self) -> Vec<&'static str> {
        let mut deps: Vec<&'static str> = Vec::new();
        for (_, fk) in self.foreign_keys() {
            if fk.table != self.name && !deps.contains(&fk.table) {
                deps.push(fk.table);
            }
        }
        deps
    }
}

/// Violations of registry invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("table `{0}` is declared more than once")]
    DuplicateTable(String),
    #[error("column `{table}.{column}` references unknown table `{target}`")]
    UnknownReference {
        table: String,
        column: String,
        target: String,
    },
    #[error("column `{table}.{column}` references unknown column `{target}`")]
    UnknownReferenceColumn {
        table: String,
        column: String,
        target: String,
    },
    #[error("foreign key cycle between tables: {}", .0.join(", "))]
    Cycle(Vec<String>),
}

/// Static catalog of tables, in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    tables: &'static [&'static TableSchema],
}

impl Registry {
    pub const fn new(tables: &'static [&'static TableSchema]) -> Self {
        Self { tables }
    }

    /// The blog catalog: users, articles, tags, categories, timelines and
    /// their join tables.
    pub fn blog() -> Self {
        Self::new(tables::ALL_TABLES)
    }

    pub fn get(&self, name: &str) -> Option<&'static TableSchema> {
        self.tables.iter().find(|t| t.name == name).copied()
    }

    pub fn tables(&self) -> &'static [&'static TableSchema] {
        self.tables
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tables.iter().map(|t| t.name).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Check name uniqueness and that every foreign key resolves.
    ///
    /// # Errors
    /// Returns the first violation found, in declaration order.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for table in self.tables {
            if !seen.insert(table.name) {
                return Err(SchemaError::DuplicateTable(table.name.to_string()));
            }
        }

        for table in self.tables {
            for (column, fk) in table.foreign_keys() {
                let target = self.get(fk.table).ok_or_else(|| SchemaError::UnknownReference {
                    table: table.name.to_string(),
                    column: column.name.to_string(),
                    target: fk.table.to_string(),
                })?;
                if target.column(fk.column).is_none() {
                    return Err(SchemaError::UnknownReferenceColumn {
                        table: table.name.to_string(),
                        column: column.name.to_string(),
                        target: format!("{}.{}", fk.table, fk.column),
                    });
                }
            }
        }

        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::blog()
    }
}

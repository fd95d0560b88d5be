pub mod bootstrap;
pub mod config;
pub mod db;
pub mod error;
pub mod schema;

pub use bootstrap::{bootstrap_tables, Bootstrapper, ReconcileMode, ReconcileReport};
pub use config::Config;
pub use db::{open_pool, MockStore, SchemaStore, SqliteStore, StoreError};
pub use error::BootstrapError;
pub use schema::{Column, ColumnType, ForeignKey, Registry, SchemaError, TableSchema};

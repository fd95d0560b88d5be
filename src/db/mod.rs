//! Storage layer for schema provisioning.
//!
//! This module provides:
//! - SQLite connection setup and pragma configuration
//! - The `SchemaStore` trait with its SQLite implementation
//! - An in-memory `MockStore` for exercising bootstrap ordering

pub mod connect;
pub mod mock;
pub mod store;

pub use connect::open_pool;
pub use mock::{MockStore, StoreEvent};
pub use store::{ColumnInfo, ForeignKeyInfo, SchemaStore, SqliteStore, StoreError};

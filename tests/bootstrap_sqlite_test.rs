//! Integration tests for bootstrapping the blog schema into SQLite.

use inkpress::db::{open_pool, ForeignKeyInfo, SchemaStore, SqliteStore};
use inkpress::schema::tables::{ALL_TABLES, JOIN_TABLES};
use inkpress::{bootstrap_tables, BootstrapError, ReconcileMode, Registry};
use std::sync::Arc;
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

async fn setup_store() -> (Arc<SqliteStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("database.db")
        .to_string_lossy()
        .to_string();
    let pool = open_pool(&db_path).await.expect("open_pool failed");
    (Arc::new(SqliteStore::new(pool)), temp_dir)
}

fn sorted_registry_names() -> Vec<String> {
    let mut names: Vec<String> = Registry::blog()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect();
    names.sort();
    names
}

async fn seed_rows(store: &SqliteStore) {
    let pool = store.pool();
    sqlx::query("INSERT INTO article (title, status) VALUES ('hello', 1)")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO tag (name, color) VALUES ('rust', 'orange')")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO article_tag (article_id, tag_id) VALUES (1, 1)")
        .execute(pool)
        .await
        .unwrap();
}

async fn row_count(store: &SqliteStore, table: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM \"{}\"", table))
        .fetch_one(store.pool())
        .await
        .unwrap();
    count
}

#[tokio::test]
async fn test_empty_store_gets_every_table_with_declared_columns() {
    let (store, _temp) = setup_store().await;

    let report = bootstrap_tables(store.clone(), false).await.unwrap();
    assert_eq!(report.mode, ReconcileMode::CreateMissing);
    assert_eq!(report.created.len(), 9);

    assert_eq!(store.table_names().await.unwrap(), sorted_registry_names());

    for table in ALL_TABLES {
        let columns = store.table_columns(table.name).await.unwrap();
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        let declared: Vec<&str> = table.columns.iter().map(|c| c.name).collect();
        assert_eq!(names, declared, "columns of {}", table.name);

        for (info, column) in columns.iter().zip(table.columns) {
            assert_eq!(info.sql_type, column.ty.sql_type(), "{}.{}", table.name, column.name);
            assert_eq!(info.not_null, column.not_null, "{}.{}", table.name, column.name);
            assert_eq!(info.primary_key, column.primary_key, "{}.{}", table.name, column.name);
            assert_eq!(info.unique, column.unique, "{}.{}", table.name, column.name);
        }
    }
}

#[tokio::test]
async fn test_second_call_is_noop() {
    let (store, _temp) = setup_store().await;
    assert_ok!(bootstrap_tables(store.clone(), false).await);
    seed_rows(&store).await;

    let report = assert_ok!(bootstrap_tables(store.clone(), false).await);
    assert!(report.created.is_empty());
    assert_eq!(report.skipped.len(), 9);
    assert!(!report.changed());

    assert_eq!(row_count(&store, "article_tag").await, 1);
    assert_eq!(store.table_names().await.unwrap(), sorted_registry_names());
}

#[tokio::test]
async fn test_force_reset_empties_populated_store() {
    let (store, _temp) = setup_store().await;
    assert_ok!(bootstrap_tables(store.clone(), false).await);
    seed_rows(&store).await;
    assert_eq!(row_count(&store, "article").await, 1);

    let report = assert_ok!(bootstrap_tables(store.clone(), true).await);
    assert_eq!(report.mode, ReconcileMode::ForceReset);
    assert_eq!(report.dropped.len(), 9);
    assert_eq!(report.created.len(), 9);

    for table in ALL_TABLES {
        assert!(store.has_table(table.name).await.unwrap());
        assert_eq!(row_count(&store, table.name).await, 0, "{} not empty", table.name);
    }
}

#[tokio::test]
async fn test_force_reset_on_empty_store() {
    let (store, _temp) = setup_store().await;

    let report = assert_ok!(bootstrap_tables(store.clone(), true).await);
    assert!(report.dropped.is_empty());
    assert_eq!(report.created.len(), 9);
    assert_eq!(store.table_names().await.unwrap(), sorted_registry_names());
}

#[tokio::test]
async fn test_join_tables_reference_registry_tables() {
    let (store, _temp) = setup_store().await;
    assert_ok!(bootstrap_tables(store.clone(), false).await);

    let registry = Registry::blog();
    let order: Vec<&str> = registry
        .creation_order()
        .unwrap()
        .iter()
        .map(|t| t.name)
        .collect();

    for table in JOIN_TABLES {
        let fks = store.foreign_keys(table.name).await.unwrap();
        assert_eq!(fks.len(), 2, "{} should have two foreign keys", table.name);

        let join_pos = order.iter().position(|n| *n == table.name).unwrap();
        for ForeignKeyInfo { table: target, to, .. } in &fks {
            assert!(registry.get(target).is_some(), "{} is not registered", target);
            assert_eq!(to, "id");
            let target_pos = order.iter().position(|n| n == target).unwrap();
            assert!(target_pos < join_pos, "{} created after {}", target, table.name);
        }
    }
}

#[tokio::test]
async fn test_foreign_keys_enforced_on_join_tables() {
    let (store, _temp) = setup_store().await;
    assert_ok!(bootstrap_tables(store.clone(), false).await);

    let result = sqlx::query("INSERT INTO user_article (article_id, user_id) VALUES (42, 42)")
        .execute(store.pool())
        .await;
    assert_err!(result);

    let result = sqlx::query("INSERT INTO article_category (article_id) VALUES (1)")
        .execute(store.pool())
        .await;
    assert_err!(result);
}

#[tokio::test]
async fn test_unique_columns_enforced() {
    let (store, _temp) = setup_store().await;
    assert_ok!(bootstrap_tables(store.clone(), false).await);
    seed_rows(&store).await;

    let result = sqlx::query("INSERT INTO tag (name, color) VALUES ('rust', 'red')")
        .execute(store.pool())
        .await;
    assert_err!(result);

    let result = sqlx::query("INSERT INTO article (title, status) VALUES ('hello', 2)")
        .execute(store.pool())
        .await;
    assert_err!(result);

    let result = sqlx::query("INSERT INTO tag (name, color) VALUES ('sqlite', 'orange')")
        .execute(store.pool())
        .await;
    assert_ok!(result);
}

#[tokio::test]
async fn test_partial_store_gets_missing_tables_only() {
    let (store, _temp) = setup_store().await;
    sqlx::query("CREATE TABLE tag (id integer primary key, legacy text)")
        .execute(store.pool())
        .await
        .unwrap();

    let report = assert_ok!(bootstrap_tables(store.clone(), false).await);
    assert_eq!(report.skipped, vec!["tag"]);
    assert_eq!(report.created.len(), 8);

    // Existing tables are left untouched.
    let columns = store.table_columns("tag").await.unwrap();
    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "legacy"]);
}

#[tokio::test]
async fn test_closed_pool_surfaces_error() {
    let (store, _temp) = setup_store().await;
    store.pool().close().await;

    let err = bootstrap_tables(store.clone(), false).await.unwrap_err();
    assert!(matches!(err, BootstrapError::Inspect { .. }));
}

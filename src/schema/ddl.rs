//! SQLite DDL rendering for table descriptors.

use super::{Column, TableSchema};

/// Quote an identifier for SQLite, doubling embedded quotes.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

fn column_definition(column: &Column) -> String {
    let mut def = format!("{} {}", quote_ident(column.name), column.ty.sql_type());
    if column.not_null {
        def.push_str(" not null");
    }
    if column.primary_key {
        def.push_str(" primary key");
        // SQLite only accepts autoincrement on an integer primary key.
        if column.auto_increment {
            def.push_str(" autoincrement");
        }
    }
    if column.unique {
        def.push_str(" unique");
    }
    def
}

/// Render the `CREATE TABLE` statement for a table.
///
/// Columns come first in declaration order, followed by one
/// `foreign key` clause per referencing column.
pub fn create_table_sql(table: &TableSchema) -> String {
    let mut parts: Vec<String> = table.columns.iter().map(column_definition).collect();

    for (column, fk) in table.foreign_keys() {
        parts.push(format!(
            "foreign key({}) references {}({})",
            quote_ident(column.name),
            quote_ident(fk.table),
            quote_ident(fk.column)
        ));
    }

    format!("create table {} ({})", quote_ident(table.name), parts.join(", "))
}

/// Render the `DROP TABLE` statement for a table name.
///
/// No `if exists`: dropping a missing table is an error for the caller to
/// decide about.
pub fn drop_table_sql(name: &str) -> String {
    format!("drop table {}", quote_ident(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables::{ARTICLE_TAG_TABLE, ARTICLE_TABLE, TIMELINE_TABLE};

    #[test]
    fn test_quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("user"), "\"user\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_create_simple_table() {
        assert_eq!(
            create_table_sql(&TIMELINE_TABLE),
            "create table \"timeline\" (\"id\" integer not null primary key autoincrement, \
             \"line\" varchar(255) unique)"
        );
    }

    #[test]
    fn test_create_table_with_not_null_and_text() {
        let sql = create_table_sql(&ARTICLE_TABLE);
        assert!(sql.contains("\"title\" varchar(255) not null unique"));
        assert!(sql.contains("\"content\" text"));
        assert!(sql.contains("\"status\" integer not null"));
        assert!(!sql.contains("foreign key"));
    }

    #[test]
    fn test_create_join_table_emits_foreign_keys() {
        let sql = create_table_sql(&ARTICLE_TAG_TABLE);
        assert!(sql.contains("\"article_id\" integer not null"));
        assert!(sql.contains("foreign key(\"article_id\") references \"article\"(\"id\")"));
        assert!(sql.contains("foreign key(\"tag_id\") references \"tag\"(\"id\")"));
    }

    #[test]
    fn test_drop_table() {
        assert_eq!(drop_table_sql("tag"), "drop table \"tag\"");
    }
}

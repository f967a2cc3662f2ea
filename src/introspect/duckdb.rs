//! DuckDB catalog introspection via the `duckdb_*()` metadata functions.

use super::{ColumnMeta, ForeignKeyMeta, SchemaProvider};
use ahash::AHashSet;
use anyhow::{Context, Result};
use duckdb::{AccessMode, Config, Connection};
use std::path::Path;

const LIST_TABLES: &str = "SELECT table_name FROM duckdb_tables() \
     WHERE database_name = current_database() AND schema_name = 'main' \
     AND NOT internal AND NOT temporary \
     ORDER BY table_oid";

const LIST_COLUMNS: &str = "SELECT column_name, data_type FROM duckdb_columns() \
     WHERE database_name = current_database() AND schema_name = 'main' AND table_name = ? \
     ORDER BY column_index";

const LIST_PRIMARY_KEY: &str = "SELECT unnest(constraint_column_names) FROM duckdb_constraints() \
     WHERE database_name = current_database() AND schema_name = 'main' AND table_name = ? \
     AND constraint_type = 'PRIMARY KEY'";

// Parallel unnest zips the source and referenced column lists pairwise
const LIST_FOREIGN_KEYS: &str = "SELECT unnest(constraint_column_names), referenced_table, \
     unnest(referenced_column_names) FROM duckdb_constraints() \
     WHERE database_name = current_database() AND schema_name = 'main' AND table_name = ? \
     AND constraint_type = 'FOREIGN KEY'";

/// Read-only schema provider backed by a DuckDB database file
pub struct DuckDbProvider {
    conn: Connection,
}

impl DuckDbProvider {
    /// Open a DuckDB database file in read-only access mode
    pub fn open(path: &Path) -> Result<Self> {
        let config = Config::default()
            .access_mode(AccessMode::ReadOnly)
            .context("Failed to configure DuckDB access mode")?;
        let conn = Connection::open_with_flags(path, config)
            .with_context(|| format!("Failed to open DuckDB database: {}", path.display()))?;

        Ok(Self { conn })
    }

    /// Wrap an existing connection (used by tests with in-memory databases)
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    fn primary_key_columns(&self, table: &str) -> Result<AHashSet<String>> {
        let mut stmt = self.conn.prepare(LIST_PRIMARY_KEY)?;
        let names = stmt
            .query_map([table], |row| row.get::<_, String>(0))?
            .collect::<duckdb::Result<AHashSet<_>>>()?;
        Ok(names)
    }
}

impl SchemaProvider for DuckDbProvider {
    fn list_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(LIST_TABLES)
            .context("Failed to read duckdb_tables()")?;

        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<duckdb::Result<Vec<_>>>()
            .context("Failed to list tables")?;

        Ok(names)
    }

    fn list_columns(&self, table: &str) -> Result<Vec<ColumnMeta>> {
        let pk_columns = self
            .primary_key_columns(table)
            .with_context(|| format!("Failed to read primary key of table '{}'", table))?;

        let mut stmt = self.conn.prepare(LIST_COLUMNS)?;
        let columns = stmt
            .query_map([table], |row| {
                let name: String = row.get(0)?;
                let declared_type: Option<String> = row.get(1)?;
                Ok((name, declared_type))
            })?
            .collect::<duckdb::Result<Vec<_>>>()
            .with_context(|| format!("Failed to read columns of table '{}'", table))?;

        Ok(columns
            .into_iter()
            .map(|(name, declared_type)| {
                let is_pk = pk_columns.contains(&name);
                ColumnMeta::new(name, declared_type.as_deref(), is_pk)
            })
            .collect())
    }

    fn list_declared_foreign_keys(&self, table: &str) -> Result<Vec<ForeignKeyMeta>> {
        let mut stmt = self.conn.prepare(LIST_FOREIGN_KEYS)?;
        let fks = stmt
            .query_map([table], |row| {
                Ok(ForeignKeyMeta {
                    source_column: row.get(0)?,
                    referenced_table: row.get(1)?,
                    referenced_column: row.get::<_, Option<String>>(2)?,
                })
            })?
            .collect::<duckdb::Result<Vec<_>>>()
            .with_context(|| format!("Failed to read foreign keys of table '{}'", table))?;

        Ok(fks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_provider(ddl: &str) -> DuckDbProvider {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(ddl).unwrap();
        DuckDbProvider::from_connection(conn)
    }

    #[test]
    fn test_list_tables_and_columns() {
        let provider = create_provider(
            "CREATE TABLE authors (id INTEGER PRIMARY KEY, name VARCHAR);
             CREATE TABLE books (id INTEGER PRIMARY KEY, title VARCHAR, author_id INTEGER);",
        );

        assert_eq!(provider.list_tables().unwrap(), vec!["authors", "books"]);

        let columns = provider.list_columns("books").unwrap();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].name, "id");
        assert!(columns[0].is_primary_key);
        assert_eq!(columns[0].declared_type, "INTEGER");
        assert_eq!(columns[2].name, "author_id");
        assert!(!columns[2].is_primary_key);
    }

    #[test]
    fn test_list_declared_foreign_keys() {
        let provider = create_provider(
            "CREATE TABLE authors (id INTEGER PRIMARY KEY);
             CREATE TABLE books (id INTEGER PRIMARY KEY, author_id INTEGER REFERENCES authors(id));",
        );

        let fks = provider.list_declared_foreign_keys("books").unwrap();
        assert_eq!(
            fks,
            vec![ForeignKeyMeta {
                referenced_table: "authors".to_string(),
                source_column: "author_id".to_string(),
                referenced_column: Some("id".to_string()),
            }]
        );

        assert!(provider
            .list_declared_foreign_keys("authors")
            .unwrap()
            .is_empty());
    }
}

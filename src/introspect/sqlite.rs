//! SQLite catalog introspection via `sqlite_master` and the table-valued pragmas.

use super::{ColumnMeta, ForeignKeyMeta, SchemaProvider};
use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Read-only schema provider backed by a SQLite database file
pub struct SqliteProvider {
    conn: Connection,
}

impl SqliteProvider {
    /// Open a SQLite database file without write access
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open SQLite database: {}", path.display()))?;

        Ok(Self { conn })
    }

    /// Wrap an existing connection (used by tests with in-memory databases)
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl SchemaProvider for SqliteProvider {
    fn list_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'")
            .context("Failed to read sqlite_master")?;

        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to list tables")?;

        Ok(names)
    }

    fn list_columns(&self, table: &str) -> Result<Vec<ColumnMeta>> {
        // pragma_table_info: cid, name, type, notnull, dflt_value, pk
        let mut stmt = self
            .conn
            .prepare("SELECT name, type, pk FROM pragma_table_info(?1)")?;

        let columns = stmt
            .query_map([table], |row| {
                let name: String = row.get(0)?;
                let declared_type: Option<String> = row.get(1)?;
                let pk: i64 = row.get(2)?;
                Ok(ColumnMeta::new(name, declared_type.as_deref(), pk > 0))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("Failed to read columns of table '{}'", table))?;

        Ok(columns)
    }

    fn list_declared_foreign_keys(&self, table: &str) -> Result<Vec<ForeignKeyMeta>> {
        // pragma_foreign_key_list: id, seq, table, from, to, on_update, on_delete, match
        let mut stmt = self
            .conn
            .prepare(r#"SELECT "table", "from", "to" FROM pragma_foreign_key_list(?1)"#)?;

        let fks = stmt
            .query_map([table], |row| {
                Ok(ForeignKeyMeta {
                    referenced_table: row.get(0)?,
                    source_column: row.get(1)?,
                    referenced_column: row.get::<_, Option<String>>(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .with_context(|| format!("Failed to read foreign keys of table '{}'", table))?;

        Ok(fks)
    }
}

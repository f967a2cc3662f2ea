//! Schema introspection for database files.
//!
//! This module provides:
//! - The [`SchemaProvider`] contract consumed by the ERD pipeline
//! - Engine detection from file headers and extensions
//! - Read-only providers for SQLite and DuckDB database files

mod duckdb;
mod sqlite;

pub use self::duckdb::DuckDbProvider;
pub use self::sqlite::SqliteProvider;

use anyhow::{bail, Result};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Declared type used when the catalog has none for a column
pub const DEFAULT_COLUMN_TYPE: &str = "TEXT";

/// Column metadata as reported by a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    pub name: String,
    pub declared_type: String,
    pub is_primary_key: bool,
}

impl ColumnMeta {
    /// Build column metadata, falling back to [`DEFAULT_COLUMN_TYPE`] for a blank type
    pub fn new(name: impl Into<String>, declared_type: Option<&str>, is_primary_key: bool) -> Self {
        let declared_type = declared_type
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_COLUMN_TYPE);

        Self {
            name: name.into(),
            declared_type: declared_type.to_string(),
            is_primary_key,
        }
    }
}

/// One column pair of a declared foreign-key constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyMeta {
    /// Table the constraint points at
    pub referenced_table: String,
    /// Referencing column in the table that declares the constraint
    pub source_column: String,
    /// Referenced column, if the catalog names one
    pub referenced_column: Option<String>,
}

/// Read-only access to the schema catalog of a database.
///
/// Implementations must return tables in catalog (discovery) order and must
/// exclude engine-internal tables.
pub trait SchemaProvider {
    /// List user tables in discovery order
    fn list_tables(&self) -> Result<Vec<String>>;

    /// List the columns of `table` in declaration order
    fn list_columns(&self, table: &str) -> Result<Vec<ColumnMeta>>;

    /// List the declared foreign keys of `table`, one entry per column pair
    fn list_declared_foreign_keys(&self, table: &str) -> Result<Vec<ForeignKeyMeta>>;
}

/// Database engine of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Engine {
    #[default]
    Sqlite,
    DuckDb,
}

impl FromStr for Engine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Engine::Sqlite),
            "duckdb" | "duck" => Ok(Engine::DuckDb),
            _ => Err(format!(
                "Unknown engine: {}. Valid options: sqlite, duckdb",
                s
            )),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Sqlite => write!(f, "sqlite"),
            Engine::DuckDb => write!(f, "duckdb"),
        }
    }
}

const SQLITE_MAGIC: &[u8] = b"SQLite format 3\0";
const DUCKDB_MAGIC: &[u8] = b"DUCK";
const DUCKDB_MAGIC_OFFSET: usize = 8;

impl Engine {
    /// Detect the engine from the leading bytes of a database file
    pub fn from_header(header: &[u8]) -> Option<Self> {
        if header.starts_with(SQLITE_MAGIC) {
            return Some(Engine::Sqlite);
        }
        let end = DUCKDB_MAGIC_OFFSET + DUCKDB_MAGIC.len();
        if header.len() >= end && &header[DUCKDB_MAGIC_OFFSET..end] == DUCKDB_MAGIC {
            return Some(Engine::DuckDb);
        }
        None
    }

    /// Detect the engine from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "sqlite" | "sqlite3" | "db3" | "s3db" | "sl3" => Some(Engine::Sqlite),
            "duckdb" | "ddb" => Some(Engine::DuckDb),
            _ => None,
        }
    }

    /// Detect the engine of a file: header magic first, then extension, else SQLite
    pub fn detect(path: &Path) -> Result<Self> {
        let mut header = [0u8; 16];
        let mut file = File::open(path)?;
        let bytes_read = read_up_to(&mut file, &mut header)?;

        if let Some(engine) = Self::from_header(&header[..bytes_read]) {
            return Ok(engine);
        }

        Ok(path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Engine::from_extension)
            .unwrap_or_default())
    }
}

fn read_up_to(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

/// Open a read-only provider for the database at `path`.
///
/// The file must exist; a missing file is reported before any connection is made.
pub fn open_provider(path: &Path, engine: Option<Engine>) -> Result<Box<dyn SchemaProvider>> {
    if !path.exists() {
        bail!("database file does not exist: {}", path.display());
    }

    let engine = match engine {
        Some(e) => e,
        None => Engine::detect(path)?,
    };

    Ok(match engine {
        Engine::Sqlite => Box::new(SqliteProvider::open(path)?),
        Engine::DuckDb => Box::new(DuckDbProvider::open(path)?),
    })
}

//! Schema snapshot used by the ERD pipeline.
//!
//! This module provides:
//! - Data models for tables, columns, and declared foreign keys
//! - Table scope selection (allow-list and exclusion patterns)
//! - Loading an immutable snapshot of the in-scope tables from a provider

mod filter;

#[allow(unused_imports)]
pub use filter::*;

use crate::introspect::{ColumnMeta, ForeignKeyMeta, SchemaProvider};
use ahash::AHashSet;
use anyhow::{Context, Result};

/// A column of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column name, unique within its table
    pub name: String,
    /// Declared SQL type (`TEXT` when the catalog has none)
    pub declared_type: String,
    /// Whether this column is part of the primary key
    pub is_primary_key: bool,
}

impl From<ColumnMeta> for Column {
    fn from(meta: ColumnMeta) -> Self {
        Self {
            name: meta.name,
            declared_type: meta.declared_type,
            is_primary_key: meta.is_primary_key,
        }
    }
}

/// A declared foreign-key column pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKey {
    /// Referencing column in the owning table
    pub column: String,
    /// Referenced (parent) table
    pub referenced_table: String,
    /// Referenced column, if the catalog names one
    pub referenced_column: Option<String>,
}

impl From<ForeignKeyMeta> for ForeignKey {
    fn from(meta: ForeignKeyMeta) -> Self {
        Self {
            column: meta.source_column,
            referenced_table: meta.referenced_table,
            referenced_column: meta.referenced_column,
        }
    }
}

/// A table with its columns and declared foreign keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub name: String,
    /// All columns in declaration order
    pub columns: Vec<Column>,
    /// Declared foreign keys in catalog order
    pub foreign_keys: Vec<ForeignKey>,
}

impl Table {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
            foreign_keys: Vec::new(),
        }
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Snapshot of the in-scope tables, in discovery order
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub tables: Vec<Table>,
}

impl Schema {
    pub fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    /// Read the in-scope tables from a provider.
    ///
    /// Only tables kept by `filter` are introspected. Any metadata read
    /// failure aborts the whole load.
    pub fn load(provider: &dyn SchemaProvider, filter: &TableFilter) -> Result<Self> {
        let all = provider.list_tables().context("Failed to list tables")?;
        let in_scope = filter.apply(&all);

        let mut tables = Vec::with_capacity(in_scope.len());
        for name in in_scope {
            let columns = provider
                .list_columns(&name)
                .with_context(|| format!("Failed to introspect table '{}'", name))?;
            let foreign_keys = provider
                .list_declared_foreign_keys(&name)
                .with_context(|| format!("Failed to introspect table '{}'", name))?;

            tables.push(Table {
                name,
                columns: columns.into_iter().map(Column::from).collect(),
                foreign_keys: foreign_keys.into_iter().map(ForeignKey::from).collect(),
            });
        }

        Ok(Self { tables })
    }

    /// Names of all tables in the snapshot (the active table set)
    pub fn table_names(&self) -> AHashSet<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    /// Get a table by name
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total number of columns across all tables
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }
}

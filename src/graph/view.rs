//! Graph view: the tables and unique relationships rendered into an ERD.

use crate::relations::{
    collect_relationships, dedup_relationships, GuessStrategy, Origin, Relationship,
};
use crate::schema::{Schema, Table};

/// Relationship cardinality for ERD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cardinality {
    /// One parent row to many child rows
    #[default]
    OneToMany,
}

impl Cardinality {
    /// Mermaid ERD notation, parent on the left
    pub fn as_mermaid(self) -> &'static str {
        match self {
            Cardinality::OneToMany => "||--o{",
        }
    }
}

/// A schema snapshot paired with its deduplicated relationships
#[derive(Debug, Clone, Default)]
pub struct ErdView {
    /// Tables in discovery order
    pub tables: Vec<Table>,
    /// Unique relationships in encounter order (declared before guessed)
    pub relationships: Vec<Relationship>,
}

impl ErdView {
    /// Build a view from a snapshot, optionally guessing undeclared relationships
    pub fn build(schema: Schema, guess: Option<GuessStrategy>) -> Self {
        let relationships = dedup_relationships(collect_relationships(&schema, guess));

        Self {
            tables: schema.tables,
            relationships,
        }
    }

    /// Get the number of tables in the view
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Total number of columns across all tables
    pub fn column_count(&self) -> usize {
        self.tables.iter().map(|t| t.columns.len()).sum()
    }

    /// Get the number of relationships in the view
    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// Count relationships of one origin
    pub fn count_by_origin(&self, origin: Origin) -> usize {
        self.relationships
            .iter()
            .filter(|r| r.origin == origin)
            .count()
    }

    /// Check if the view is empty
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Get table by name
    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
}

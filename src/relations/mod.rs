//! Relationship model for ERD generation.
//!
//! Relationships come from two sources:
//! - Declared foreign-key constraints in the schema catalog
//! - A column naming heuristic (`<stem>_id`) for undeclared references
//!
//! Declared relationships are always collected first, so when both sources
//! describe the same column pair the declared one survives deduplication.

mod declared;
mod guess;
mod inflection;

pub use declared::extract_declared;
#[allow(unused_imports)]
pub use guess::{guess_relationships, guess_target, GuessStrategy};
#[allow(unused_imports)]
pub use inflection::{pluralize, singularize};

use crate::schema::Schema;
use ahash::AHashSet;
use serde::Serialize;
use std::fmt;

/// Referenced column assumed when the catalog or heuristic names none
pub const DEFAULT_TARGET_COLUMN: &str = "id";

/// Where a relationship came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Formal foreign-key constraint
    Declared,
    /// Inferred from a column name
    Guessed,
}

impl Origin {
    /// Label used on diagram relationship lines
    pub fn label(self) -> &'static str {
        match self {
            Origin::Declared => "FK",
            Origin::Guessed => "guessed",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Declared => write!(f, "declared"),
            Origin::Guessed => write!(f, "guessed"),
        }
    }
}

/// A child-to-parent relationship between two in-scope tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Referencing (child) table
    pub from_table: String,
    /// Referencing column
    pub from_column: String,
    /// Referenced (parent) table
    pub to_table: String,
    /// Referenced column
    pub to_column: String,
    pub origin: Origin,
}

impl Relationship {
    /// Identity used for deduplication; origin is deliberately not part of it
    pub fn identity(&self) -> (&str, &str, &str, &str) {
        (
            &self.to_table,
            &self.from_table,
            &self.from_column,
            &self.to_column,
        )
    }

    /// Human-readable `child.column→parent.column` description
    pub fn description(&self) -> String {
        format!(
            "{}.{}→{}.{}",
            self.from_table, self.from_column, self.to_table, self.to_column
        )
    }

    pub fn is_guessed(&self) -> bool {
        self.origin == Origin::Guessed
    }
}

/// Collect declared relationships, then guessed ones when a strategy is given
pub fn collect_relationships(schema: &Schema, guess: Option<GuessStrategy>) -> Vec<Relationship> {
    let in_scope = schema.table_names();

    let mut relationships = extract_declared(schema, &in_scope);
    if let Some(strategy) = guess {
        relationships.extend(guess_relationships(schema, &in_scope, strategy));
    }
    relationships
}

/// Drop relationships whose identity was already seen, keeping encounter order
pub fn dedup_relationships(relationships: Vec<Relationship>) -> Vec<Relationship> {
    let mut seen: AHashSet<(String, String, String, String)> = AHashSet::new();
    let mut unique = Vec::with_capacity(relationships.len());

    for rel in relationships {
        let (to_table, from_table, from_column, to_column) = rel.identity();
        let key = (
            to_table.to_string(),
            from_table.to_string(),
            from_column.to_string(),
            to_column.to_string(),
        );
        if seen.insert(key) {
            unique.push(rel);
        }
    }

    unique
}

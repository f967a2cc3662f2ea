//! Relationships from declared foreign-key constraints.

use super::{Origin, Relationship, DEFAULT_TARGET_COLUMN};
use crate::schema::Schema;
use ahash::AHashSet;

/// Convert declared foreign keys into relationships.
///
/// Constraints whose referenced table is outside `in_scope` are skipped
/// silently; partial schemas are a normal input.
pub fn extract_declared(schema: &Schema, in_scope: &AHashSet<&str>) -> Vec<Relationship> {
    let mut relationships = Vec::new();

    for table in &schema.tables {
        for fk in &table.foreign_keys {
            if !in_scope.contains(fk.referenced_table.as_str()) {
                continue;
            }

            relationships.push(Relationship {
                from_table: table.name.clone(),
                from_column: fk.column.clone(),
                to_table: fk.referenced_table.clone(),
                to_column: fk
                    .referenced_column
                    .clone()
                    .unwrap_or_else(|| DEFAULT_TARGET_COLUMN.to_string()),
                origin: Origin::Declared,
            });
        }
    }

    relationships
}

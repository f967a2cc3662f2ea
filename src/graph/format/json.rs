//! JSON format output for ERD data.

use crate::graph::view::ErdView;
use crate::relations::Origin;
use schemars::JsonSchema;
use serde::Serialize;

/// JSON representation of the ERD
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErdJson {
    pub tables: Vec<TableJson>,
    pub relationships: Vec<RelationshipJson>,
    pub stats: ErdStats,
}

/// JSON representation of a table with its columns
#[derive(Debug, Serialize, JsonSchema)]
pub struct TableJson {
    pub name: String,
    pub columns: Vec<ColumnJson>,
}

/// JSON representation of a column
#[derive(Debug, Serialize, JsonSchema)]
pub struct ColumnJson {
    pub name: String,
    #[serde(rename = "type")]
    pub col_type: String,
    pub is_primary_key: bool,
}

/// JSON representation of a relationship
#[derive(Debug, Serialize, JsonSchema)]
pub struct RelationshipJson {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
    pub origin: Origin,
    /// `child.column→parent.column`
    pub description: String,
}

/// ERD statistics
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErdStats {
    pub table_count: usize,
    pub column_count: usize,
    pub relationship_count: usize,
    pub declared_count: usize,
    pub guessed_count: usize,
}

/// Generate JSON output from a view
pub fn to_json(view: &ErdView) -> String {
    let erd = build_erd_json(view);
    serde_json::to_string_pretty(&erd).unwrap_or_else(|_| "{}".to_string())
}

/// Build the JSON structure
pub fn build_erd_json(view: &ErdView) -> ErdJson {
    let tables = view
        .tables
        .iter()
        .map(|table| TableJson {
            name: table.name.clone(),
            columns: table
                .columns
                .iter()
                .map(|col| ColumnJson {
                    name: col.name.clone(),
                    col_type: col.declared_type.clone(),
                    is_primary_key: col.is_primary_key,
                })
                .collect(),
        })
        .collect();

    let relationships = view
        .relationships
        .iter()
        .map(|r| RelationshipJson {
            from_table: r.from_table.clone(),
            from_column: r.from_column.clone(),
            to_table: r.to_table.clone(),
            to_column: r.to_column.clone(),
            origin: r.origin,
            description: r.description(),
        })
        .collect();

    ErdJson {
        tables,
        relationships,
        stats: ErdStats {
            table_count: view.table_count(),
            column_count: view.column_count(),
            relationship_count: view.relationship_count(),
            declared_count: view.count_by_origin(Origin::Declared),
            guessed_count: view.count_by_origin(Origin::Guessed),
        },
    }
}

//! JSON Schema generation for the `--format json` output.
//!
//! Exported via the `schema` subcommand so downstream tooling can validate
//! the ERD document.

use schemars::{schema_for, Schema};

/// Schema of the JSON ERD document
pub fn erd_schema() -> Schema {
    schema_for!(crate::graph::format::ErdJson)
}

/// Pretty-printed schema text
pub fn erd_schema_string() -> String {
    serde_json::to_string_pretty(&erd_schema()).unwrap_or_else(|_| "{}".to_string())
}

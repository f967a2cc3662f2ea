// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

pub mod config;
pub mod graph;
pub mod introspect;
pub mod json_schema;
pub mod relations;
pub mod schema;

//! ERD (Entity-Relationship Diagram) generation module.
//!
//! This module provides:
//! - A view pairing the in-scope tables with their unique relationships
//! - Multiple output formats: Mermaid, JSON, DOT (Graphviz)

pub mod format;
pub mod view;

#[allow(unused_imports)]
pub use format::{mermaid_lines, to_dot, to_json, to_mermaid, Layout, OutputFormat};
#[allow(unused_imports)]
pub use view::{Cardinality, ErdView};

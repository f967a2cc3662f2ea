//! YAML configuration for the graph command.
//!
//! Every key is optional; command-line flags take precedence over the file.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete YAML configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ErdYamlConfig {
    /// Allow-list of tables to include
    pub tables: Option<Vec<String>>,
    /// Glob patterns of tables to exclude
    pub exclude: Vec<String>,
    /// Guess relationships from `<stem>_id` column names
    pub guess: bool,
    /// Also try inflected plural/singular forms when guessing
    pub inflect: bool,
    /// Output format: mermaid, json, dot
    pub format: Option<String>,
    /// DOT layout: lr, tb
    pub layout: Option<String>,
    /// Database engine: sqlite, duckdb
    pub engine: Option<String>,
}

impl ErdYamlConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse configuration from YAML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ErdYamlConfig = serde_yaml_ng::from_str(content)?;
        Ok(config)
    }
}

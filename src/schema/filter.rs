//! Table scope selection: allow-list and exclusion patterns.

use ahash::AHashSet;
use glob::Pattern;

/// Narrow `all` to the names present in `wanted`, preserving discovery order.
///
/// With no wanted set the full list is returned unchanged. An empty result is
/// a valid outcome, not an error.
pub fn filter_tables(all: &[String], wanted: Option<&AHashSet<String>>) -> Vec<String> {
    match wanted {
        Some(wanted) => all.iter().filter(|t| wanted.contains(*t)).cloned().collect(),
        None => all.to_vec(),
    }
}

/// Parse a comma-separated table list, trimming names and dropping empty entries
pub fn parse_table_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Scope settings applied to the discovered table list
#[derive(Debug, Clone, Default)]
pub struct TableFilter {
    /// Allow-list of exact table names (None = every table)
    pub wanted: Option<AHashSet<String>>,
    /// Glob patterns of tables removed after the allow-list
    pub exclude: Vec<Pattern>,
}

impl TableFilter {
    /// Build a filter from an optional allow-list and exclusion patterns
    pub fn new(tables: Option<Vec<String>>, exclude: Vec<Pattern>) -> Self {
        Self {
            wanted: tables.map(|t| t.into_iter().collect()),
            exclude,
        }
    }

    /// Compile exclusion globs, reporting the first invalid pattern
    pub fn compile_patterns(patterns: &[String]) -> anyhow::Result<Vec<Pattern>> {
        patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| anyhow::anyhow!("invalid exclude pattern '{}': {}", p, e))
            })
            .collect()
    }

    /// Apply the filter to the discovered table names, keeping discovery order
    pub fn apply(&self, all: &[String]) -> Vec<String> {
        let mut tables = filter_tables(all, self.wanted.as_ref());
        if !self.exclude.is_empty() {
            tables.retain(|t| !self.exclude.iter().any(|p| p.matches(t)));
        }
        tables
    }

    /// Whether the filter keeps every table
    pub fn is_unrestricted(&self) -> bool {
        self.wanted.is_none() && self.exclude.is_empty()
    }
}

//! Relationship inference from `<stem>_id` column names.

use super::inflection::{pluralize, singularize};
use super::{Origin, Relationship, DEFAULT_TARGET_COLUMN};
use crate::schema::Schema;
use ahash::AHashSet;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static ID_COLUMN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+)_id$").unwrap());

/// Candidate generation rules for guessed targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuessStrategy {
    /// `stem`, `stem + "s"`, `stem` without trailing `s`
    #[default]
    Simple,
    /// The simple candidates, then inflected plural and singular forms
    Inflected,
}

impl FromStr for GuessStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "simple" => Ok(GuessStrategy::Simple),
            "inflected" | "inflect" => Ok(GuessStrategy::Inflected),
            _ => Err(format!(
                "Unknown guess strategy: {}. Valid options: simple, inflected",
                s
            )),
        }
    }
}

impl fmt::Display for GuessStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuessStrategy::Simple => write!(f, "simple"),
            GuessStrategy::Inflected => write!(f, "inflected"),
        }
    }
}

impl GuessStrategy {
    /// Candidate parent table names for a stem, highest priority first
    pub fn candidates(self, stem: &str) -> Vec<String> {
        let mut candidates = vec![
            stem.to_string(),
            format!("{}s", stem),
            stem.trim_end_matches('s').to_string(),
        ];

        if self == GuessStrategy::Inflected {
            candidates.push(pluralize(stem));
            candidates.push(singularize(stem));
        }

        candidates
    }
}

/// Extract the stem of a `<stem>_id` column name (case-sensitive, non-empty stem)
pub fn id_column_stem(column: &str) -> Option<&str> {
    ID_COLUMN_RE
        .captures(column)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Resolve the parent table for a column, if any.
///
/// Picks the first candidate that is in scope and is not `table` itself, so a
/// column never produces a self-referencing guess.
pub fn guess_target(
    table: &str,
    column: &str,
    in_scope: &AHashSet<&str>,
    strategy: GuessStrategy,
) -> Option<String> {
    let stem = id_column_stem(column)?;

    strategy
        .candidates(stem)
        .into_iter()
        .find(|candidate| candidate != table && in_scope.contains(candidate.as_str()))
}

/// Propose relationships for every `<stem>_id` column that resolves to a table
pub fn guess_relationships(
    schema: &Schema,
    in_scope: &AHashSet<&str>,
    strategy: GuessStrategy,
) -> Vec<Relationship> {
    let mut relationships = Vec::new();

    for table in &schema.tables {
        for col in &table.columns {
            if let Some(target) = guess_target(&table.name, &col.name, in_scope, strategy) {
                relationships.push(Relationship {
                    from_table: table.name.clone(),
                    from_column: col.name.clone(),
                    to_table: target,
                    to_column: DEFAULT_TARGET_COLUMN.to_string(),
                    origin: Origin::Guessed,
                });
            }
        }
    }

    relationships
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope<'a>(tables: &[&'a str]) -> AHashSet<&'a str> {
        tables.iter().copied().collect()
    }

    #[test]
    fn test_id_column_stem() {
        assert_eq!(id_column_stem("author_id"), Some("author"));
        assert_eq!(id_column_stem("order_item_id"), Some("order_item"));
        assert_eq!(id_column_stem("a_id_id"), Some("a_id"));
        assert_eq!(id_column_stem("_id"), None);
        assert_eq!(id_column_stem("id"), None);
        assert_eq!(id_column_stem("author_ID"), None);
        assert_eq!(id_column_stem("authorid"), None);
        assert_eq!(id_column_stem("author_idx"), None);
    }

    #[test]
    fn test_candidates_priority() {
        assert_eq!(
            GuessStrategy::Simple.candidates("status"),
            vec!["status", "statuss", "statu"]
        );
        assert_eq!(
            GuessStrategy::Simple.candidates("address"),
            vec!["address", "addresss", "addre"]
        );
    }

    #[test]
    fn test_exact_stem_wins() {
        let tables = scope(&["posts", "category", "categorys"]);
        assert_eq!(
            guess_target("posts", "category_id", &tables, GuessStrategy::Simple),
            Some("category".to_string())
        );
    }

    #[test]
    fn test_plural_candidate() {
        let tables = scope(&["books", "authors"]);
        assert_eq!(
            guess_target("books", "author_id", &tables, GuessStrategy::Simple),
            Some("authors".to_string())
        );
    }

    #[test]
    fn test_singular_candidate() {
        let tables = scope(&["orders", "user"]);
        assert_eq!(
            guess_target("orders", "users_id", &tables, GuessStrategy::Simple),
            Some("user".to_string())
        );
    }

    #[test]
    fn test_no_self_reference() {
        let tables = scope(&["nodes", "node"]);
        // "nodes" is the source table, so the stripped-s candidate is next
        assert_eq!(
            guess_target("nodes", "nodes_id", &tables, GuessStrategy::Simple),
            Some("node".to_string())
        );

        let tables = scope(&["categories"]);
        assert_eq!(
            guess_target("categories", "categories_id", &tables, GuessStrategy::Simple),
            None
        );
    }

    #[test]
    fn test_no_candidate_in_scope() {
        let tables = scope(&["posts", "categories"]);
        assert_eq!(
            guess_target("posts", "category_id", &tables, GuessStrategy::Simple),
            None
        );
    }

    #[test]
    fn test_inflected_candidates_extend_simple() {
        let tables = scope(&["posts", "categories"]);
        assert_eq!(
            guess_target("posts", "category_id", &tables, GuessStrategy::Inflected),
            Some("categories".to_string())
        );

        let tables = scope(&["orders", "people"]);
        assert_eq!(
            guess_target("orders", "person_id", &tables, GuessStrategy::Inflected),
            Some("people".to_string())
        );
    }

    #[test]
    fn test_inflected_irregular_keeps_case() {
        let tables = scope(&["Orders", "People"]);
        assert_eq!(
            guess_target("Orders", "Person_id", &tables, GuessStrategy::Inflected),
            Some("People".to_string())
        );
    }

    #[test]
    fn test_inflected_keeps_simple_priority() {
        let tables = scope(&["posts", "category", "categories"]);
        assert_eq!(
            guess_target("posts", "category_id", &tables, GuessStrategy::Inflected),
            Some("category".to_string())
        );
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("simple".parse::<GuessStrategy>(), Ok(GuessStrategy::Simple));
        assert_eq!(
            "Inflected".parse::<GuessStrategy>(),
            Ok(GuessStrategy::Inflected)
        );
        assert!("fuzzy".parse::<GuessStrategy>().is_err());
    }
}

//! Mermaid erDiagram format output.

use crate::graph::view::{Cardinality, ErdView};

/// Generate the Mermaid erDiagram lines for a view.
///
/// Order: root marker, one entity block per table, then one line per
/// relationship with the parent on the left.
pub fn mermaid_lines(view: &ErdView) -> Vec<String> {
    let mut lines = Vec::with_capacity(1 + view.column_count() + 2 * view.table_count());

    lines.push("erDiagram".to_string());

    for table in &view.tables {
        lines.push(format!("  {} {{", escape_mermaid_id(&table.name)));

        for col in &table.columns {
            let tag = if col.is_primary_key { " PK" } else { "" };
            lines.push(format!(
                "    {}{} {}",
                escape_mermaid_type(&col.declared_type),
                tag,
                escape_mermaid_id(&col.name)
            ));
        }

        lines.push("  }".to_string());
    }

    for rel in &view.relationships {
        lines.push(format!(
            "  {} {} {} : {} \"{}\"",
            escape_mermaid_id(&rel.to_table),
            Cardinality::OneToMany.as_mermaid(),
            escape_mermaid_id(&rel.from_table),
            rel.origin.label(),
            rel.description().replace('"', "'")
        ));
    }

    lines
}

/// Generate Mermaid erDiagram text from a view
pub fn to_mermaid(view: &ErdView) -> String {
    let mut output = mermaid_lines(view).join("\n");
    output.push('\n');
    output
}

/// Escape a string for use as a Mermaid entity ID
fn escape_mermaid_id(s: &str) -> String {
    // Mermaid IDs should be alphanumeric with underscores
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Escape a declared type for Mermaid (no spaces or commas)
fn escape_mermaid_type(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '(' | ')' | '[' | ']') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::{Origin, Relationship};
    use crate::schema::{Column, Table};

    fn column(name: &str, col_type: &str, pk: bool) -> Column {
        Column {
            name: name.to_string(),
            declared_type: col_type.to_string(),
            is_primary_key: pk,
        }
    }

    fn create_test_view() -> ErdView {
        let mut authors = Table::new("authors");
        authors.columns = vec![
            column("id", "INTEGER", true),
            column("name", "TEXT", false),
        ];

        let mut books = Table::new("books");
        books.columns = vec![
            column("id", "INTEGER", true),
            column("title", "VARCHAR(200)", false),
            column("author_id", "INTEGER", false),
        ];

        ErdView {
            tables: vec![authors, books],
            relationships: vec![Relationship {
                from_table: "books".to_string(),
                from_column: "author_id".to_string(),
                to_table: "authors".to_string(),
                to_column: "id".to_string(),
                origin: Origin::Guessed,
            }],
        }
    }

    #[test]
    fn test_mermaid_lines() {
        let lines = mermaid_lines(&create_test_view());

        assert_eq!(
            lines,
            vec![
                "erDiagram",
                "  authors {",
                "    INTEGER PK id",
                "    TEXT name",
                "  }",
                "  books {",
                "    INTEGER PK id",
                "    VARCHAR(200) title",
                "    INTEGER author_id",
                "  }",
                "  authors ||--o{ books : guessed \"books.author_id→authors.id\"",
            ]
        );
    }

    #[test]
    fn test_declared_label() {
        let mut view = create_test_view();
        view.relationships[0].origin = Origin::Declared;

        let output = to_mermaid(&view);
        assert!(output.contains("authors ||--o{ books : FK \"books.author_id→authors.id\""));
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_empty_view() {
        let lines = mermaid_lines(&ErdView::default());
        assert_eq!(lines, vec!["erDiagram"]);
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_mermaid_id("order items"), "order_items");
        assert_eq!(escape_mermaid_id("user-roles"), "user_roles");
        assert_eq!(escape_mermaid_type("UNSIGNED BIG INT"), "UNSIGNED_BIG_INT");
        assert_eq!(escape_mermaid_type("DECIMAL(10,2)"), "DECIMAL(10_2)");
    }
}

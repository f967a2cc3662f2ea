//! Graphviz DOT format output for ERD diagrams.

use crate::graph::format::Layout;
use crate::graph::view::ErdView;
use crate::relations::Origin;
use crate::schema::Table;

/// Generate DOT format output with ERD-style tables showing all columns
pub fn to_dot(view: &ErdView, layout: Layout) -> String {
    let mut output = String::new();

    output.push_str("digraph ERD {\n");
    output.push_str("  graph [pad=\"0.5\", nodesep=\"1\", ranksep=\"1.5\"];\n");

    let rankdir = match layout {
        Layout::LR => "LR",
        Layout::TB => "TB",
    };
    output.push_str(&format!("  rankdir={};\n", rankdir));

    output.push_str("  node [shape=none, margin=0];\n");
    output.push_str("  edge [arrowhead=crow, arrowtail=none, dir=both];\n\n");

    for table in &view.tables {
        output.push_str(&format!(
            "  {} [label=<{}>];\n",
            escape_dot_id(&table.name),
            generate_table_label(table)
        ));
    }

    if !view.relationships.is_empty() {
        output.push('\n');
    }

    // Child column points at the parent column; guessed edges are dashed
    for rel in &view.relationships {
        let style = match rel.origin {
            Origin::Declared => "solid",
            Origin::Guessed => "dashed",
        };
        output.push_str(&format!(
            "  {}:{} -> {}:{} [label=\"{}\", style={}];\n",
            escape_dot_id(&rel.from_table),
            escape_dot_id(&rel.from_column),
            escape_dot_id(&rel.to_table),
            escape_dot_id(&rel.to_column),
            rel.origin.label(),
            style
        ));
    }

    output.push_str("}\n");
    output
}

/// Generate HTML-like table label for DOT
fn generate_table_label(table: &Table) -> String {
    let mut html = String::new();

    html.push_str("<TABLE BORDER=\"0\" CELLBORDER=\"1\" CELLSPACING=\"0\" CELLPADDING=\"4\">");
    html.push_str(&format!(
        "<TR><TD BGCOLOR=\"#4a5568\" COLSPAN=\"2\"><FONT COLOR=\"white\"><B>{}</B></FONT></TD></TR>",
        escape_html(&table.name)
    ));

    for col in &table.columns {
        let name = if col.is_primary_key {
            format!("<B>{}</B> PK", escape_html(&col.name))
        } else {
            escape_html(&col.name)
        };

        html.push_str("<TR>");
        html.push_str(&format!(
            "<TD ALIGN=\"LEFT\" PORT=\"{}\">{}</TD>",
            escape_html(&col.name),
            name
        ));
        html.push_str(&format!(
            "<TD ALIGN=\"LEFT\"><FONT COLOR=\"#666666\">{}</FONT></TD>",
            escape_html(&col.declared_type)
        ));
        html.push_str("</TR>");
    }

    html.push_str("</TABLE>");
    html
}

/// Escape a string for use in DOT HTML labels
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Escape a string for use as a DOT node ID
fn escape_dot_id(s: &str) -> String {
    if s.chars().all(|c| c.is_alphanumeric() || c == '_') && !s.is_empty() {
        s.to_string()
    } else {
        format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

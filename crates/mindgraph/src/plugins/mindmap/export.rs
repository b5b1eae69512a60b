//! Mermaid flowchart export
//!
//! Renders a document as `graph TD` text so it can be pasted into any
//! Mermaid-aware renderer. Export only: the result is not read back.

use std::fmt::Write;

use crate::core::{Database, NodeShape};

use super::document::DiagramDocument;

/// Mermaid node delimiters for a shape
fn shape_delimiters(shape: NodeShape) -> (&'static str, &'static str) {
    match shape {
        NodeShape::Rounded => ("(", ")"),
        NodeShape::Rectangle => ("[", "]"),
        NodeShape::Pill => ("([", "])"),
        NodeShape::Diamond => ("{", "}"),
        NodeShape::Hexagon => ("{{", "}}"),
    }
}

/// Escape text for use inside a quoted Mermaid label
fn escape_label(text: &str) -> String {
    text.replace('"', "#quot;").replace('\n', "<br/>")
}

/// Mermaid identifiers are restricted; anything else becomes `_`
fn mermaid_id(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Render `document` as a Mermaid flowchart
///
/// # Example
/// ```
/// use mindgraph::prelude::*;
/// use mindgraph::plugins::mindmap::to_mermaid;
///
/// let mut doc = DiagramDocument::new();
/// let root = doc.graph_mut().add_node(NodeAttributes::new().label("Root")).unwrap();
/// let child = doc.graph_mut().add_node(NodeAttributes::new().label("Child")).unwrap();
/// doc.graph_mut().add_edge(root.as_str(), child.as_str(), Some("has")).unwrap();
///
/// let text = to_mermaid(&doc);
/// assert!(text.starts_with("graph TD"));
/// assert!(text.contains("n1 -->|has| n2"));
/// ```
pub fn to_mermaid(document: &DiagramDocument) -> String {
    let mut out = String::from("graph TD\n");
    let palette = document.palette();

    for styled in document.styled_nodes() {
        let (open, close) = shape_delimiters(styled.node.data.shape);
        let _ = writeln!(
            out,
            "    {}{}\"{}\"{}",
            mermaid_id(styled.node.id.as_str()),
            open,
            escape_label(&styled.node.data.label),
            close
        );
    }

    for edge in document.graph().edges() {
        let source = mermaid_id(edge.source.as_str());
        let target = mermaid_id(edge.target.as_str());
        let _ = match &edge.label {
            Some(label) if !label.is_empty() => writeln!(
                out,
                "    {} -->|{}| {}",
                source,
                escape_label(label).replace('|', "#124;"),
                target
            ),
            _ => writeln!(out, "    {} --> {}", source, target),
        };
    }

    for styled in document.styled_nodes() {
        let _ = writeln!(
            out,
            "    style {} fill:{},color:{}",
            mermaid_id(styled.node.id.as_str()),
            styled.effective_color,
            palette.text
        );
    }

    if document.graph().edge_count() > 0 {
        let _ = writeln!(out, "    linkStyle default stroke:{}", palette.edge);
    }

    out
}

//! JSON persistence format for diagram documents
//!
//! The document is an object with exactly three fields:
//!
//! ```json
//! {
//!   "nodes": [{ "id": "n1", "position": { "x": 0.0, "y": 0.0 },
//!               "data": { "label": "Root", "description": "",
//!                         "fontSize": "medium", "shape": "rounded" } }],
//!   "edges": [{ "id": "e1", "source": "n1", "target": "n2", "label": "relates to" }],
//!   "theme": "default"
//! }
//! ```
//!
//! Omission convention: `data.color` is written only for explicit
//! overrides and an edge `label` only when present. On load, a missing
//! `position`, `data`, or `data` field takes its default value.
//!
//! Loading never trusts the input: the theme, id uniqueness, colors and
//! every edge endpoint are re-validated.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, span, warn, Level};

use crate::core::{
    validate_color, Database, DiagramError, Edge, EdgePolicy, Node, Result, Theme,
};

use super::database::MindMapDatabase;
use super::document::DiagramDocument;

#[derive(Serialize)]
struct DocumentView<'a> {
    nodes: Vec<&'a Node>,
    edges: Vec<&'a Edge>,
    theme: &'static str,
}

impl<'a> DocumentView<'a> {
    fn of(document: &'a DiagramDocument) -> Self {
        Self {
            nodes: document.graph().nodes().collect(),
            edges: document.graph().edges().collect(),
            theme: document.theme().as_str(),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentRecord {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    theme: String,
}

/// Serialize a document to compact JSON
pub fn serialize(document: &DiagramDocument) -> Result<String> {
    let serialize_span = span!(Level::INFO, "serialize_document");
    let _enter = serialize_span.enter();

    let json = serde_json::to_string(&DocumentView::of(document))
        .map_err(|e| DiagramError::malformed(e.to_string()))?;
    debug!(bytes = json.len(), "Document serialized");
    Ok(json)
}

/// Serialize a document to indented JSON
pub fn serialize_pretty(document: &DiagramDocument) -> Result<String> {
    let serialize_span = span!(Level::INFO, "serialize_document", pretty = true);
    let _enter = serialize_span.enter();

    let json = serde_json::to_string_pretty(&DocumentView::of(document))
        .map_err(|e| DiagramError::malformed(e.to_string()))?;
    debug!(bytes = json.len(), "Document serialized");
    Ok(json)
}

/// Parse and validate a JSON document
///
/// # Errors
///
/// * `MalformedDocument` - not JSON, wrong schema, duplicate ids, bad colors
/// * `UnknownTheme` - `theme` outside the fixed enumeration
/// * `DanglingEdge` - an edge endpoint missing from `nodes`
pub fn deserialize(input: &str) -> Result<DiagramDocument> {
    deserialize_with_policy(input, EdgePolicy::default())
}

/// Parse and validate a JSON document from raw bytes
pub fn deserialize_slice(input: &[u8]) -> Result<DiagramDocument> {
    let text = std::str::from_utf8(input)
        .map_err(|e| DiagramError::malformed(format!("input is not UTF-8: {}", e)))?;
    deserialize(text)
}

/// Parse and validate a JSON document into a store with `policy`
///
/// Every loaded edge is checked against the policy, so a self-loop under
/// `RejectSelfLoops` fails with `InvalidEdge`.
pub fn deserialize_with_policy(input: &str, policy: EdgePolicy) -> Result<DiagramDocument> {
    let deserialize_span = span!(Level::INFO, "deserialize_document", input_len = input.len());
    let _enter = deserialize_span.enter();

    let record: DocumentRecord = serde_json::from_str(input).map_err(|e| {
        warn!(error = %e, "Document does not match schema");
        DiagramError::malformed(e.to_string())
    })?;

    let theme = record.theme.parse::<Theme>().map_err(|e| {
        warn!(theme = %record.theme, "Document has unknown theme");
        e
    })?;

    let mut graph = MindMapDatabase::with_policy(policy);
    for node in record.nodes {
        if let Some(color) = &node.data.color {
            validate_color(color).map_err(|e| {
                DiagramError::malformed(format!("node {}: {}", node.id, e))
            })?;
        }
        graph.insert_node(node)?;
    }
    for edge in record.edges {
        graph.insert_edge(edge).map_err(|e| {
            warn!(error = %e, "Rejected edge while loading document");
            e
        })?;
    }

    info!(
        node_count = graph.node_count(),
        edge_count = graph.edge_count(),
        theme = %theme,
        "Document loaded"
    );
    Ok(DiagramDocument::from_parts(graph, theme))
}

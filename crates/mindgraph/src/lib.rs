//! Mindgraph - Mind-map diagrams as typed, validated graphs
//!
//! A library for creating, editing, theming and persisting mind maps: idea
//! nodes connected by labeled edges, styled by one of a fixed set of themes.
//!
//! # Quick Start
//!
//! ```rust
//! use mindgraph::prelude::*;
//!
//! let mut doc = DiagramDocument::new();
//! let root = doc.graph_mut().add_node(NodeAttributes::new().label("Root")).unwrap();
//! let child = doc.graph_mut().add_node(NodeAttributes::new().label("Child")).unwrap();
//! doc.graph_mut().add_edge(root.as_str(), child.as_str(), Some("relates to")).unwrap();
//!
//! doc.set_theme("ocean").unwrap();
//! assert_eq!(doc.effective_color(root.as_str()).unwrap(), Theme::Ocean.palette().root);
//!
//! // Removing a node removes the edges touching it
//! doc.graph_mut().remove_node(root.as_str()).unwrap();
//! assert_eq!(doc.graph().edge_count(), 0);
//! ```
//!
//! # Persistence
//!
//! ```rust
//! use mindgraph::{load, save};
//!
//! let json = r#"{"nodes":[{"id":"n1","data":{"label":"Idea"}}],"edges":[],"theme":"forest"}"#;
//! let doc = load(json).unwrap();
//! assert_eq!(load(&save(&doc).unwrap()).unwrap(), doc);
//! ```

pub mod core;
pub mod plugins;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Database, DiagramError, Edge, EdgeId, EdgePolicy, FontSize, Node, NodeAttributes,
        NodeData, NodeId, NodeShape, Position, Snapshot, StylePalette, Theme,
    };
    pub use crate::plugins::dispatcher::{
        DiagramSession, Dispatcher, DocumentStore, ToolCategory, ToolMetadata,
        ToolMetadataSource, ToolView,
    };
    pub use crate::plugins::mindmap::{DiagramDocument, MindMapDatabase, StyledNode, Template};
}

/// Create an empty document with the default theme
pub fn new_document() -> plugins::mindmap::DiagramDocument {
    plugins::mindmap::DiagramDocument::new()
}

/// Parse and validate a JSON document
///
/// Fails with `MalformedDocument`, `UnknownTheme` or `DanglingEdge`.
pub fn load(input: &str) -> Result<plugins::mindmap::DiagramDocument> {
    plugins::mindmap::deserialize(input)
}

/// Serialize a document to indented JSON
pub fn save(document: &plugins::mindmap::DiagramDocument) -> Result<String> {
    plugins::mindmap::serialize_pretty(document)
}

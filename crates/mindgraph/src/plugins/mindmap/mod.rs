//! Mind-map diagram engine
//!
//! This module contains the components for editing and persisting mind maps:
//! - Database: the Graph Store holding nodes and edges
//! - Document: graph plus theme, the unit of persistence
//! - Serialize: the JSON persistence boundary
//! - Export: Mermaid flowchart output
//! - Template: starter content for new documents

pub mod database;
pub mod document;
pub mod export;
pub mod serialize;
pub mod template;

pub use database::MindMapDatabase;
pub use document::{DiagramDocument, StyledNode};
pub use export::to_mermaid;
pub use serialize::{
    deserialize, deserialize_slice, deserialize_with_policy, serialize, serialize_pretty,
};
pub use template::Template;

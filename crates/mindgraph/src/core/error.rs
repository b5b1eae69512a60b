//! Core error types for mind-map editing
//!
//! Every Graph Store, theme and serialization operation reports one of these
//! kinds and leaves the document untouched when it does.

use thiserror::Error;

/// Result alias used throughout the core
pub type Result<T, E = DiagramError> = std::result::Result<T, E>;

/// Core error types for diagram editing and persistence
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagramError {
    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    #[error("Edge not found: {id}")]
    EdgeNotFound { id: String },

    #[error("Invalid attribute: {field} = {value:?} ({reason})")]
    InvalidAttribute {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid edge: {message}")]
    InvalidEdge { message: String },

    #[error("Unknown theme: {name}")]
    UnknownTheme { name: String },

    #[error("Malformed document: {message}")]
    MalformedDocument { message: String },

    #[error("Dangling edge: {edge_id} references missing node {node_id}")]
    DanglingEdge { edge_id: String, node_id: String },
}

impl DiagramError {
    /// Create a new node-not-found error
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    /// Create a new edge-not-found error
    pub fn edge_not_found(id: impl Into<String>) -> Self {
        Self::EdgeNotFound { id: id.into() }
    }

    /// Create a new invalid attribute error
    pub fn invalid_attribute(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid edge error
    pub fn invalid_edge(message: impl Into<String>) -> Self {
        Self::InvalidEdge {
            message: message.into(),
        }
    }

    /// Create a new unknown theme error
    pub fn unknown_theme(name: impl Into<String>) -> Self {
        Self::UnknownTheme { name: name.into() }
    }

    /// Create a new malformed document error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            message: message.into(),
        }
    }

    /// Create a new dangling edge error
    pub fn dangling_edge(edge_id: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self::DanglingEdge {
            edge_id: edge_id.into(),
            node_id: node_id.into(),
        }
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NodeNotFound { .. } => "NodeNotFound",
            Self::EdgeNotFound { .. } => "EdgeNotFound",
            Self::InvalidAttribute { .. } => "InvalidAttribute",
            Self::InvalidEdge { .. } => "InvalidEdge",
            Self::UnknownTheme { .. } => "UnknownTheme",
            Self::MalformedDocument { .. } => "MalformedDocument",
            Self::DanglingEdge { .. } => "DanglingEdge",
        }
    }
}

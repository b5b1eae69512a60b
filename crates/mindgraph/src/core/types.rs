//! Core type definitions for mind-map diagrams
//!
//! This module contains the fundamental types used throughout Mindgraph:
//! identifiers, node shapes and font sizes, and the node/edge records that
//! make up a diagram document.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use super::error::{DiagramError, Result};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing identifier string
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id! {
    /// Opaque node identifier, stable for the node's lifetime
    NodeId
}

string_id! {
    /// Opaque edge identifier
    EdgeId
}

/// 2D coordinate of a node on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both components are finite real numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Label size of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub const ALL: [FontSize; 3] = [FontSize::Small, FontSize::Medium, FontSize::Large];
}

impl FromStr for FontSize {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "small" => Ok(FontSize::Small),
            "medium" => Ok(FontSize::Medium),
            "large" => Ok(FontSize::Large),
            _ => Err(DiagramError::invalid_attribute(
                "fontSize",
                s,
                "expected one of small, medium, large",
            )),
        }
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontSize::Small => write!(f, "small"),
            FontSize::Medium => write!(f, "medium"),
            FontSize::Large => write!(f, "large"),
        }
    }
}

/// Visual shape of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeShape {
    /// Rectangle with rounded corners
    #[default]
    Rounded,
    /// Plain rectangle
    Rectangle,
    /// Stadium / capsule
    Pill,
    /// Decision diamond
    Diamond,
    /// Hexagon
    Hexagon,
}

impl NodeShape {
    pub const ALL: [NodeShape; 5] = [
        NodeShape::Rounded,
        NodeShape::Rectangle,
        NodeShape::Pill,
        NodeShape::Diamond,
        NodeShape::Hexagon,
    ];
}

impl FromStr for NodeShape {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rounded" => Ok(NodeShape::Rounded),
            "rectangle" => Ok(NodeShape::Rectangle),
            "pill" => Ok(NodeShape::Pill),
            "diamond" => Ok(NodeShape::Diamond),
            "hexagon" => Ok(NodeShape::Hexagon),
            _ => Err(DiagramError::invalid_attribute(
                "shape",
                s,
                "expected one of rounded, rectangle, pill, diamond, hexagon",
            )),
        }
    }
}

impl fmt::Display for NodeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeShape::Rounded => write!(f, "rounded"),
            NodeShape::Rectangle => write!(f, "rectangle"),
            NodeShape::Pill => write!(f, "pill"),
            NodeShape::Diamond => write!(f, "diamond"),
            NodeShape::Hexagon => write!(f, "hexagon"),
        }
    }
}

/// Returns true if `token` is a hex color: `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`
pub fn is_color_token(token: &str) -> bool {
    match token.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Validate an explicit color override
pub fn validate_color(token: &str) -> Result<()> {
    if is_color_token(token) {
        Ok(())
    } else {
        Err(DiagramError::invalid_attribute(
            "color",
            token,
            "expected a hex color such as #1e40af",
        ))
    }
}

/// Domain attributes carried by a node
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeData {
    /// Short display text
    pub label: String,
    /// Longer free text
    pub description: String,
    /// Explicit color override; `None` means theme-derived
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub font_size: FontSize,
    pub shape: NodeShape,
}

/// A labeled idea unit in the diagram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: NodeData,
}

impl Node {
    /// Create a node with default attributes at the origin
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position: Position::default(),
            data: NodeData {
                label: label.into(),
                ..NodeData::default()
            },
        }
    }

    /// Returns true if the node carries an explicit color override
    pub fn has_explicit_color(&self) -> bool {
        self.data.color.is_some()
    }
}

/// A connection between two nodes, stored as source → target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Edge {
    /// Returns true if the edge touches `node` at either end
    pub fn touches(&self, node: &str) -> bool {
        self.source == node || self.target == node
    }

    /// Returns true if source and target are the same node
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// The endpoint opposite `node`, if the edge touches it
    pub fn other_end(&self, node: &str) -> Option<&NodeId> {
        if self.source == node {
            Some(&self.target)
        } else if self.target == node {
            Some(&self.source)
        } else {
            None
        }
    }
}

/// Attributes supplied when adding a node, or merged when updating one
///
/// Every field is optional. On add, omitted fields take their defaults; on
/// update, omitted fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeAttributes {
    pub position: Option<Position>,
    pub label: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` clears an explicit color
    pub color: Option<Option<String>>,
    pub font_size: Option<FontSize>,
    pub shape: Option<NodeShape>,
}

impl NodeAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(Some(color.into()));
        self
    }

    pub fn clear_color(mut self) -> Self {
        self.color = Some(None);
        self
    }

    pub fn font_size(mut self, font_size: FontSize) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn shape(mut self, shape: NodeShape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Check every supplied value without applying anything
    pub fn validate(&self) -> Result<()> {
        if let Some(position) = &self.position {
            if !position.is_finite() {
                return Err(DiagramError::invalid_attribute(
                    "position",
                    format!("({}, {})", position.x, position.y),
                    "coordinates must be finite",
                ));
            }
        }
        if let Some(Some(color)) = &self.color {
            validate_color(color)?;
        }
        Ok(())
    }

    /// Merge the supplied fields into `node`
    ///
    /// Callers validate first; merging itself cannot fail.
    pub(crate) fn apply_to(&self, node: &mut Node) {
        if let Some(position) = self.position {
            node.position = position;
        }
        if let Some(label) = &self.label {
            node.data.label = label.clone();
        }
        if let Some(description) = &self.description {
            node.data.description = description.clone();
        }
        if let Some(color) = &self.color {
            node.data.color = color.clone();
        }
        if let Some(font_size) = self.font_size {
            node.data.font_size = font_size;
        }
        if let Some(shape) = self.shape {
            node.data.shape = shape;
        }
    }

    /// Returns true if no field is supplied
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Whether an edge may connect a node to itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum EdgePolicy {
    /// Self-loops are stored like any other edge
    #[default]
    AllowSelfLoops,
    /// Self-loops fail with `InvalidEdge`
    RejectSelfLoops,
}

impl EdgePolicy {
    /// Check a prospective edge against this policy
    pub fn check(&self, edge_id: &str, source: &str, target: &str) -> Result<()> {
        match self {
            EdgePolicy::RejectSelfLoops if source == target => Err(DiagramError::invalid_edge(
                format!("{} connects node {} to itself", edge_id, source),
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size_parsing() {
        assert_eq!("small".parse::<FontSize>().unwrap(), FontSize::Small);
        assert_eq!("medium".parse::<FontSize>().unwrap(), FontSize::Medium);
        assert_eq!("large".parse::<FontSize>().unwrap(), FontSize::Large);

        let err = "huge".parse::<FontSize>().unwrap_err();
        assert_eq!(err.kind(), "InvalidAttribute");
    }

    #[test]
    fn test_node_shape_parsing() {
        for shape in NodeShape::ALL {
            assert_eq!(shape.to_string().parse::<NodeShape>().unwrap(), shape);
        }
        assert!("circle".parse::<NodeShape>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(FontSize::default(), FontSize::Medium);
        assert_eq!(NodeShape::default(), NodeShape::Rounded);

        let node = Node::new("n1", "Root");
        assert_eq!(node.position, Position::new(0.0, 0.0));
        assert_eq!(node.data.description, "");
        assert!(!node.has_explicit_color());
    }

    #[test]
    fn test_color_tokens() {
        assert!(is_color_token("#fff"));
        assert!(is_color_token("#ffff"));
        assert!(is_color_token("#1e40af"));
        assert!(is_color_token("#1e40af80"));
        assert!(!is_color_token("1e40af"));
        assert!(!is_color_token("#12345"));
        assert!(!is_color_token("#ggg"));
        assert!(!is_color_token("blue"));
    }

    #[test]
    fn test_attributes_validation() {
        assert!(NodeAttributes::new().label("ok").validate().is_ok());
        assert!(NodeAttributes::new().position(f64::NAN, 0.0).validate().is_err());
        assert!(NodeAttributes::new().position(0.0, f64::INFINITY).validate().is_err());
        assert!(NodeAttributes::new().color("red").validate().is_err());
        assert!(NodeAttributes::new().clear_color().validate().is_ok());
    }

    #[test]
    fn test_attributes_merge() {
        let mut node = Node::new("n1", "Before");
        node.data.color = Some("#000".to_string());

        NodeAttributes::new()
            .label("After")
            .shape(NodeShape::Hexagon)
            .apply_to(&mut node);
        assert_eq!(node.data.label, "After");
        assert_eq!(node.data.shape, NodeShape::Hexagon);
        assert_eq!(node.data.color.as_deref(), Some("#000"));

        NodeAttributes::new().clear_color().apply_to(&mut node);
        assert!(node.data.color.is_none());
    }

    #[test]
    fn test_edge_helpers() {
        let edge = Edge {
            id: EdgeId::new("e1"),
            source: NodeId::new("n1"),
            target: NodeId::new("n2"),
            label: None,
        };
        assert!(edge.touches("n1"));
        assert!(edge.touches("n2"));
        assert!(!edge.touches("n3"));
        assert!(!edge.is_self_loop());
        assert_eq!(edge.other_end("n1").map(NodeId::as_str), Some("n2"));
        assert_eq!(edge.other_end("n3"), None);
    }

    #[test]
    fn test_edge_policy() {
        assert!(EdgePolicy::AllowSelfLoops.check("e1", "n1", "n1").is_ok());
        let err = EdgePolicy::RejectSelfLoops
            .check("e1", "n1", "n1")
            .unwrap_err();
        assert_eq!(err.kind(), "InvalidEdge");
        assert!(EdgePolicy::RejectSelfLoops.check("e1", "n1", "n2").is_ok());
    }

    #[test]
    fn test_node_data_wire_names() {
        let data = NodeData {
            font_size: FontSize::Large,
            shape: NodeShape::Pill,
            ..NodeData::default()
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["fontSize"], "large");
        assert_eq!(json["shape"], "pill");
        assert!(json.get("color").is_none());
    }
}

//! Diagram document: the graph plus its theme
//!
//! A document is the unit of persistence. Node colors that are not set
//! explicitly are derived from the active theme on every read, so a theme
//! change restyles exactly the nodes without an override.

use std::collections::HashMap;
use tracing::{debug, info};

use crate::core::{
    Database, DiagramError, Edge, EdgeId, Node, NodeId, Result, StylePalette, Theme,
};

use super::database::MindMapDatabase;
use super::template::Template;

/// A node together with the color it renders with
#[derive(Debug, Clone, PartialEq)]
pub struct StyledNode {
    pub node: Node,
    /// Explicit color if set, otherwise the theme color for the node's position
    pub effective_color: String,
    /// True when `effective_color` comes from the node's own override
    pub explicit: bool,
}

/// Nodes, edges and theme of one mind map
#[derive(Debug, Clone, Default)]
pub struct DiagramDocument {
    graph: MindMapDatabase,
    theme: Theme,
}

impl DiagramDocument {
    /// Create an empty document with the default theme
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with a specific theme
    pub fn with_theme(theme: Theme) -> Self {
        Self {
            graph: MindMapDatabase::new(),
            theme,
        }
    }

    /// Create a document pre-populated from a template
    pub fn from_template(template: Template, theme: Theme) -> Result<Self> {
        let graph = template.build()?;
        debug!(
            template = %template,
            node_count = graph.node_count(),
            "Document created from template"
        );
        Ok(Self { graph, theme })
    }

    pub(crate) fn from_parts(graph: MindMapDatabase, theme: Theme) -> Self {
        Self { graph, theme }
    }

    /// Read access to the graph
    pub fn graph(&self) -> &MindMapDatabase {
        &self.graph
    }

    /// Mutable access to the graph; every Graph Store operation keeps the
    /// document's invariants on its own
    pub fn graph_mut(&mut self) -> &mut MindMapDatabase {
        &mut self.graph
    }

    /// Current theme
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Palette of the current theme
    pub fn palette(&self) -> &'static StylePalette {
        self.theme.palette()
    }

    /// Switch to the theme named `name`
    ///
    /// Fails with `UnknownTheme` without touching the document. Nodes with
    /// an explicit color keep it; all others take the new palette's colors.
    pub fn set_theme(&mut self, name: &str) -> Result<()> {
        let theme = match name.parse::<Theme>() {
            Ok(theme) => theme,
            Err(err) => {
                debug!(theme = %name, current = %self.theme, "Rejected theme change");
                return Err(err);
            }
        };
        self.apply_theme(theme);
        Ok(())
    }

    /// Switch to an already-validated theme
    pub fn apply_theme(&mut self, theme: Theme) {
        let restyled = self
            .graph
            .nodes()
            .filter(|n| !n.has_explicit_color())
            .count();
        info!(from = %self.theme, to = %theme, restyled, "Theme changed");
        self.theme = theme;
    }

    /// Color a node renders with under the current theme
    pub fn effective_color(&self, id: &str) -> Result<String> {
        let node = self
            .graph
            .get_node(id)
            .ok_or_else(|| DiagramError::node_not_found(id))?;
        let index = self.graph.index_of(id).unwrap_or(0);
        Ok(self.color_for(node, index))
    }

    fn color_for(&self, node: &Node, index: usize) -> String {
        match &node.data.color {
            Some(color) => color.clone(),
            None => self.palette().node_color(index).to_string(),
        }
    }

    /// Every node with its effective color, in document order
    pub fn styled_nodes(&self) -> Vec<StyledNode> {
        self.graph
            .nodes()
            .enumerate()
            .map(|(index, node)| StyledNode {
                node: node.clone(),
                effective_color: self.color_for(node, index),
                explicit: node.has_explicit_color(),
            })
            .collect()
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> Result<String> {
        super::serialize::serialize(self)
    }

    /// Serialize to indented JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        super::serialize::serialize_pretty(self)
    }

    /// Parse and validate a JSON document
    pub fn from_json(input: &str) -> Result<Self> {
        super::serialize::deserialize(input)
    }
}

/// Equality ignores node/edge order and id allocator state
impl PartialEq for DiagramDocument {
    fn eq(&self, other: &Self) -> bool {
        if self.theme != other.theme
            || self.graph.node_count() != other.graph.node_count()
            || self.graph.edge_count() != other.graph.edge_count()
        {
            return false;
        }

        let nodes: HashMap<&NodeId, &Node> = self.graph.nodes().map(|n| (&n.id, n)).collect();
        let edges: HashMap<&EdgeId, &Edge> = self.graph.edges().map(|e| (&e.id, e)).collect();

        other.graph.nodes().all(|n| nodes.get(&n.id) == Some(&n))
            && other.graph.edges().all(|e| edges.get(&e.id) == Some(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NodeAttributes;

    #[test]
    fn test_new_document_is_empty() {
        let doc = DiagramDocument::new();
        assert_eq!(doc.theme(), Theme::Default);
        assert_eq!(doc.graph().node_count(), 0);
        assert_eq!(doc.graph().edge_count(), 0);
    }

    #[test]
    fn test_theme_change_restyles_nodes_without_override() {
        let mut doc = DiagramDocument::new();
        let plain = doc
            .graph_mut()
            .add_node(NodeAttributes::new().label("Plain"))
            .unwrap();
        let pinned = doc
            .graph_mut()
            .add_node(NodeAttributes::new().label("Pinned").color("#123456"))
            .unwrap();

        doc.set_theme("ocean").unwrap();
        assert_eq!(doc.theme(), Theme::Ocean);
        assert_eq!(
            doc.effective_color(plain.as_str()).unwrap(),
            Theme::Ocean.palette().root
        );
        assert_eq!(doc.effective_color(pinned.as_str()).unwrap(), "#123456");

        doc.set_theme("forest").unwrap();
        assert_eq!(
            doc.effective_color(plain.as_str()).unwrap(),
            Theme::Forest.palette().root
        );
        assert_eq!(doc.effective_color(pinned.as_str()).unwrap(), "#123456");
    }

    #[test]
    fn test_unknown_theme_leaves_document_unchanged() {
        let mut doc = DiagramDocument::with_theme(Theme::Ocean);
        doc.graph_mut()
            .add_node(NodeAttributes::new().label("A"))
            .unwrap();
        let before = doc.clone();

        let err = doc.set_theme("nonexistent").unwrap_err();
        assert_eq!(err, DiagramError::unknown_theme("nonexistent"));
        assert_eq!(doc.theme(), Theme::Ocean);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_branch_colors_follow_order() {
        let mut doc = DiagramDocument::with_theme(Theme::Sunset);
        for label in ["Root", "One", "Two"] {
            doc.graph_mut()
                .add_node(NodeAttributes::new().label(label))
                .unwrap();
        }
        let styled = doc.styled_nodes();
        let palette = Theme::Sunset.palette();
        assert_eq!(styled[0].effective_color, palette.root);
        assert_eq!(styled[1].effective_color, palette.branches[0]);
        assert_eq!(styled[2].effective_color, palette.branches[1]);
        assert!(styled.iter().all(|s| !s.explicit));
    }

    #[test]
    fn test_effective_color_missing_node() {
        let doc = DiagramDocument::new();
        assert_eq!(
            doc.effective_color("n1").unwrap_err(),
            DiagramError::node_not_found("n1")
        );
    }

    #[test]
    fn test_equality_ignores_order() {
        let mut a = MindMapDatabase::new();
        a.insert_node(Node::new("x", "X")).unwrap();
        a.insert_node(Node::new("y", "Y")).unwrap();

        let mut b = MindMapDatabase::new();
        b.insert_node(Node::new("y", "Y")).unwrap();
        b.insert_node(Node::new("x", "X")).unwrap();

        let doc_a = DiagramDocument::from_parts(a, Theme::Purple);
        let doc_b = DiagramDocument::from_parts(b.clone(), Theme::Purple);
        assert_eq!(doc_a, doc_b);

        let doc_c = DiagramDocument::from_parts(b, Theme::Default);
        assert_ne!(doc_a, doc_c);
    }
}

//! Mind-map database implementation
//!
//! Owns the nodes and edges of one diagram and keeps them consistent: every
//! edge endpoint exists, ids are unique, and removing a node removes the
//! edges touching it. Each mutation either applies fully or returns an
//! error with the store unchanged.

use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

use crate::core::{
    Database, DiagramError, Edge, EdgeId, EdgePolicy, Node, NodeAttributes, NodeId, Result,
};

/// Mind-map database implementation
///
/// Nodes and edges are indexed by id and also kept in insertion order so
/// iteration and re-serialization are stable.
#[derive(Debug, Clone, Default)]
pub struct MindMapDatabase {
    /// Nodes indexed by ID
    nodes: HashMap<NodeId, Node>,
    /// Node IDs in insertion order
    node_order: Vec<NodeId>,
    /// Edges indexed by ID
    edges: HashMap<EdgeId, Edge>,
    /// Edge IDs in insertion order
    edge_order: Vec<EdgeId>,
    /// Counter behind the next `n{k}` id
    next_node: u64,
    /// Counter behind the next `e{k}` id
    next_edge: u64,
    policy: EdgePolicy,
}

impl MindMapDatabase {
    /// Create a new empty database
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty database with a specific edge policy
    pub fn with_policy(policy: EdgePolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Edge policy applied by `add_edge`
    pub fn policy(&self) -> EdgePolicy {
        self.policy
    }

    /// Check if a node exists
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Check if an edge exists
    pub fn has_edge(&self, id: &str) -> bool {
        self.edges.contains_key(id)
    }

    fn allocate_node_id(&mut self) -> NodeId {
        loop {
            self.next_node += 1;
            let id = NodeId::new(format!("n{}", self.next_node));
            if !self.nodes.contains_key(&id) {
                return id;
            }
        }
    }

    fn allocate_edge_id(&mut self) -> EdgeId {
        loop {
            self.next_edge += 1;
            let id = EdgeId::new(format!("e{}", self.next_edge));
            if !self.edges.contains_key(&id) {
                return id;
            }
        }
    }

    /// Add a node with the given attributes, filling defaults for the rest
    ///
    /// Fails with `InvalidAttribute` before touching the store if any
    /// supplied value is out of range.
    pub fn add_node(&mut self, attributes: NodeAttributes) -> Result<NodeId> {
        if let Err(err) = attributes.validate() {
            debug!(error = %err, "Rejected node attributes");
            return Err(err);
        }

        let id = self.allocate_node_id();
        let mut node = Node::new(id.clone(), String::new());
        attributes.apply_to(&mut node);

        trace!(
            node_id = %id,
            node_label = %node.data.label,
            node_shape = %node.data.shape,
            "Adding node to database"
        );
        self.node_order.push(id.clone());
        self.nodes.insert(id.clone(), node);
        debug!(node_count = self.node_count(), "Node added");
        Ok(id)
    }

    /// Merge the supplied attributes into an existing node
    pub fn update_node(&mut self, id: &str, attributes: NodeAttributes) -> Result<()> {
        if !self.nodes.contains_key(id) {
            debug!(node_id = %id, "Update of missing node");
            return Err(DiagramError::node_not_found(id));
        }
        attributes.validate()?;

        if let Some(node) = self.nodes.get_mut(id) {
            attributes.apply_to(node);
            trace!(node_id = %id, "Updated node");
        }
        Ok(())
    }

    /// Remove a node and every edge touching it
    ///
    /// Returns the removed node. A second call with the same id fails with
    /// `NodeNotFound`.
    pub fn remove_node(&mut self, id: &str) -> Result<Node> {
        let node = match self.nodes.remove(id) {
            Some(node) => node,
            None => {
                debug!(node_id = %id, "Removal of missing node");
                return Err(DiagramError::node_not_found(id));
            }
        };
        self.node_order.retain(|n| n.as_str() != id);

        let cascaded: Vec<EdgeId> = self
            .edge_order
            .iter()
            .filter(|edge_id| self.edges.get(*edge_id).is_some_and(|e| e.touches(id)))
            .cloned()
            .collect();
        for edge_id in &cascaded {
            self.edges.remove(edge_id);
        }
        self.edge_order.retain(|e| !cascaded.contains(e));

        trace!(node_id = %id, cascaded_edges = cascaded.len(), "Removed node");
        debug!(
            node_count = self.node_count(),
            edge_count = self.edge_count(),
            "Node removed"
        );
        Ok(node)
    }

    /// Connect `source` to `target`
    ///
    /// Parallel edges are allowed. Self-loops follow the store's
    /// [`EdgePolicy`].
    pub fn add_edge(
        &mut self,
        source: &str,
        target: &str,
        label: Option<&str>,
    ) -> Result<EdgeId> {
        for endpoint in [source, target] {
            if !self.nodes.contains_key(endpoint) {
                debug!(node_id = %endpoint, "Edge endpoint missing");
                return Err(DiagramError::node_not_found(endpoint));
            }
        }
        self.policy.check("new edge", source, target)?;

        let id = self.allocate_edge_id();
        let edge = Edge {
            id: id.clone(),
            source: NodeId::from(source),
            target: NodeId::from(target),
            label: label.map(str::to_string),
        };

        trace!(
            edge_id = %id,
            edge_source = %source,
            edge_target = %target,
            edge_label = ?label,
            "Adding edge to database"
        );
        self.edge_order.push(id.clone());
        self.edges.insert(id.clone(), edge);
        debug!(edge_count = self.edge_count(), "Edge added");
        Ok(id)
    }

    /// Remove an edge
    pub fn remove_edge(&mut self, id: &str) -> Result<Edge> {
        let edge = self
            .edges
            .remove(id)
            .ok_or_else(|| DiagramError::edge_not_found(id))?;
        self.edge_order.retain(|e| e.as_str() != id);
        trace!(edge_id = %id, "Removed edge");
        debug!(edge_count = self.edge_count(), "Edge removed");
        Ok(edge)
    }

    /// Set or clear the label of an existing edge
    pub fn relabel_edge(&mut self, id: &str, label: Option<&str>) -> Result<()> {
        let edge = self
            .edges
            .get_mut(id)
            .ok_or_else(|| DiagramError::edge_not_found(id))?;
        edge.label = label.map(str::to_string);
        trace!(edge_id = %id, edge_label = ?label, "Relabeled edge");
        Ok(())
    }

    /// Insert a fully-formed node record, keeping its id
    ///
    /// Used when rebuilding a store from a persisted document.
    pub(crate) fn insert_node(&mut self, node: Node) -> Result<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(DiagramError::malformed(format!(
                "duplicate node id {}",
                node.id
            )));
        }
        self.node_order.push(node.id.clone());
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Insert a fully-formed edge record, keeping its id
    pub(crate) fn insert_edge(&mut self, edge: Edge) -> Result<()> {
        if self.edges.contains_key(&edge.id) {
            return Err(DiagramError::malformed(format!(
                "duplicate edge id {}",
                edge.id
            )));
        }
        for endpoint in [&edge.source, &edge.target] {
            if !self.nodes.contains_key(endpoint) {
                return Err(DiagramError::dangling_edge(edge.id.as_str(), endpoint.as_str()));
            }
        }
        self.policy
            .check(edge.id.as_str(), edge.source.as_str(), edge.target.as_str())?;
        self.edge_order.push(edge.id.clone());
        self.edges.insert(edge.id.clone(), edge);
        Ok(())
    }

    /// Edges touching a node, in insertion order
    pub fn edges_of(&self, node_id: &str) -> Vec<&Edge> {
        self.edges().filter(|e| e.touches(node_id)).collect()
    }

    /// Nodes connected to `node_id` in either direction, without duplicates
    pub fn neighbors(&self, node_id: &str) -> Vec<&NodeId> {
        let mut seen = HashSet::new();
        self.edges()
            .filter_map(|e| e.other_end(node_id))
            .filter(|n| seen.insert(*n))
            .collect()
    }

    /// Number of edge endpoints at this node (a self-loop counts twice)
    pub fn degree(&self, node_id: &str) -> usize {
        self.edges()
            .map(|e| (e.source == node_id) as usize + (e.target == node_id) as usize)
            .sum()
    }

    /// Position of a node in insertion order
    pub fn index_of(&self, node_id: &str) -> Option<usize> {
        self.node_order.iter().position(|n| n.as_str() == node_id)
    }

    /// The first node in insertion order
    pub fn root(&self) -> Option<&Node> {
        self.node_order.first().and_then(|id| self.nodes.get(id))
    }

    /// Re-check referential integrity and id uniqueness
    pub fn validate(&self) -> Result<()> {
        if self.node_order.len() != self.nodes.len() {
            return Err(DiagramError::malformed("duplicate node id"));
        }
        if self.edge_order.len() != self.edges.len() {
            return Err(DiagramError::malformed("duplicate edge id"));
        }
        for edge in self.edges() {
            for endpoint in [&edge.source, &edge.target] {
                if !self.nodes.contains_key(endpoint) {
                    return Err(DiagramError::dangling_edge(
                        edge.id.as_str(),
                        endpoint.as_str(),
                    ));
                }
            }
        }
        Ok(())
    }
}

impl Database for MindMapDatabase {
    type Node = Node;
    type Edge = Edge;

    fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    fn get_edge(&self, id: &str) -> Option<&Edge> {
        self.edges.get(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edge_order.iter().filter_map(|id| self.edges.get(id))
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.node_order.clear();
        self.edges.clear();
        self.edge_order.clear();
        self.next_node = 0;
        self.next_edge = 0;
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FontSize, NodeShape, Position};

    fn labeled(label: &str) -> NodeAttributes {
        NodeAttributes::new().label(label)
    }

    #[test]
    fn test_database_basic_operations() {
        let mut db = MindMapDatabase::new();

        let n1 = db.add_node(labeled("Root")).unwrap();
        let n2 = db.add_node(labeled("Child")).unwrap();
        assert_eq!(n1, "n1");
        assert_eq!(n2, "n2");
        assert_eq!(db.node_count(), 2);

        let e1 = db.add_edge("n1", "n2", Some("relates to")).unwrap();
        assert_eq!(e1, "e1");
        assert_eq!(db.edge_count(), 1);

        let node = db.get_node("n1").unwrap();
        assert_eq!(node.data.label, "Root");
        assert_eq!(node.data.shape, NodeShape::Rounded);
        assert_eq!(node.data.font_size, FontSize::Medium);
        assert_eq!(node.position, Position::default());
    }

    #[test]
    fn test_add_node_rejects_invalid_atomically() {
        let mut db = MindMapDatabase::new();
        db.add_node(labeled("A")).unwrap();

        let err = db
            .add_node(labeled("B").color("not-a-color"))
            .unwrap_err();
        assert_eq!(err.kind(), "InvalidAttribute");
        assert_eq!(db.node_count(), 1);

        // The failed call must not burn an id
        assert_eq!(db.add_node(labeled("C")).unwrap(), "n2");
    }

    #[test]
    fn test_update_node() {
        let mut db = MindMapDatabase::new();
        let id = db.add_node(labeled("Before")).unwrap();

        db.update_node(
            id.as_str(),
            NodeAttributes::new().label("After").position(10.0, -4.5),
        )
        .unwrap();
        let node = db.get_node(id.as_str()).unwrap();
        assert_eq!(node.data.label, "After");
        assert_eq!(node.position, Position::new(10.0, -4.5));

        let err = db
            .update_node("n9", NodeAttributes::new().label("x"))
            .unwrap_err();
        assert_eq!(err, DiagramError::node_not_found("n9"));
    }

    #[test]
    fn test_update_node_invalid_leaves_node_unchanged() {
        let mut db = MindMapDatabase::new();
        let id = db.add_node(labeled("Keep")).unwrap();
        let before = db.get_node(id.as_str()).unwrap().clone();

        let err = db
            .update_node(
                id.as_str(),
                NodeAttributes::new().label("Changed").position(f64::NAN, 1.0),
            )
            .unwrap_err();
        assert_eq!(err.kind(), "InvalidAttribute");
        assert_eq!(db.get_node(id.as_str()).unwrap(), &before);
    }

    #[test]
    fn test_remove_node_cascades() {
        let mut db = MindMapDatabase::new();
        db.add_node(labeled("A")).unwrap();
        db.add_node(labeled("B")).unwrap();
        db.add_node(labeled("C")).unwrap();
        db.add_edge("n1", "n2", None).unwrap();
        db.add_edge("n3", "n1", None).unwrap();
        db.add_edge("n2", "n3", None).unwrap();

        let removed = db.remove_node("n1").unwrap();
        assert_eq!(removed.data.label, "A");
        assert_eq!(db.edge_count(), 1);
        assert!(db.edges().all(|e| !e.touches("n1")));
        assert!(db.validate().is_ok());

        // Not idempotent
        assert_eq!(
            db.remove_node("n1").unwrap_err(),
            DiagramError::node_not_found("n1")
        );
    }

    #[test]
    fn test_add_edge_missing_endpoint() {
        let mut db = MindMapDatabase::new();
        db.add_node(labeled("A")).unwrap();

        let err = db.add_edge("n1", "n2", None).unwrap_err();
        assert_eq!(err, DiagramError::node_not_found("n2"));
        let err = db.add_edge("n0", "n1", None).unwrap_err();
        assert_eq!(err, DiagramError::node_not_found("n0"));
        assert_eq!(db.edge_count(), 0);
    }

    #[test]
    fn test_parallel_edges_and_self_loops_allowed() {
        let mut db = MindMapDatabase::new();
        db.add_node(labeled("A")).unwrap();
        db.add_node(labeled("B")).unwrap();

        db.add_edge("n1", "n2", None).unwrap();
        db.add_edge("n1", "n2", Some("again")).unwrap();
        db.add_edge("n1", "n1", None).unwrap();
        assert_eq!(db.edge_count(), 3);
        assert_eq!(db.degree("n1"), 4);
    }

    #[test]
    fn test_reject_self_loops_policy() {
        let mut db = MindMapDatabase::with_policy(EdgePolicy::RejectSelfLoops);
        db.add_node(labeled("A")).unwrap();

        let err = db.add_edge("n1", "n1", None).unwrap_err();
        assert_eq!(err.kind(), "InvalidEdge");
        assert_eq!(db.edge_count(), 0);
    }

    #[test]
    fn test_remove_edge() {
        let mut db = MindMapDatabase::new();
        db.add_node(labeled("A")).unwrap();
        db.add_node(labeled("B")).unwrap();
        let id = db.add_edge("n1", "n2", None).unwrap();

        db.remove_edge(id.as_str()).unwrap();
        assert_eq!(db.edge_count(), 0);
        assert_eq!(
            db.remove_edge(id.as_str()).unwrap_err(),
            DiagramError::edge_not_found("e1")
        );
    }

    #[test]
    fn test_relabel_edge() {
        let mut db = MindMapDatabase::new();
        db.add_node(labeled("A")).unwrap();
        db.add_node(labeled("B")).unwrap();
        db.add_edge("n1", "n2", None).unwrap();

        db.relabel_edge("e1", Some("causes")).unwrap();
        assert_eq!(db.get_edge("e1").unwrap().label.as_deref(), Some("causes"));
        db.relabel_edge("e1", None).unwrap();
        assert!(db.get_edge("e1").unwrap().label.is_none());
        assert!(db.relabel_edge("e2", None).is_err());
    }

    #[test]
    fn test_neighbors_are_undirected() {
        let mut db = MindMapDatabase::new();
        for label in ["A", "B", "C"] {
            db.add_node(labeled(label)).unwrap();
        }
        db.add_edge("n1", "n2", None).unwrap();
        db.add_edge("n3", "n1", None).unwrap();
        db.add_edge("n2", "n1", None).unwrap();

        let neighbors: Vec<_> = db.neighbors("n1").iter().map(|n| n.as_str()).collect();
        assert_eq!(neighbors, vec!["n2", "n3"]);
        assert_eq!(db.edges_of("n3").len(), 1);
    }

    #[test]
    fn test_iteration_order_and_root() {
        let mut db = MindMapDatabase::new();
        db.add_node(labeled("First")).unwrap();
        db.add_node(labeled("Second")).unwrap();
        db.add_node(labeled("Third")).unwrap();

        let labels: Vec<_> = db.nodes().map(|n| n.data.label.as_str()).collect();
        assert_eq!(labels, vec!["First", "Second", "Third"]);
        assert_eq!(db.root().unwrap().data.label, "First");
        assert_eq!(db.index_of("n3"), Some(2));

        db.remove_node("n1").unwrap();
        assert_eq!(db.root().unwrap().data.label, "Second");
    }

    #[test]
    fn test_snapshot_does_not_see_later_mutations() {
        let mut db = MindMapDatabase::new();
        db.add_node(labeled("A")).unwrap();
        let snapshot = db.list_nodes();

        db.add_node(labeled("B")).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(db.list_nodes().len(), 2);
    }

    #[test]
    fn test_allocator_skips_taken_ids() {
        let mut db = MindMapDatabase::new();
        db.insert_node(Node::new("n1", "loaded")).unwrap();
        db.insert_node(Node::new("n2", "loaded")).unwrap();

        let id = db.add_node(labeled("fresh")).unwrap();
        assert_eq!(id, "n3");
    }

    #[test]
    fn test_insert_edge_checks() {
        let mut db = MindMapDatabase::new();
        db.insert_node(Node::new("a", "A")).unwrap();
        let edge = Edge {
            id: EdgeId::new("x"),
            source: NodeId::new("a"),
            target: NodeId::new("missing"),
            label: None,
        };
        assert_eq!(
            db.insert_edge(edge).unwrap_err(),
            DiagramError::dangling_edge("x", "missing")
        );
        assert!(db.insert_node(Node::new("a", "again")).is_err());
    }

    #[test]
    fn test_clear() {
        let mut db = MindMapDatabase::new();
        db.add_node(labeled("A")).unwrap();
        db.add_node(labeled("B")).unwrap();
        db.add_edge("n1", "n2", None).unwrap();

        db.clear();
        assert_eq!(db.node_count(), 0);
        assert_eq!(db.edge_count(), 0);
        // Counter resets with the store
        assert_eq!(db.add_node(labeled("C")).unwrap(), "n1");
    }
}

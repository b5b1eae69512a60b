//! Core database trait for diagram data storage
//!
//! This trait defines the read side of a graph store. Mutations are
//! inherent methods on each implementation since they carry
//! implementation-specific validation.

use std::ops::Deref;
use std::sync::Arc;

/// Core trait for diagram databases
///
/// The associated types allow each store to define its own node and edge
/// records.
pub trait Database {
    /// The node data type for this database
    type Node: Clone;

    /// The edge data type for this database
    type Edge: Clone;

    /// Get a node by ID
    fn get_node(&self, id: &str) -> Option<&Self::Node>;

    /// Get an edge by ID
    fn get_edge(&self, id: &str) -> Option<&Self::Edge>;

    /// Iterate over all nodes
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Clear all data from the database
    fn clear(&mut self);

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;

    /// Copy the current nodes into a snapshot
    fn list_nodes(&self) -> Snapshot<Self::Node> {
        self.nodes().cloned().collect()
    }

    /// Copy the current edges into a snapshot
    fn list_edges(&self) -> Snapshot<Self::Edge> {
        self.edges().cloned().collect()
    }
}

/// Point-in-time copy of a sequence of records
///
/// Cheap to clone and iterate as many times as needed; later mutations of
/// the store it came from are not visible through it.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    items: Arc<[T]>,
}

impl<T> Snapshot<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.to_vec()
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self {
            items: Arc::from(Vec::new()),
        }
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.items
    }
}

impl<T> FromIterator<T> for Snapshot<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Snapshot<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

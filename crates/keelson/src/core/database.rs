//! Core database trait for diagram graph storage
//!
//! Each diagram family stores its nodes (or tables) and edges (or relations)
//! in a type implementing this trait. Parsers fill a database, generators
//! read one.

/// Core trait for diagram databases
///
/// The associated types let each diagram family keep its own node and edge
/// structures. All operations are infallible: the model accepts whatever it
/// is given and resolution problems are handled by the generators.
pub trait Database: Send + Sync {
    /// The node data type for this database
    type Node: Clone + Send + Sync;

    /// The edge data type for this database
    type Edge: Clone + Send + Sync;

    /// Append a node
    fn add_node(&mut self, node: Self::Node);

    /// Append an edge
    fn add_edge(&mut self, edge: Self::Edge);

    /// Get a node by ID (first match)
    fn get_node(&self, id: &str) -> Option<&Self::Node>;

    /// Iterate over all nodes in insertion order
    fn nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Iterate over all edges in insertion order
    fn edges(&self) -> impl Iterator<Item = &Self::Edge>;

    /// Clear all data from the database
    fn clear(&mut self);

    /// Get the number of nodes
    fn node_count(&self) -> usize;

    /// Get the number of edges
    fn edge_count(&self) -> usize;

    /// True when there are neither nodes nor edges
    fn is_empty(&self) -> bool {
        self.node_count() == 0 && self.edge_count() == 0
    }
}

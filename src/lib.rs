//! Adjacency-list graphs together with the classic suite of graph algorithms.
//!
//! A [`Graph`] owns its vertices and one ordered adjacency list per vertex. The
//! same storage backs all four flavours of graph: directed or undirected, and
//! weighted or unweighted. On top of that storage the crate provides
//!
//!  - breadth-first, depth-first and topological traversals ([`traversal`]),
//!  - depth-first edge classification ([`classify`]),
//!  - minimum spanning trees via Prim's and Kruskal's algorithm,
//!  - single source shortest paths via Dijkstra's and Bellman-Ford's algorithm.
//!
//! The algorithms rely on a binary [`MinHeap`] and a disjoint-set [`Partition`],
//! both of which are usable on their own.
//!
//! # Example
//!
//! ```
//! # use adjgraph::{Graph, algorithms::shortest_path};
//! let mut graph = Graph::directed_weighted(3);
//! let a = graph.add_vertex("A").unwrap();
//! let b = graph.add_vertex("B").unwrap();
//! let c = graph.add_vertex("C").unwrap();
//!
//! graph.add_weighted_edge(a, b, 4).unwrap();
//! graph.add_weighted_edge(b, c, 1).unwrap();
//! graph.add_weighted_edge(a, c, 7).unwrap();
//!
//! let path = shortest_path(&graph, a, c);
//! assert_eq!(path.path_length(), 5);
//! ```
pub mod algorithms;
pub mod classify;
pub mod graph;
pub mod heap;
pub mod memory;
pub mod partition;
pub mod traversal;

pub use crate::classify::{DfsResult, EdgeClassification};
pub use crate::graph::{Directedness, Edge, Graph, GraphError, Vertex, Weight, Weightedness};
pub use crate::heap::{Association, MinHeap};
pub use crate::partition::Partition;
pub use crate::traversal::{VertexCollector, Visitor};

make_entity! {
    /// Position of a vertex in its graph's vertex array.
    ///
    /// Vertex indices are dense: a graph with `n` vertices uses exactly the
    /// indices `0..n`. Removing a vertex shifts all higher indices down by one.
    pub struct VertexIndex(u32);
}

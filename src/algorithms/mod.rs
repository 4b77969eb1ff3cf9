//! Minimum spanning trees and single source shortest paths.
//!
//! The algorithms are free functions over a borrowed [`Graph`](crate::Graph).
//! Prim's and Dijkstra's algorithm share the same skeleton: a table with one
//! [`Entry`] per vertex, indexed by vertex number, and a [`MinHeap`](crate::MinHeap)
//! of vertices keyed by their tentative distance.

mod mst;
mod path;

pub use mst::{kruskals_algorithm, prims_algorithm, MinimumSpanningTree};
pub use path::{bellman_ford_algorithm, dijkstras_algorithm, shortest_path, BellmanFord, GraphPath};

use crate::graph::{Edge, Weight};
use crate::VertexIndex;

/// Accumulated edge weights along a path.
///
/// Sums that leave the range of `Distance` saturate at `Distance::MIN` or
/// `Distance::MAX`. An unreached vertex has no distance at all rather than a
/// sentinel value, so even a path of length `Distance::MAX` stays reachable.
pub type Distance = Weight;

/// Whether a path of length `candidate` is shorter than the best known one.
#[inline]
pub(crate) fn improves(candidate: Distance, current: Option<Distance>) -> bool {
    current.map_or(true, |current| candidate < current)
}

/// Per-vertex state of Prim's and Dijkstra's algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    /// Whether the vertex has been taken from the queue.
    pub discovered: bool,
    /// Best known distance; `None` while unreached.
    pub distance: Option<Distance>,
    /// The vertex the best known path arrives from.
    pub predecessor: Option<VertexIndex>,
    /// The edge the best known path arrives over.
    pub edge: Option<Edge>,
}

impl Entry {
    /// An undiscovered, unreached entry.
    pub fn new() -> Self {
        Self {
            discovered: false,
            distance: None,
            predecessor: None,
            edge: None,
        }
    }

    pub fn with(
        discovered: bool,
        distance: Option<Distance>,
        predecessor: Option<VertexIndex>,
        edge: Option<Edge>,
    ) -> Self {
        Self {
            discovered,
            distance,
            predecessor,
            edge,
        }
    }

    /// Whether some path reached the vertex.
    #[inline]
    pub fn is_reachable(&self) -> bool {
        self.distance.is_some()
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}

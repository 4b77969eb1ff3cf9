use tracing::{debug, instrument, trace};

use super::{improves, Entry};
use crate::graph::{Edge, Graph, GraphError, Weight};
use crate::heap::{Association, MinHeap};
use crate::memory::EntityIndex;
use crate::partition::Partition;
use crate::VertexIndex;

/// Edges of a spanning tree together with their total weight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MinimumSpanningTree {
    edges: Vec<Edge>,
    total_weight: Weight,
}

impl MinimumSpanningTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an edge and adds its weight to the total.
    pub fn add_edge(&mut self, edge: Edge) {
        self.total_weight = self.total_weight.saturating_add(edge.weight());
        self.edges.push(edge);
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// Number of edges in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Grows a minimum spanning tree from `start` with Prim's algorithm.
///
/// The tree contains, for every vertex reachable from `start` other than
/// `start` itself, the undirected edge to the vertex it was attached from,
/// listed in vertex order. Unreachable vertices are left out, so on a
/// disconnected graph the result spans the component of `start` only.
///
/// # Errors
///
/// When `start` is not part of the graph.
///
/// # Example
///
/// ```
/// # use adjgraph::{Graph, algorithms::prims_algorithm};
/// let mut graph = Graph::undirected_weighted(3);
/// let a = graph.add_vertex("a").unwrap();
/// let b = graph.add_vertex("b").unwrap();
/// let c = graph.add_vertex("c").unwrap();
/// graph.add_weighted_edge(a, b, 1).unwrap();
/// graph.add_weighted_edge(b, c, 2).unwrap();
/// graph.add_weighted_edge(a, c, 5).unwrap();
///
/// let mst = prims_algorithm(&graph, a).unwrap();
/// assert_eq!(mst.total_weight(), 3);
/// assert_eq!(mst.len(), 2);
/// ```
#[instrument(skip_all, fields(start = %start, vertices = graph.vertex_count()))]
pub fn prims_algorithm(graph: &Graph, start: VertexIndex) -> Result<MinimumSpanningTree, GraphError> {
    graph.check(start)?;

    let mut table = vec![Entry::new(); graph.vertex_count()];
    table[start.index()].distance = Some(0);

    let mut queue = MinHeap::new();
    queue.insert(Association::new(0, start));

    while let Some(association) = queue.extract_min() {
        let vertex = association.into_value();
        if table[vertex.index()].discovered {
            continue;
        }
        table[vertex.index()].discovered = true;

        for edge in graph.adjacency(vertex) {
            let mate = edge.mate(vertex);
            let entry = &mut table[mate.index()];
            if !entry.discovered && improves(edge.weight(), entry.distance) {
                trace!(%edge, "attached vertex");
                entry.distance = Some(edge.weight());
                entry.predecessor = Some(vertex);
                entry.edge = Some(*edge);
                queue.insert(Association::new(edge.weight(), mate));
            }
        }
    }

    let mut mst = MinimumSpanningTree::new();
    for (number, entry) in table.iter().enumerate() {
        let vertex = VertexIndex::new(number);
        if vertex == start {
            continue;
        }
        if let (Some(predecessor), Some(distance)) = (entry.predecessor, entry.distance) {
            mst.add_edge(Edge::undirected(vertex, predecessor, distance));
        }
    }

    debug!(edges = mst.len(), weight = mst.total_weight(), "computed spanning tree");
    Ok(mst)
}

/// Computes a minimum spanning forest with Kruskal's algorithm.
///
/// Edges are considered in increasing order of weight and kept whenever they
/// join two different components. On a connected graph the result is a
/// spanning tree with `n - 1` edges.
///
/// # Example
///
/// ```
/// # use adjgraph::{Graph, algorithms::kruskals_algorithm};
/// let mut graph = Graph::undirected_weighted(4);
/// let v: Vec<_> = ["a", "b", "c", "d"]
///     .into_iter()
///     .map(|name| graph.add_vertex(name).unwrap())
///     .collect();
/// graph.add_weighted_edge(v[0], v[1], 1).unwrap();
/// graph.add_weighted_edge(v[1], v[2], 4).unwrap();
/// graph.add_weighted_edge(v[2], v[3], 2).unwrap();
/// graph.add_weighted_edge(v[3], v[0], 3).unwrap();
///
/// let mst = kruskals_algorithm(&graph);
/// assert_eq!(mst.total_weight(), 6);
/// ```
#[instrument(skip_all, fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn kruskals_algorithm(graph: &Graph) -> MinimumSpanningTree {
    let mut queue: MinHeap<_> = graph
        .edges()
        .map(|edge| Association::new(edge.weight(), *edge))
        .collect();

    let mut partition: Partition<VertexIndex> =
        graph.vertices().map(|vertex| vertex.number()).collect();

    let mut mst = MinimumSpanningTree::new();
    while let Some(association) = queue.extract_min() {
        let edge = association.into_value();
        match partition.union(&edge.head(), &edge.tail()) {
            Ok(true) => {
                trace!(%edge, "joined components");
                mst.add_edge(Edge::undirected(edge.head(), edge.tail(), edge.weight()));
            }
            Ok(false) => {}
            Err(error) => {
                debug_assert!(false, "edge endpoint missing from the partition: {error}");
            }
        }
    }

    debug!(edges = mst.len(), weight = mst.total_weight(), "computed spanning forest");
    mst
}

use tracing::{debug, instrument, trace};

use super::{improves, Distance, Entry};
use crate::graph::{Edge, Graph, GraphError, Vertex, Weight};
use crate::heap::{Association, MinHeap};
use crate::memory::EntityIndex;
use crate::VertexIndex;

/// A path through a graph: its vertices, the edges between them and their total weight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphPath {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    path_length: Weight,
}

impl GraphPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    /// Appends an edge and adds its weight to the path length.
    pub fn add_edge(&mut self, edge: Edge) {
        self.path_length = self.path_length.saturating_add(edge.weight());
        self.edges.push(edge);
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Sum of the weights of the path's edges.
    #[inline]
    pub fn path_length(&self) -> Weight {
        self.path_length
    }

    #[inline]
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Distances computed by [`bellman_ford_algorithm`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BellmanFord {
    /// Whether some edge could still be relaxed after `n - 1` rounds.
    ///
    /// When set, `distances` are not shortest path lengths.
    pub has_negative_cycle: bool,
    /// Distance per vertex number; `None` for unreachable vertices.
    pub distances: Vec<Option<Distance>>,
}

impl BellmanFord {
    /// The computed distance of `vertex`, or `None` when it is unreachable or
    /// not part of the graph.
    pub fn distance(&self, vertex: VertexIndex) -> Option<Distance> {
        self.distances.get(vertex.index()).copied().flatten()
    }

    #[inline]
    pub fn is_reachable(&self, vertex: VertexIndex) -> bool {
        self.distance(vertex).is_some()
    }
}

/// Computes the distance from `source` to every vertex with Dijkstra's algorithm.
///
/// The returned table holds one [`Entry`] per vertex, indexed by vertex
/// number. Unreachable vertices keep no distance and no predecessor. Edge
/// weights must not be negative; with negative weights the distances are not
/// guaranteed to be minimal.
///
/// # Errors
///
/// When `source` is not part of the graph.
///
/// # Example
///
/// ```
/// # use adjgraph::{Graph, algorithms::dijkstras_algorithm};
/// let mut graph = Graph::directed_weighted(3);
/// let a = graph.add_vertex("a").unwrap();
/// let b = graph.add_vertex("b").unwrap();
/// let c = graph.add_vertex("c").unwrap();
/// graph.add_weighted_edge(a, b, 2).unwrap();
/// graph.add_weighted_edge(b, c, 2).unwrap();
/// graph.add_weighted_edge(a, c, 5).unwrap();
///
/// let table = dijkstras_algorithm(&graph, a).unwrap();
/// assert_eq!(table[2].distance, Some(4));
/// assert_eq!(table[2].predecessor, Some(b));
/// ```
#[instrument(skip_all, fields(source = %source, vertices = graph.vertex_count()))]
pub fn dijkstras_algorithm(graph: &Graph, source: VertexIndex) -> Result<Vec<Entry>, GraphError> {
    graph.check(source)?;

    let mut table = vec![Entry::new(); graph.vertex_count()];
    table[source.index()].distance = Some(0);

    let mut queue = MinHeap::new();
    queue.insert(Association::new(0, source));

    while let Some(association) = queue.extract_min() {
        let vertex = association.into_value();
        if table[vertex.index()].discovered {
            continue;
        }
        table[vertex.index()].discovered = true;

        // Only reached vertices enter the queue.
        let Some(distance) = table[vertex.index()].distance else {
            continue;
        };
        for edge in graph.adjacency(vertex) {
            let mate = edge.mate(vertex);
            let path_distance = distance.saturating_add(edge.weight());
            let entry = &mut table[mate.index()];
            if improves(path_distance, entry.distance) {
                trace!(%edge, path_distance, "relaxed edge");
                entry.distance = Some(path_distance);
                entry.predecessor = Some(vertex);
                entry.edge = Some(*edge);
                queue.insert(Association::new(path_distance, mate));
            }
        }
    }

    debug!(
        reached = table.iter().filter(|entry| entry.is_reachable()).count(),
        "computed shortest paths"
    );
    Ok(table)
}

/// Reconstructs the shortest path from `source` to `destination`.
///
/// The path is found with [`dijkstras_algorithm`] and walked backwards along
/// the predecessors, so vertices and edges are listed from `destination` to
/// `source`. The path is empty when either vertex is not part of the graph or
/// `destination` cannot be reached. A path from a vertex to itself consists
/// of that vertex alone.
///
/// # Example
///
/// ```
/// # use adjgraph::{Graph, algorithms::shortest_path};
/// let mut graph = Graph::directed_weighted(3);
/// let a = graph.add_vertex("a").unwrap();
/// let b = graph.add_vertex("b").unwrap();
/// let c = graph.add_vertex("c").unwrap();
/// graph.add_weighted_edge(a, b, 2).unwrap();
/// graph.add_weighted_edge(b, c, 2).unwrap();
///
/// let path = shortest_path(&graph, a, c);
/// let names: Vec<_> = path.vertices().iter().map(|v| v.name()).collect();
/// assert_eq!(names, ["c", "b", "a"]);
/// assert_eq!(path.path_length(), 4);
///
/// assert!(shortest_path(&graph, c, a).is_empty());
/// ```
pub fn shortest_path(graph: &Graph, source: VertexIndex, destination: VertexIndex) -> GraphPath {
    let mut path = GraphPath::new();

    let Ok(table) = dijkstras_algorithm(graph, source) else {
        return path;
    };
    let Ok(end) = graph.vertex(destination) else {
        return path;
    };
    if !table[destination.index()].is_reachable() {
        return path;
    }

    path.add_vertex(end.clone());
    let mut current = destination;
    // Negative weights can close the predecessor chain into a cycle; a simple
    // path never has more edges than the graph has vertices.
    for _ in 0..graph.vertex_count() {
        if current == source {
            break;
        }
        let entry = &table[current.index()];
        let (Some(predecessor), Some(edge)) = (entry.predecessor, entry.edge) else {
            break;
        };
        path.add_vertex(graph[predecessor].clone());
        path.add_edge(edge);
        current = predecessor;
    }

    path
}

/// Computes the distance from `source` to every vertex with the Bellman-Ford algorithm.
///
/// Unlike [`dijkstras_algorithm`] negative edge weights are allowed. After
/// `n - 1` rounds of relaxing every edge, one more pass checks whether any
/// edge can still be relaxed; if so, a negative cycle is reachable from
/// `source` and the flag in the result is set. The distances are returned in
/// either case.
///
/// # Errors
///
/// When `source` is not part of the graph.
///
/// # Example
///
/// ```
/// # use adjgraph::{Graph, algorithms::bellman_ford_algorithm};
/// let mut graph = Graph::directed_weighted(3);
/// let a = graph.add_vertex("a").unwrap();
/// let b = graph.add_vertex("b").unwrap();
/// let c = graph.add_vertex("c").unwrap();
/// graph.add_weighted_edge(a, b, 4).unwrap();
/// graph.add_weighted_edge(a, c, 1).unwrap();
/// graph.add_weighted_edge(b, c, -5).unwrap();
///
/// let result = bellman_ford_algorithm(&graph, a).unwrap();
/// assert!(!result.has_negative_cycle);
/// assert_eq!(result.distance(c), Some(-1));
/// ```
#[instrument(skip_all, fields(source = %source, vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn bellman_ford_algorithm(graph: &Graph, source: VertexIndex) -> Result<BellmanFord, GraphError> {
    graph.check(source)?;

    let mut distances = vec![None; graph.vertex_count()];
    distances[source.index()] = Some(0);

    // Unreached vertices have nothing to relax from.
    let relaxed = |distances: &[Option<Distance>], edge: &Edge| -> Option<Distance> {
        let from: Distance = distances[edge.head().index()]?;
        let candidate = from.saturating_add(edge.weight());
        improves(candidate, distances[edge.tail().index()]).then_some(candidate)
    };

    for round in 1..graph.vertex_count() {
        let mut changed = false;
        for edge in graph.edges() {
            if let Some(distance) = relaxed(&distances, edge) {
                distances[edge.tail().index()] = Some(distance);
                changed = true;
            }
        }
        trace!(round, changed, "finished relaxation round");
        if !changed {
            break;
        }
    }

    let has_negative_cycle = graph.edges().any(|edge| relaxed(&distances, edge).is_some());

    debug!(has_negative_cycle, "computed shortest paths");
    Ok(BellmanFord {
        has_negative_cycle,
        distances,
    })
}

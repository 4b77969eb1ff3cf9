//! Depth-first edge classification.
//!
//! [`Graph::classify_edges`] runs a depth-first search from every undiscovered
//! vertex, in vertex order, and labels every edge it explores. Discovery and
//! finishing times share a single clock that ticks on every discovery and on
//! every finish, so the intervals `[discovery, finishing]` of two vertices are
//! either nested or disjoint.

use std::collections::BTreeMap;

use tracing::{debug, instrument, trace};

use crate::graph::{Edge, Graph};
use crate::memory::EntityIndex;
use crate::VertexIndex;

/// Label assigned to an edge by a depth-first search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeClassification {
    /// The edge discovered its tail.
    Tree,
    /// The edge leads to an ancestor that is still open, or is a self loop.
    Back,
    /// The edge leads to an already finished descendant.
    Forward,
    /// Any other edge; only occurs in directed graphs.
    Cross,
}

/// Outcome of a depth-first edge classification.
///
/// # Example
///
/// ```
/// # use adjgraph::{Graph, EdgeClassification};
/// let mut graph = Graph::directed_unweighted(2);
/// let a = graph.add_vertex("a").unwrap();
/// let b = graph.add_vertex("b").unwrap();
/// graph.add_edge(a, b).unwrap();
/// graph.add_edge(b, a).unwrap();
///
/// let result = graph.classify_edges();
/// assert_eq!(result.parent(b), Some(a));
/// assert_eq!(result.discovery_time(a), Some(1));
/// assert_eq!(result.finishing_time(a), Some(4));
/// assert_eq!(result.order(), &[b, a]);
///
/// let back = graph.get_edge(b, a).unwrap().unwrap();
/// assert_eq!(result.classification(back), Some(EdgeClassification::Back));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DfsResult {
    parent: Vec<Option<VertexIndex>>,
    discovery: Vec<Option<usize>>,
    finishing: Vec<Option<usize>>,
    classification: BTreeMap<Edge, EdgeClassification>,
    order: Vec<VertexIndex>,
}

impl DfsResult {
    fn with_vertices(vertex_count: usize) -> Self {
        Self {
            parent: vec![None; vertex_count],
            discovery: vec![None; vertex_count],
            finishing: vec![None; vertex_count],
            classification: BTreeMap::new(),
            order: Vec::with_capacity(vertex_count),
        }
    }

    /// Removes all recorded data.
    pub fn clear(&mut self) {
        self.parent.clear();
        self.discovery.clear();
        self.finishing.clear();
        self.classification.clear();
        self.order.clear();
    }

    /// The vertex that discovered `vertex`, or `None` for search roots.
    pub fn parent(&self, vertex: VertexIndex) -> Option<VertexIndex> {
        self.parent.get(vertex.index()).copied().flatten()
    }

    pub fn discovery_time(&self, vertex: VertexIndex) -> Option<usize> {
        self.discovery.get(vertex.index()).copied().flatten()
    }

    pub fn finishing_time(&self, vertex: VertexIndex) -> Option<usize> {
        self.finishing.get(vertex.index()).copied().flatten()
    }

    /// The label of `edge`, or `None` when the search never classified it.
    pub fn classification(&self, edge: &Edge) -> Option<EdgeClassification> {
        self.classification.get(edge).copied()
    }

    /// All classified edges with their labels.
    pub fn edges(&self) -> impl Iterator<Item = (&Edge, EdgeClassification)> + '_ {
        self.classification.iter().map(|(edge, class)| (edge, *class))
    }

    /// The vertices in the order in which they finished.
    #[inline]
    pub fn order(&self) -> &[VertexIndex] {
        &self.order
    }

    /// The edges with label `class`.
    pub fn edges_of(&self, class: EdgeClassification) -> impl Iterator<Item = &Edge> + '_ {
        self.classification
            .iter()
            .filter(move |(_, c)| **c == class)
            .map(|(edge, _)| edge)
    }

    /// Number of edges with label `class`.
    pub fn count(&self, class: EdgeClassification) -> usize {
        self.edges_of(class).count()
    }

    pub fn tree_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges_of(EdgeClassification::Tree)
    }

    pub fn back_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges_of(EdgeClassification::Back)
    }

    pub fn forward_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges_of(EdgeClassification::Forward)
    }

    pub fn cross_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges_of(EdgeClassification::Cross)
    }

    pub fn has_tree_edges(&self) -> bool {
        self.tree_edges().next().is_some()
    }

    pub fn has_back_edges(&self) -> bool {
        self.back_edges().next().is_some()
    }

    pub fn has_forward_edges(&self) -> bool {
        self.forward_edges().next().is_some()
    }

    pub fn has_cross_edges(&self) -> bool {
        self.cross_edges().next().is_some()
    }

    fn discovered(&self, vertex: VertexIndex) -> bool {
        self.discovery[vertex.index()].is_some()
    }

    fn finished(&self, vertex: VertexIndex) -> bool {
        self.finishing[vertex.index()].is_some()
    }

    fn label(&mut self, edge: Edge, class: EdgeClassification) {
        trace!(%edge, ?class, "classified edge");
        // Parallel edges compare equal; the first label wins.
        self.classification.entry(edge).or_insert(class);
    }
}

/// A vertex on the explicit search stack, with the position of the next edge to explore.
struct Frame {
    vertex: VertexIndex,
    next: usize,
}

/// Depth-first search state shared by the directed and undirected classifiers.
struct Classifier<'g> {
    graph: &'g Graph,
    result: DfsResult,
    stack: Vec<Frame>,
    clock: usize,
}

impl<'g> Classifier<'g> {
    fn new(graph: &'g Graph) -> Self {
        Self {
            graph,
            result: DfsResult::with_vertices(graph.vertex_count()),
            stack: Vec::new(),
            clock: 0,
        }
    }

    fn run(mut self) -> DfsResult {
        let graph = self.graph;
        let directed = graph.is_directed();
        for root in graph.vertices().map(|vertex| vertex.number()) {
            if self.result.discovered(root) {
                continue;
            }
            self.discover(root, None);
            while let Some(frame) = self.stack.last_mut() {
                let vertex = frame.vertex;
                match graph.adjacency(vertex).get(frame.next).copied() {
                    Some(edge) => {
                        frame.next += 1;
                        if directed {
                            self.explore_directed(edge);
                        } else {
                            self.explore_undirected(edge);
                        }
                    }
                    None => {
                        self.stack.pop();
                        self.finish(vertex);
                    }
                }
            }
        }
        self.result
    }

    fn discover(&mut self, vertex: VertexIndex, parent: Option<VertexIndex>) {
        self.clock += 1;
        self.result.discovery[vertex.index()] = Some(self.clock);
        self.result.parent[vertex.index()] = parent;
        self.stack.push(Frame { vertex, next: 0 });
    }

    fn finish(&mut self, vertex: VertexIndex) {
        self.clock += 1;
        self.result.finishing[vertex.index()] = Some(self.clock);
        self.result.order.push(vertex);
    }

    fn explore_directed(&mut self, edge: Edge) {
        let (u, v) = (edge.head(), edge.tail());
        let class = if !self.result.discovered(v) {
            self.discover(v, Some(u));
            EdgeClassification::Tree
        } else if !self.result.finished(v) {
            EdgeClassification::Back
        } else if self.result.discovery[u.index()] < self.result.discovery[v.index()] {
            EdgeClassification::Forward
        } else {
            EdgeClassification::Cross
        };
        self.result.label(edge, class);
    }

    /// Both halves of an undirected edge describe the same connection, which is
    /// labelled through whichever half the search explores first.
    fn explore_undirected(&mut self, edge: Edge) {
        let classification = &self.result.classification;
        if classification.contains_key(&edge) || classification.contains_key(&edge.reversed()) {
            return;
        }

        let (u, v) = (edge.head(), edge.tail());
        let class = if !self.result.discovered(v) {
            self.discover(v, Some(u));
            EdgeClassification::Tree
        } else {
            EdgeClassification::Back
        };
        self.result.label(edge, class);
    }
}

impl Graph {
    /// Classifies every edge reachable by a depth-first search over the whole graph.
    ///
    /// Directed graphs produce all four labels. Undirected graphs label each
    /// connection once and only produce tree and back edges.
    #[instrument(skip_all, fields(vertices = self.vertex_count(), edges = self.edge_count()))]
    pub fn classify_edges(&self) -> DfsResult {
        let result = Classifier::new(self).run();
        debug!(
            tree = result.count(EdgeClassification::Tree),
            back = result.count(EdgeClassification::Back),
            forward = result.count(EdgeClassification::Forward),
            cross = result.count(EdgeClassification::Cross),
            "classified edges"
        );
        result
    }
}

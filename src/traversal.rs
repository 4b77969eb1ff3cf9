//! Visitor-driven traversals over a [`Graph`].
//!
//! Every traversal reports vertices to a [`Visitor`] and stops early once the
//! visitor reports that it is done. Closures taking a `&Vertex` are visitors
//! that never finish early.

use std::collections::VecDeque;

use bitvec::prelude::*;
use tracing::trace;

use crate::graph::{Graph, GraphError, Vertex};
use crate::memory::EntityIndex;
use crate::VertexIndex;

/// Receives the vertices reached by a traversal.
pub trait Visitor {
    /// Called once for every vertex the traversal reaches.
    fn visit(&mut self, vertex: &Vertex);

    /// Whether the traversal should stop before visiting further vertices.
    fn is_done(&self) -> bool {
        false
    }
}

impl<F> Visitor for F
where
    F: FnMut(&Vertex),
{
    #[inline]
    fn visit(&mut self, vertex: &Vertex) {
        self(vertex)
    }
}

/// Visitor that records the numbers of the visited vertices in order.
///
/// With a limit set, the collector reports itself done after that many visits.
///
/// # Example
///
/// ```
/// # use adjgraph::{Graph, VertexCollector};
/// let mut graph = Graph::directed_unweighted(3);
/// let a = graph.add_vertex("a").unwrap();
/// let b = graph.add_vertex("b").unwrap();
/// let c = graph.add_vertex("c").unwrap();
/// graph.add_edge(a, b).unwrap();
/// graph.add_edge(b, c).unwrap();
///
/// let mut collector = VertexCollector::new();
/// graph.breadth_first_traversal(&mut collector, a).unwrap();
/// assert_eq!(collector.visited(), &[a, b, c]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VertexCollector {
    visited: Vec<VertexIndex>,
    limit: Option<usize>,
}

impl VertexCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collector that is done after `limit` visits.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            visited: Vec::new(),
            limit: Some(limit),
        }
    }

    #[inline]
    pub fn visited(&self) -> &[VertexIndex] {
        &self.visited
    }

    #[inline]
    pub fn into_visited(self) -> Vec<VertexIndex> {
        self.visited
    }
}

impl Visitor for VertexCollector {
    fn visit(&mut self, vertex: &Vertex) {
        self.visited.push(vertex.number());
    }

    fn is_done(&self) -> bool {
        self.limit.map_or(false, |limit| self.visited.len() >= limit)
    }
}

impl Graph {
    /// Visits the vertices reachable from `start` in breadth-first order.
    ///
    /// Vertices are marked when they are enqueued, so every vertex is visited
    /// at most once even when several of its predecessors are dequeued before it.
    ///
    /// # Errors
    ///
    /// When `start` is not part of the graph.
    pub fn breadth_first_traversal<V>(
        &self,
        visitor: &mut V,
        start: VertexIndex,
    ) -> Result<(), GraphError>
    where
        V: Visitor + ?Sized,
    {
        self.check(start)?;

        let mut enqueued = bitvec![0; self.vertex_count()];
        let mut queue = VecDeque::from([start]);
        enqueued.set(start.index(), true);

        while let Some(vertex) = queue.pop_front() {
            if visitor.is_done() {
                break;
            }
            visitor.visit(&self[vertex]);

            for edge in self.adjacency(vertex) {
                let successor = edge.tail();
                if !enqueued[successor.index()] {
                    enqueued.set(successor.index(), true);
                    queue.push_back(successor);
                }
            }
        }

        Ok(())
    }

    /// Visits the vertices reachable from `start` in depth-first order.
    ///
    /// The start vertex is visited first. Afterwards the most recently
    /// discovered vertex is expanded, and each of its unvisited successors is
    /// visited as soon as it is discovered.
    ///
    /// # Errors
    ///
    /// When `start` is not part of the graph.
    pub fn depth_first_traversal<V>(
        &self,
        visitor: &mut V,
        start: VertexIndex,
    ) -> Result<(), GraphError>
    where
        V: Visitor + ?Sized,
    {
        self.check(start)?;

        let mut visited = bitvec![0; self.vertex_count()];
        if visitor.is_done() {
            return Ok(());
        }
        visitor.visit(&self[start]);
        visited.set(start.index(), true);

        let mut stack = vec![start];
        while let Some(vertex) = stack.pop() {
            for edge in self.adjacency(vertex) {
                let successor = edge.tail();
                if visited[successor.index()] {
                    continue;
                }
                if visitor.is_done() {
                    return Ok(());
                }
                visitor.visit(&self[successor]);
                visited.set(successor.index(), true);
                stack.push(successor);
            }
        }

        Ok(())
    }

    /// Visits the vertices of a directed graph in topological order.
    ///
    /// Vertices without incoming edges are visited first. Visiting a vertex
    /// removes its outgoing edges, which may release further vertices. Vertices
    /// on a cycle, or reachable only through one, are never visited.
    ///
    /// # Errors
    ///
    /// When the graph is undirected.
    ///
    /// # Example
    ///
    /// ```
    /// # use adjgraph::Graph;
    /// let mut graph = Graph::directed_unweighted(3);
    /// let shirt = graph.add_vertex("shirt").unwrap();
    /// let tie = graph.add_vertex("tie").unwrap();
    /// let jacket = graph.add_vertex("jacket").unwrap();
    /// graph.add_edge(tie, jacket).unwrap();
    /// graph.add_edge(shirt, tie).unwrap();
    ///
    /// let mut order = Vec::new();
    /// graph
    ///     .topological_order_traversal(&mut |v: &adjgraph::Vertex| order.push(v.name().to_owned()))
    ///     .unwrap();
    /// assert_eq!(order, ["shirt", "tie", "jacket"]);
    /// ```
    pub fn topological_order_traversal<V>(&self, visitor: &mut V) -> Result<(), GraphError>
    where
        V: Visitor + ?Sized,
    {
        if !self.is_directed() {
            return Err(GraphError::NotDirected);
        }

        let mut in_degree = vec![0usize; self.vertex_count()];
        for edge in self.edges() {
            in_degree[edge.tail().index()] += 1;
        }

        let mut queue: VecDeque<VertexIndex> = self
            .vertices()
            .map(Vertex::number)
            .filter(|vertex| in_degree[vertex.index()] == 0)
            .collect();

        while let Some(vertex) = queue.pop_front() {
            if visitor.is_done() {
                break;
            }
            visitor.visit(&self[vertex]);

            for edge in self.adjacency(vertex) {
                let successor = edge.tail().index();
                in_degree[successor] -= 1;
                if in_degree[successor] == 0 {
                    queue.push_back(edge.tail());
                }
            }
        }

        Ok(())
    }

    /// Whether the graph contains a cycle.
    ///
    /// Directed graphs are cyclic when the topological traversal cannot reach
    /// every vertex. Undirected graphs are cyclic when their edge
    /// classification contains a back edge; a self loop counts as a cycle.
    pub fn is_cyclic(&self) -> bool {
        if self.is_directed() {
            let mut collector = VertexCollector::new();
            // Directed graphs never fail the topological traversal.
            let _ = self.topological_order_traversal(&mut collector);
            trace!(
                sorted = collector.visited().len(),
                vertices = self.vertex_count(),
                "topological traversal finished"
            );
            collector.visited().len() < self.vertex_count()
        } else {
            self.classify_edges().has_back_edges()
        }
    }

    /// Whether a depth-first traversal from the first vertex reaches every vertex.
    ///
    /// An empty graph is connected.
    pub fn is_connected(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        self.reaches_all(VertexIndex::new(0))
    }

    /// Whether every vertex reaches every other vertex.
    ///
    /// An empty graph is strongly connected.
    pub fn is_strongly_connected(&self) -> bool {
        self.vertices()
            .map(Vertex::number)
            .all(|vertex| self.reaches_all(vertex))
    }

    fn reaches_all(&self, start: VertexIndex) -> bool {
        let mut collector = VertexCollector::new();
        match self.depth_first_traversal(&mut collector, start) {
            Ok(()) => collector.visited().len() == self.vertex_count(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::{fixture, rstest};

    fn v(index: usize) -> VertexIndex {
        VertexIndex::new(index)
    }

    /// 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3, 3 -> 4
    #[fixture]
    fn diamond() -> Graph {
        let mut graph = Graph::directed_unweighted(5);
        for name in ["a", "b", "c", "d", "e"] {
            graph.add_vertex(name).unwrap();
        }
        for (u, w) in [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)] {
            graph.add_edge(v(u), v(w)).unwrap();
        }
        graph
    }

    #[rstest]
    fn breadth_first(diamond: Graph) {
        let mut collector = VertexCollector::new();
        diamond.breadth_first_traversal(&mut collector, v(0)).unwrap();
        assert_eq!(collector.visited(), &[v(0), v(1), v(2), v(3), v(4)]);
    }

    #[rstest]
    fn depth_first(diamond: Graph) {
        let mut collector = VertexCollector::new();
        diamond.depth_first_traversal(&mut collector, v(0)).unwrap();
        // Successors are visited when discovered; the last one is expanded first.
        assert_eq!(collector.visited(), &[v(0), v(1), v(2), v(3), v(4)]);

        let mut collector = VertexCollector::new();
        diamond.depth_first_traversal(&mut collector, v(2)).unwrap();
        assert_eq!(collector.visited(), &[v(2), v(3), v(4)]);
    }

    #[rstest]
    #[case(0, vec![])]
    #[case(1, vec![0])]
    #[case(3, vec![0, 1, 2])]
    fn traversal_stops_when_done(diamond: Graph, #[case] limit: usize, #[case] expected: Vec<usize>) {
        let expected: Vec<_> = expected.into_iter().map(v).collect();

        let mut collector = VertexCollector::with_limit(limit);
        diamond.breadth_first_traversal(&mut collector, v(0)).unwrap();
        assert_eq!(collector.visited(), expected.as_slice());

        let mut collector = VertexCollector::with_limit(limit);
        diamond.depth_first_traversal(&mut collector, v(0)).unwrap();
        assert_eq!(collector.visited(), expected.as_slice());
    }

    #[rstest]
    fn closures_are_visitors(diamond: Graph) {
        let mut names = String::new();
        diamond
            .breadth_first_traversal(&mut |vertex: &Vertex| names.push_str(vertex.name()), v(1))
            .unwrap();
        assert_eq!(names, "bde");
    }

    #[rstest]
    fn invalid_start(diamond: Graph) {
        let mut collector = VertexCollector::new();
        let error = GraphError::VertexOutOfRange { index: v(9), len: 5 };
        assert_eq!(diamond.breadth_first_traversal(&mut collector, v(9)), Err(error.clone()));
        assert_eq!(diamond.depth_first_traversal(&mut collector, v(9)), Err(error));
        assert!(collector.visited().is_empty());
    }

    #[rstest]
    fn topological_order(diamond: Graph) {
        let mut collector = VertexCollector::new();
        diamond.topological_order_traversal(&mut collector).unwrap();
        assert_eq!(collector.visited(), &[v(0), v(1), v(2), v(3), v(4)]);
        assert!(!diamond.is_cyclic());
    }

    #[rstest]
    fn directed_cycle(mut diamond: Graph) {
        diamond.add_edge(v(4), v(1)).unwrap();
        let mut collector = VertexCollector::new();
        diamond.topological_order_traversal(&mut collector).unwrap();
        assert_eq!(collector.visited(), &[v(0), v(2)]);
        assert!(diamond.is_cyclic());
    }

    #[test]
    fn directed_self_loop_is_cyclic() {
        let mut graph = Graph::directed_unweighted(1);
        let a = graph.add_vertex("a").unwrap();
        assert!(!graph.is_cyclic());
        graph.add_edge(a, a).unwrap();
        assert!(graph.is_cyclic());
    }

    #[test]
    fn topological_order_requires_directed() {
        let graph = Graph::undirected_unweighted(0);
        let mut collector = VertexCollector::new();
        assert_eq!(
            graph.topological_order_traversal(&mut collector),
            Err(GraphError::NotDirected)
        );
    }

    #[test]
    fn undirected_cycles_and_connectivity() {
        let mut graph = Graph::undirected_unweighted(4);
        for name in ["a", "b", "c", "d"] {
            graph.add_vertex(name).unwrap();
        }
        graph.add_edge(v(0), v(1)).unwrap();
        graph.add_edge(v(1), v(2)).unwrap();
        assert!(!graph.is_connected());
        assert!(!graph.is_cyclic());

        graph.add_edge(v(2), v(3)).unwrap();
        assert!(graph.is_connected());
        assert!(!graph.is_cyclic());

        graph.add_edge(v(3), v(0)).unwrap();
        assert!(graph.is_cyclic());
    }

    #[rstest]
    fn strong_connectivity(mut diamond: Graph) {
        assert!(!diamond.is_strongly_connected());
        diamond.add_edge(v(4), v(0)).unwrap();
        assert!(diamond.is_strongly_connected());
    }

    #[test]
    fn empty_graph_is_connected() {
        let graph = Graph::undirected_unweighted(0);
        assert!(graph.is_connected());
        assert!(graph.is_strongly_connected());
        assert!(!graph.is_cyclic());
    }
}

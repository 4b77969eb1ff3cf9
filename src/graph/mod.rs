//! Adjacency-list graph storage.
//!
//! A [`Graph`] owns a vector of vertices, indexed by their vertex number, and
//! one ordered adjacency list per vertex. An edge only ever appears in the
//! adjacency list of its head vertex. Directedness and weightedness are two
//! independent flags of the same storage; they only influence how edges are
//! created and how incident edges are enumerated.

mod edge;
mod vertex;

use std::iter::FusedIterator;
use std::ops::Index;

use thiserror::Error;

pub use edge::Edge;
pub use vertex::Vertex;

use crate::memory::EntityIndex;
use crate::VertexIndex;

/// Edge weights, and sums of edge weights.
pub type Weight = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directedness {
    Directed,
    Undirected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weightedness {
    Weighted,
    Unweighted,
}

/// A directed or undirected, weighted or unweighted graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    /// Maximum number of vertices.
    size: usize,
    directedness: Directedness,
    weightedness: Weightedness,
    vertices: Vec<Vertex>,
    /// Outgoing edges per vertex; always as long as `vertices`.
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Creates an empty graph able to hold `size` vertices.
    pub fn new(size: usize, directedness: Directedness, weightedness: Weightedness) -> Self {
        Self {
            size,
            directedness,
            weightedness,
            vertices: Vec::with_capacity(size),
            adjacency: Vec::with_capacity(size),
        }
    }

    pub fn directed_weighted(size: usize) -> Self {
        Self::new(size, Directedness::Directed, Weightedness::Weighted)
    }

    pub fn directed_unweighted(size: usize) -> Self {
        Self::new(size, Directedness::Directed, Weightedness::Unweighted)
    }

    pub fn undirected_weighted(size: usize) -> Self {
        Self::new(size, Directedness::Undirected, Weightedness::Weighted)
    }

    pub fn undirected_unweighted(size: usize) -> Self {
        Self::new(size, Directedness::Undirected, Weightedness::Unweighted)
    }

    /// Maximum number of vertices the graph can hold.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn directedness(&self) -> Directedness {
        self.directedness
    }

    #[inline]
    pub fn weightedness(&self) -> Weightedness {
        self.weightedness
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directedness == Directedness::Directed
    }

    #[inline]
    pub fn is_weighted(&self) -> bool {
        self.weightedness == Weightedness::Weighted
    }

    /// Number of vertices in the graph.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of stored edges.
    ///
    /// Undirected connections are stored once per endpoint and therefore count twice.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Whether the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex named `name` in the first unused slot and returns its number.
    ///
    /// # Errors
    ///
    /// When the graph already holds [`Graph::size`] vertices.
    ///
    /// # Example
    ///
    /// ```
    /// # use adjgraph::Graph;
    /// let mut graph = Graph::undirected_unweighted(2);
    ///
    /// let a = graph.add_vertex("a").unwrap();
    /// let b = graph.add_vertex("b").unwrap();
    ///
    /// assert_eq!(graph[a].name(), "a");
    /// assert_eq!(graph[b].number(), b);
    /// assert!(graph.add_vertex("c").is_err());
    /// ```
    pub fn add_vertex(&mut self, name: impl Into<String>) -> Result<VertexIndex, GraphError> {
        if self.vertices.len() >= self.size {
            return Err(GraphError::CapacityExceeded {
                capacity: self.size,
            });
        }

        let number = VertexIndex::new(self.vertices.len());
        self.vertices.push(Vertex::new(name.into(), number));
        self.adjacency.push(Vec::new());
        Ok(number)
    }

    /// The vertex with the given number.
    ///
    /// # Errors
    ///
    /// When `index` is not the number of a vertex in the graph.
    pub fn vertex(&self, index: VertexIndex) -> Result<&Vertex, GraphError> {
        let i = self.check(index)?;
        Ok(&self.vertices[i])
    }

    /// The first vertex with the given name.
    pub fn vertex_by_name(&self, name: &str) -> Option<&Vertex> {
        self.vertices.iter().find(|vertex| vertex.name() == name)
    }

    /// Whether `vertex` is part of the graph, comparing name and number.
    pub fn has_vertex(&self, vertex: &Vertex) -> bool {
        self.vertices.get(vertex.number().index()) == Some(vertex)
    }

    /// The vertices in order of their numbers.
    #[inline]
    pub fn vertices(&self) -> std::slice::Iter<'_, Vertex> {
        self.vertices.iter()
    }

    /// All stored edges, grouped by head vertex in vertex order.
    pub fn edges(&self) -> Edges<'_> {
        Edges(self.adjacency.iter().flatten())
    }

    /// Adds an edge of weight zero from `u` to `v`.
    ///
    /// See [`Graph::add_weighted_edge`].
    pub fn add_edge(&mut self, u: VertexIndex, v: VertexIndex) -> Result<(), GraphError> {
        self.add_weighted_edge(u, v, 0)
    }

    /// Adds an edge from `u` to `v`.
    ///
    /// Directed graphs append the edge to the adjacency list of `u`. Undirected
    /// graphs additionally append the mirrored edge to the adjacency list of
    /// `v`. Unweighted graphs ignore the `weight` and store zero instead.
    ///
    /// # Errors
    ///
    /// When one of the endpoints is not part of the graph.
    ///
    /// # Example
    ///
    /// ```
    /// # use adjgraph::Graph;
    /// let mut graph = Graph::undirected_weighted(2);
    /// let a = graph.add_vertex("a").unwrap();
    /// let b = graph.add_vertex("b").unwrap();
    ///
    /// graph.add_weighted_edge(a, b, 3).unwrap();
    ///
    /// assert_eq!(graph.get_edge(a, b).unwrap().map(|e| e.weight()), Some(3));
    /// assert_eq!(graph.get_edge(b, a).unwrap().map(|e| e.weight()), Some(3));
    /// ```
    pub fn add_weighted_edge(
        &mut self,
        u: VertexIndex,
        v: VertexIndex,
        weight: Weight,
    ) -> Result<(), GraphError> {
        let head = self.check(u)?;
        let tail = self.check(v)?;

        let weight = match self.weightedness {
            Weightedness::Weighted => weight,
            Weightedness::Unweighted => 0,
        };

        match self.directedness {
            Directedness::Directed => {
                self.adjacency[head].push(Edge::directed(u, v, weight));
            }
            Directedness::Undirected => {
                self.adjacency[head].push(Edge::undirected(u, v, weight));
                self.adjacency[tail].push(Edge::undirected(v, u, weight));
            }
        }

        Ok(())
    }

    /// Removes a vertex together with every edge touching it.
    ///
    /// All vertices with a higher number move down by one so that the vertex
    /// numbers stay contiguous. Edges are renumbered accordingly.
    ///
    /// # Errors
    ///
    /// When `index` is not the number of a vertex in the graph.
    ///
    /// # Example
    ///
    /// ```
    /// # use adjgraph::{Graph, VertexIndex};
    /// let mut graph = Graph::directed_unweighted(3);
    /// let a = graph.add_vertex("a").unwrap();
    /// let b = graph.add_vertex("b").unwrap();
    /// let c = graph.add_vertex("c").unwrap();
    /// graph.add_edge(a, c).unwrap();
    /// graph.add_edge(b, c).unwrap();
    ///
    /// let removed = graph.remove_vertex(a).unwrap();
    /// assert_eq!(removed.name(), "a");
    ///
    /// // "c" moved from slot 2 to slot 1.
    /// let c = graph.vertex_by_name("c").unwrap().number();
    /// assert_eq!(c, VertexIndex::from(1));
    /// assert_eq!(graph.edge_count(), 1);
    /// ```
    pub fn remove_vertex(&mut self, index: VertexIndex) -> Result<Vertex, GraphError> {
        let i = self.check(index)?;

        for list in &mut self.adjacency {
            list.retain(|edge| edge.head() != index && edge.tail() != index);
        }

        let removed = self.vertices.remove(i);
        self.adjacency.remove(i);

        for (number, vertex) in self.vertices.iter_mut().enumerate().skip(i) {
            vertex.set_number(VertexIndex::new(number));
        }

        for edge in self.adjacency.iter_mut().flatten() {
            for endpoint in edge.endpoints_mut() {
                if *endpoint > index {
                    *endpoint = VertexIndex::new(endpoint.index() - 1);
                }
            }
        }

        Ok(removed)
    }

    /// Removes the edge from `u` to `v`, and its mirror in undirected graphs.
    ///
    /// Returns `false` when there is no such edge, in which case the graph is
    /// unchanged. With parallel edges only the first one is removed.
    ///
    /// # Errors
    ///
    /// When one of the endpoints is not part of the graph.
    pub fn remove_edge(&mut self, u: VertexIndex, v: VertexIndex) -> Result<bool, GraphError> {
        let head = self.check(u)?;
        let tail = self.check(v)?;

        let Some(position) = self.adjacency[head].iter().position(|edge| edge.tail() == v) else {
            return Ok(false);
        };
        let edge = self.adjacency[head].remove(position);

        if !self.is_directed() {
            let mirror = edge.reversed();
            if let Some(position) = self.adjacency[tail].iter().position(|e| *e == mirror) {
                self.adjacency[tail].remove(position);
            }
        }

        Ok(true)
    }

    /// The first edge from `u` to `v`, scanning the adjacency list of `u`.
    ///
    /// Returns `Ok(None)` when the vertices exist but are not connected.
    ///
    /// # Errors
    ///
    /// When one of the endpoints is not part of the graph.
    pub fn get_edge(&self, u: VertexIndex, v: VertexIndex) -> Result<Option<&Edge>, GraphError> {
        let head = self.check(u)?;
        self.check(v)?;
        Ok(self.adjacency[head].iter().find(|edge| edge.tail() == v))
    }

    /// Whether there is an edge from `u` to `v`.
    ///
    /// # Errors
    ///
    /// When one of the endpoints is not part of the graph.
    pub fn is_edge(&self, u: VertexIndex, v: VertexIndex) -> Result<bool, GraphError> {
        Ok(self.get_edge(u, v)?.is_some())
    }

    /// Whether the graph stores an edge equal to `edge`.
    pub fn has_edge(&self, edge: &Edge) -> bool {
        self.adjacency
            .get(edge.head().index())
            .map_or(false, |list| list.contains(edge))
    }

    /// The edges leaving `index`, in insertion order.
    ///
    /// # Errors
    ///
    /// When `index` is not the number of a vertex in the graph.
    pub fn emanating_edges(&self, index: VertexIndex) -> Result<std::slice::Iter<'_, Edge>, GraphError> {
        let i = self.check(index)?;
        Ok(self.adjacency[i].iter())
    }

    /// The edges entering `index`.
    ///
    /// For directed graphs these are the edges whose tail is `index`. For
    /// undirected graphs every connection is stored from both perspectives, so
    /// these are the same edges as [`Graph::emanating_edges`].
    ///
    /// # Errors
    ///
    /// When `index` is not the number of a vertex in the graph.
    pub fn incident_edges(&self, index: VertexIndex) -> Result<IncidentEdges<'_>, GraphError> {
        self.check(index)?;
        Ok(IncidentEdges {
            edges: self.edges(),
            vertex: index,
            directed: self.is_directed(),
        })
    }

    /// The vertices reachable over one emanating edge, in adjacency order.
    ///
    /// # Errors
    ///
    /// When `index` is not the number of a vertex in the graph.
    pub fn successors(
        &self,
        index: VertexIndex,
    ) -> Result<impl Iterator<Item = VertexIndex> + '_, GraphError> {
        Ok(self.emanating_edges(index)?.map(Edge::tail))
    }

    /// The vertices with an edge into `index`.
    ///
    /// # Errors
    ///
    /// When `index` is not the number of a vertex in the graph.
    pub fn predecessors(
        &self,
        index: VertexIndex,
    ) -> Result<impl Iterator<Item = VertexIndex> + '_, GraphError> {
        Ok(self.incident_edges(index)?.map(move |edge| edge.mate(index)))
    }

    /// Number of edges leaving `index`.
    ///
    /// # Errors
    ///
    /// When `index` is not the number of a vertex in the graph.
    pub fn out_degree(&self, index: VertexIndex) -> Result<usize, GraphError> {
        Ok(self.emanating_edges(index)?.len())
    }

    /// Number of edges entering `index`.
    ///
    /// # Errors
    ///
    /// When `index` is not the number of a vertex in the graph.
    pub fn in_degree(&self, index: VertexIndex) -> Result<usize, GraphError> {
        Ok(self.incident_edges(index)?.count())
    }

    /// Adjacency list of a vertex known to be in range.
    #[inline]
    pub(crate) fn adjacency(&self, index: VertexIndex) -> &[Edge] {
        &self.adjacency[index.index()]
    }

    pub(crate) fn check(&self, index: VertexIndex) -> Result<usize, GraphError> {
        let i = index.index();
        if i < self.vertices.len() {
            Ok(i)
        } else {
            Err(GraphError::VertexOutOfRange {
                index,
                len: self.vertices.len(),
            })
        }
    }
}

impl Index<VertexIndex> for Graph {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        self.vertex(index).expect("invalid vertex index")
    }
}

impl From<usize> for VertexIndex {
    #[inline]
    fn from(index: usize) -> Self {
        VertexIndex::new(index)
    }
}

/// Error returned by the fallible [`Graph`] operations and the algorithms built on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("vertex {index} is out of range for a graph with {len} vertices")]
    VertexOutOfRange { index: VertexIndex, len: usize },
    #[error("graph is full, it holds at most {capacity} vertices")]
    CapacityExceeded { capacity: usize },
    #[error("operation requires a directed graph")]
    NotDirected,
}

/// Iterator created by [`Graph::edges`].
#[derive(Clone)]
pub struct Edges<'a>(std::iter::Flatten<std::slice::Iter<'a, Vec<Edge>>>);

impl<'a> Iterator for Edges<'a> {
    type Item = &'a Edge;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> FusedIterator for Edges<'a> {}

/// Iterator created by [`Graph::incident_edges`].
#[derive(Clone)]
pub struct IncidentEdges<'a> {
    edges: Edges<'a>,
    vertex: VertexIndex,
    directed: bool,
}

impl<'a> Iterator for IncidentEdges<'a> {
    type Item = &'a Edge;

    fn next(&mut self) -> Option<Self::Item> {
        let vertex = self.vertex;
        if self.directed {
            self.edges.find(|edge| edge.tail() == vertex)
        } else {
            self.edges.find(|edge| edge.head() == vertex)
        }
    }
}

impl<'a> FusedIterator for IncidentEdges<'a> {}

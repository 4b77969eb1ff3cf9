use std::fmt;

use super::Weight;
use crate::VertexIndex;

/// An edge leading from its head vertex to its tail vertex.
///
/// Edges live in the adjacency list of their head vertex. An undirected
/// connection is stored as two independent edges, one in each endpoint's
/// adjacency list, with head and tail swapped. Edges of unweighted graphs have
/// weight zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    head: VertexIndex,
    tail: VertexIndex,
    weight: Weight,
    directed: bool,
}

impl Edge {
    /// Creates a directed edge `head -> tail`.
    pub fn directed(head: VertexIndex, tail: VertexIndex, weight: Weight) -> Self {
        Self {
            head,
            tail,
            weight,
            directed: true,
        }
    }

    /// Creates one half of an undirected edge `head -- tail`.
    pub fn undirected(head: VertexIndex, tail: VertexIndex, weight: Weight) -> Self {
        Self {
            head,
            tail,
            weight,
            directed: false,
        }
    }

    /// The vertex whose adjacency list holds this edge.
    #[inline]
    pub fn head(&self) -> VertexIndex {
        self.head
    }

    /// The vertex this edge leads to.
    #[inline]
    pub fn tail(&self) -> VertexIndex {
        self.tail
    }

    #[inline]
    pub fn weight(&self) -> Weight {
        self.weight
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// The endpoint opposite to `vertex`.
    ///
    /// Returns the head for any vertex that is not the head.
    #[inline]
    pub fn mate(&self, vertex: VertexIndex) -> VertexIndex {
        if vertex == self.head {
            self.tail
        } else {
            self.head
        }
    }

    /// The same connection seen from the tail's perspective.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            head: self.tail,
            tail: self.head,
            ..*self
        }
    }

    /// Whether the edge starts and ends at the same vertex.
    #[inline]
    pub fn is_loop(&self) -> bool {
        self.head == self.tail
    }

    #[inline]
    pub(crate) fn endpoints_mut(&mut self) -> [&mut VertexIndex; 2] {
        [&mut self.head, &mut self.tail]
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = if self.directed { "->" } else { "--" };
        write!(f, "{} {} {} [{}]", self.head, arrow, self.tail, self.weight)
    }
}

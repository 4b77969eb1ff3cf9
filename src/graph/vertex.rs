use std::fmt;

use crate::VertexIndex;

/// A named vertex together with its position in the owning graph.
///
/// Two vertices are equal when both their names and their numbers match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vertex {
    name: String,
    number: VertexIndex,
}

impl Vertex {
    pub(crate) fn new(name: String, number: VertexIndex) -> Self {
        Self { name, number }
    }

    /// The vertex's human readable name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The vertex's position in the vertex array of its graph.
    #[inline]
    pub fn number(&self) -> VertexIndex {
        self.number
    }

    #[inline]
    pub(crate) fn set_number(&mut self, number: VertexIndex) {
        self.number = number;
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.number)
    }
}

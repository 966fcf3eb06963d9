use contracts::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a vertex inside one [`Graph`](crate::Graph).
///
/// Ids are handed out in insertion order and are only meaningful for the
/// graph that created them. The ordering of ids is the stable vertex order
/// every deterministic iteration in the workspace relies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexId {
    /// The underlying raw integer index.
    inner: u32,
}

impl VertexId {
    /// Creates a vertex id from a raw index.
    #[ensures(ret.inner == id)]
    pub const fn new(id: u32) -> Self {
        Self { inner: id }
    }

    /// Returns the index as a usize for array access.
    #[ensures(ret == self.inner as usize)]
    pub const fn as_usize(self) -> usize {
        self.inner as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.inner)
    }
}

impl From<usize> for VertexId {
    /// Graphs never hold more than `u32::MAX` vertices; larger indexes
    /// saturate in release builds.
    #[inline]
    fn from(id: usize) -> Self {
        debug_assert!(u32::try_from(id).is_ok(), "vertex index {id} exceeds u32");
        Self {
            inner: u32::try_from(id).unwrap_or(u32::MAX),
        }
    }
}

impl From<VertexId> for usize {
    #[inline]
    fn from(id: VertexId) -> Self {
        id.inner as Self
    }
}

/// Identifier of an edge inside one [`Graph`](crate::Graph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId {
    inner: u32,
}

impl EdgeId {
    /// Creates an edge id from a raw index.
    pub const fn new(id: u32) -> Self {
        Self { inner: id }
    }

    /// Returns the index as a usize for array access.
    pub const fn as_usize(self) -> usize {
        self.inner as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.inner)
    }
}

impl From<usize> for EdgeId {
    #[inline]
    fn from(id: usize) -> Self {
        debug_assert!(u32::try_from(id).is_ok(), "edge index {id} exceeds u32");
        Self {
            inner: u32::try_from(id).unwrap_or(u32::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usize_conversions_keep_the_index() {
        let vertex = VertexId::from(41_usize);
        assert_eq!(vertex, VertexId::new(41));
        assert_eq!(usize::from(vertex), 41);
        assert_eq!(vertex.to_string(), "v41");
        assert_eq!(EdgeId::from(7_usize).as_usize(), 7);
        assert_eq!(EdgeId::from(7_usize).to_string(), "e7");
    }

    #[test]
    fn largest_index_fits() {
        let max = u32::MAX as usize;
        assert_eq!(VertexId::from(max).as_usize(), max);
    }

    #[cfg(all(debug_assertions, target_pointer_width = "64"))]
    #[test]
    #[should_panic(expected = "exceeds u32")]
    fn oversized_index_is_caught_in_debug_builds() {
        let _ = VertexId::from(u32::MAX as usize + 1);
    }
}

//! Labeled directed multigraphs for the simflood workspace.
//!
//! This crate provides the graph model the matcher operates on: vertices
//! carrying an optional handle to the element they represent plus a display
//! name, and directed edges tagged with a [`Label`]. Parallel edges and
//! self-loops are allowed because hierarchy and dependency relations can
//! coexist between the same two elements.
//!
//! [`LabelIndex`] precomputes the per-label neighborhoods the propagation
//! step needs.

mod graph;
mod id;
mod index;

pub use crate::graph::{Edge, Graph, Label, Vertex};
pub use crate::id::{EdgeId, VertexId};
pub use crate::index::{Direction, LabelIndex};

use thiserror::Error;

/// Errors raised when a graph is mutated inconsistently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The vertex id does not belong to this graph.
    #[error("Unknown vertex {vertex} (graph has {len} vertices)")]
    UnknownVertex {
        /// The offending id.
        vertex: VertexId,
        /// Number of vertices in the graph at the time of the call.
        len: usize,
    },
}

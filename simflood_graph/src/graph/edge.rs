use serde::{Deserialize, Serialize};
use std::fmt;

use crate::VertexId;

/// Category of an edge.
///
/// Similarity only propagates between edges that carry the same label.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    /// An ordinary relation, e.g. a connector line or a dependency.
    #[default]
    Default,
    /// Containment, pointing from the nested element to its container.
    Hierarchy,
}

impl Label {
    /// All labels, in their canonical order.
    pub const ALL: [Self; 2] = [Self::Default, Self::Hierarchy];
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Hierarchy => write!(f, "hierarchy"),
        }
    }
}

/// A directed, labeled edge. Edges have no identity beyond their graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    source: VertexId,
    target: VertexId,
    label: Label,
}

impl Edge {
    pub(crate) const fn new(source: VertexId, target: VertexId, label: Label) -> Self {
        Self {
            source,
            target,
            label,
        }
    }

    /// The vertex the edge leaves.
    #[must_use]
    pub const fn source(&self) -> VertexId {
        self.source
    }

    /// The vertex the edge enters.
    #[must_use]
    pub const fn target(&self) -> VertexId {
        self.target
    }

    /// The edge category.
    #[must_use]
    pub const fn label(&self) -> Label {
        self.label
    }

    /// True for an edge from a vertex to itself.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

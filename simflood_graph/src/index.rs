//! Per-label neighborhood index.
//!
//! Propagation needs, for a vertex and a label, the set of distinct
//! neighbors reached through edges of that label in one direction. The
//! index computes these once per graph so that walking the pairwise
//! connectivity graph is a pair of slice lookups.

use indexmap::IndexMap;
use itertools::Itertools;
use tracing::trace;

use crate::{Graph, Label, VertexId};

/// Direction of traversal relative to a vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow edges from source to target.
    Outgoing,
    /// Follow edges from target to source.
    Incoming,
}

impl Direction {
    /// Both directions, outgoing first.
    pub const BOTH: [Self; 2] = [Self::Outgoing, Self::Incoming];
}

type Neighborhood = IndexMap<Label, Vec<VertexId>>;

/// Distinct neighbors of every vertex, grouped by edge label.
///
/// Parallel edges with the same label collapse to a single neighbor; the
/// length of a neighbor slice is the per-label degree used when weighting
/// propagation.
#[derive(Clone, Debug)]
pub struct LabelIndex {
    /// Maps each vertex to its successors per label
    outgoing: Vec<Neighborhood>,
    /// Maps each vertex to its predecessors per label
    incoming: Vec<Neighborhood>,
}

impl LabelIndex {
    /// Builds the index for `graph`.
    pub fn build<T>(graph: &Graph<T>) -> Self {
        let outgoing = graph
            .vertex_ids()
            .map(|vertex| Self::group(graph.edges_from(vertex).map(|e| (e.label(), e.target()))))
            .collect();
        let incoming = graph
            .vertex_ids()
            .map(|vertex| Self::group(graph.edges_to(vertex).map(|e| (e.label(), e.source()))))
            .collect();

        trace!(
            "label index built for {} vertices, {} edges",
            graph.len(),
            graph.edge_count()
        );

        Self { outgoing, incoming }
    }

    fn group(edges: impl Iterator<Item = (Label, VertexId)>) -> Neighborhood {
        let mut neighborhood = Neighborhood::new();
        for (label, neighbor) in edges.unique() {
            neighborhood.entry(label).or_default().push(neighbor);
        }
        neighborhood
    }

    /// Number of indexed vertices.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.outgoing.len()
    }

    /// True if the indexed graph had no vertices.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.outgoing.is_empty()
    }

    fn table(&self, direction: Direction) -> &[Neighborhood] {
        match direction {
            Direction::Outgoing => &self.outgoing,
            Direction::Incoming => &self.incoming,
        }
    }

    /// Distinct neighbors of `vertex` through `label` edges in `direction`.
    #[must_use]
    pub fn neighbors(&self, vertex: VertexId, label: Label, direction: Direction) -> &[VertexId] {
        self.table(direction)
            .get(vertex.as_usize())
            .and_then(|by_label| by_label.get(&label))
            .map_or(&[][..], Vec::as_slice)
    }

    /// Labels for which `vertex` has at least one neighbor in `direction`,
    /// in order of first appearance.
    pub fn labels(&self, vertex: VertexId, direction: Direction) -> impl Iterator<Item = Label> + '_ {
        self.table(direction)
            .get(vertex.as_usize())
            .into_iter()
            .flat_map(|by_label| by_label.keys().copied())
    }

    /// Per-label degree: number of distinct neighbors.
    #[must_use]
    pub fn degree(&self, vertex: VertexId, label: Label, direction: Direction) -> usize {
        self.neighbors(vertex, label, direction).len()
    }

    /// Number of distinct `(label, neighbor)` links from `vertex`.
    #[must_use]
    pub fn total_degree(&self, vertex: VertexId, direction: Direction) -> usize {
        self.table(direction)
            .get(vertex.as_usize())
            .map_or(0, |by_label| by_label.values().map(Vec::len).sum())
    }
}

//! The pairwise connectivity graph.
//!
//! Vertices are pairs `(a, b)`; an arc leads from `(a1, b1)` to `(a2, b2)`
//! whenever graph A has an edge `a1 -> a2` and graph B an edge `b1 -> b2`
//! with the same label, and back from `(a2, b2)` to `(a1, b1)` along the
//! incoming direction. The graph is discovered from the seeded pairs
//! outward using the two label indexes, so pairs that can never receive
//! similarity are never enumerated.

use indexmap::IndexSet;
use simflood_graph::{Direction, LabelIndex};
use tracing::trace;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::formula::PropagationCoefficient;
use crate::mapping::VertexPair;

/// An incoming arc: position of the source pair and the arc weight.
type Arc = (u32, f64);

#[derive(Clone, Debug)]
pub(super) struct PropagationGraph {
    /// Discovered pairs; the position of a pair is its slot in score vectors
    pairs: IndexSet<VertexPair>,
    /// Incoming arcs per pair position
    incoming: Vec<Vec<Arc>>,
    arc_count: usize,
}

impl PropagationGraph {
    /// Discovers every pair reachable from `seeds`, in breadth-first order.
    pub(super) fn build(
        a: &LabelIndex,
        b: &LabelIndex,
        coefficient: &dyn PropagationCoefficient,
        seeds: impl IntoIterator<Item = VertexPair>,
    ) -> Self {
        let mut pairs: IndexSet<VertexPair> = seeds.into_iter().collect();
        let mut incoming: Vec<Vec<Arc>> = vec![Vec::new(); pairs.len()];
        let mut arc_count = 0;

        let mut cursor = 0;
        while cursor < pairs.len() {
            let source = pairs[cursor];
            for direction in Direction::BOTH {
                for label in a.labels(source.a, direction) {
                    let neighbors_b = b.neighbors(source.b, label, direction);
                    if neighbors_b.is_empty() {
                        continue;
                    }
                    let neighbors_a = a.neighbors(source.a, label, direction);
                    let weight =
                        coefficient.coefficient(label, neighbors_a.len(), neighbors_b.len());
                    if !(weight > 0.0 && weight.is_finite()) {
                        continue;
                    }

                    for &target_a in neighbors_a {
                        for &target_b in neighbors_b {
                            let (target, _) =
                                pairs.insert_full(VertexPair::new(target_a, target_b));
                            if target == incoming.len() {
                                incoming.push(Vec::new());
                            }
                            incoming[target].push((cursor as u32, weight));
                            arc_count += 1;
                        }
                    }
                }
            }
            cursor += 1;
        }

        trace!(
            "pairwise connectivity graph: {} pairs, {} arcs",
            pairs.len(),
            arc_count
        );

        Self {
            pairs,
            incoming,
            arc_count,
        }
    }

    pub(super) fn len(&self) -> usize {
        self.pairs.len()
    }

    pub(super) const fn arc_count(&self) -> usize {
        self.arc_count
    }

    pub(super) fn pairs(&self) -> impl ExactSizeIterator<Item = VertexPair> + '_ {
        self.pairs.iter().copied()
    }

    /// Sum of `input[source] * weight` over the incoming arcs of every pair.
    ///
    /// Each pair only reads `input`, so pairs are independent and may be
    /// computed in parallel; the per-pair sum always runs in arc order.
    pub(super) fn flood(&self, input: &[f64]) -> Vec<f64> {
        debug_assert_eq!(input.len(), self.pairs.len());

        #[cfg(feature = "rayon")]
        let arcs = self.incoming.par_iter();

        #[cfg(not(feature = "rayon"))]
        let arcs = self.incoming.iter();

        arcs.map(|arcs| {
            arcs.iter()
                .map(|&(source, weight)| input[source as usize] * weight)
                .sum::<f64>()
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::InverseProduct;
    use simflood_graph::{Graph, Label, VertexId};

    fn chain(len: usize) -> Graph<()> {
        let mut graph = Graph::new();
        let ids: Vec<VertexId> = (0..len).map(|i| graph.add_named(format!("n{i}"))).collect();
        for window in ids.windows(2) {
            graph.add_edge(window[0], window[1], Label::Default).unwrap();
        }
        graph
    }

    fn pair(a: u32, b: u32) -> VertexPair {
        VertexPair::new(VertexId::new(a), VertexId::new(b))
    }

    #[test]
    fn only_reachable_pairs_are_discovered() {
        let a = LabelIndex::build(&chain(4));
        let b = LabelIndex::build(&chain(4));

        let graph = PropagationGraph::build(&a, &b, &InverseProduct, [pair(0, 0)]);

        let pairs: Vec<VertexPair> = graph.pairs().collect();
        assert_eq!(pairs, [pair(0, 0), pair(1, 1), pair(2, 2), pair(3, 3)]);
        // forward and backward arc for each of the three edge pairs
        assert_eq!(graph.arc_count(), 6);
    }

    #[test]
    fn mismatched_labels_do_not_connect() {
        let mut hierarchy: Graph<()> = Graph::new();
        let child = hierarchy.add_named("child");
        let parent = hierarchy.add_named("parent");
        hierarchy.add_edge(child, parent, Label::Hierarchy).unwrap();

        let a = LabelIndex::build(&chain(2));
        let b = LabelIndex::build(&hierarchy);
        let graph = PropagationGraph::build(&a, &b, &InverseProduct, [pair(0, 0)]);

        assert_eq!(graph.len(), 1);
        assert_eq!(graph.arc_count(), 0);
    }

    #[test]
    fn flood_sums_weighted_sources() {
        let a = LabelIndex::build(&chain(2));
        let b = LabelIndex::build(&chain(2));
        let graph = PropagationGraph::build(&a, &b, &InverseProduct, [pair(0, 0)]);

        assert_eq!(graph.flood(&[0.5, 0.25]), vec![0.25, 0.5]);
    }

    #[test]
    fn zero_coefficients_drop_arcs() {
        let a = LabelIndex::build(&chain(3));
        let b = LabelIndex::build(&chain(3));
        let never = |_: Label, _: usize, _: usize| 0.0;
        let graph = PropagationGraph::build(&a, &b, &never, [pair(0, 0), pair(1, 1)]);

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.arc_count(), 0);
    }
}

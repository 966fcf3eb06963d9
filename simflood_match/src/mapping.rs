//! Sparse similarity scores over vertex pairs.

use contracts::*;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use simflood_graph::{Graph, VertexId};

use crate::seed::{SeedSimilarity, clamp_score};

/// A vertex of graph A paired with a vertex of graph B.
///
/// Pairs order by the A vertex first, then the B vertex; with insertion
/// ordered ids this is the tie-break used when two pairs score the same.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VertexPair {
    /// Vertex of graph A.
    pub a: VertexId,
    /// Vertex of graph B.
    pub b: VertexId,
}

impl VertexPair {
    /// Pairs `a` with `b`.
    #[must_use]
    pub const fn new(a: VertexId, b: VertexId) -> Self {
        Self { a, b }
    }
}

impl From<(VertexId, VertexId)> for VertexPair {
    fn from((a, b): (VertexId, VertexId)) -> Self {
        Self::new(a, b)
    }
}

impl fmt::Display for VertexPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}

/// Divides every value by the maximum so the largest becomes 1.0.
///
/// Slices that are empty, all zero or already topped at 1.0 are left
/// untouched. Returns the maximum found.
pub(crate) fn normalize_in_place(values: &mut [f64]) -> f64 {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max > 0.0 && max.is_finite() && max != 1.0 {
        for value in values.iter_mut() {
            *value /= max;
        }
    }
    max
}

/// Similarity scores keyed by [`VertexPair`].
///
/// Only non-zero scores are stored; looking up any other pair yields 0.
/// Entries keep their insertion order, which makes every traversal of a
/// mapping deterministic. Mappings produced by the flooding algorithm hold
/// finite scores in `[0, 1]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimilarityMapping {
    scores: IndexMap<VertexPair, f64>,
}

impl SimilarityMapping {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds every pair of `a` x `b` by comparing vertex names.
    ///
    /// Pairs are visited A-major in vertex insertion order. Seed values are
    /// clamped into `[0, 1]` and zero scores are not stored.
    #[debug_ensures(ret.is_normalized_range())]
    pub fn seeded<A, B>(a: &Graph<A>, b: &Graph<B>, seed: &impl SeedSimilarity) -> Self {
        let mut mapping = Self::new();
        for (id_a, vertex_a) in a.vertices() {
            for (id_b, vertex_b) in b.vertices() {
                let score = clamp_score(seed.similarity(vertex_a.name(), vertex_b.name()));
                mapping.set(VertexPair::new(id_a, id_b), score);
            }
        }
        mapping
    }

    /// Score of `pair`, 0 if absent.
    #[must_use]
    pub fn get(&self, pair: VertexPair) -> f64 {
        self.scores.get(&pair).copied().unwrap_or(0.0)
    }

    /// Sets the score of `pair`. Setting 0 removes the entry.
    pub fn set(&mut self, pair: VertexPair, score: f64) {
        debug_assert!(score.is_finite(), "non-finite score {score} for {pair}");
        if score == 0.0 {
            self.scores.shift_remove(&pair);
        } else {
            self.scores.insert(pair, score);
        }
    }

    /// Number of stored (non-zero) entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// True if no pair has a non-zero score.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Stored entries in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (VertexPair, f64)> + '_ {
        self.scores.iter().map(|(pair, score)| (*pair, *score))
    }

    /// Calls `f` for every stored entry in insertion order.
    pub fn for_each(&self, mut f: impl FnMut(VertexPair, f64)) {
        for (pair, score) in &self.scores {
            f(*pair, *score);
        }
    }

    /// Pairs with a non-zero score.
    pub fn pairs(&self) -> impl ExactSizeIterator<Item = VertexPair> + '_ {
        self.scores.keys().copied()
    }

    /// The largest stored score, 0 for an empty mapping.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.scores.values().copied().fold(0.0, f64::max)
    }

    /// Multiplies every score by `factor`. A factor of 0 clears the mapping.
    pub fn scale(&mut self, factor: f64) {
        if factor == 0.0 {
            self.scores.clear();
            return;
        }
        for score in self.scores.values_mut() {
            *score *= factor;
        }
    }

    /// Rescales so the maximum score becomes 1.0.
    ///
    /// Empty and already normalized mappings are unchanged.
    pub fn normalize_to_max(&mut self) {
        let mut values: Vec<f64> = self.scores.values().copied().collect();
        normalize_in_place(&mut values);
        for (score, normalized) in self.scores.values_mut().zip(values) {
            *score = normalized;
        }
    }

    /// Merges `other` into `self`.
    ///
    /// For every entry of `other`, the new score is `combine(own, theirs)`
    /// with `own` being 0 for pairs missing here. Entries only present in
    /// `self` are kept as they are.
    pub fn merge_with(&mut self, other: &Self, combine: impl Fn(f64, f64) -> f64) {
        for (pair, theirs) in other.iter() {
            let merged = combine(self.get(pair), theirs);
            self.set(pair, merged);
        }
    }

    /// True if every stored score lies in `[0, 1]`.
    #[must_use]
    pub fn is_normalized_range(&self) -> bool {
        self.scores
            .values()
            .all(|score| score.is_finite() && (0.0..=1.0).contains(score))
    }
}

impl FromIterator<(VertexPair, f64)> for SimilarityMapping {
    fn from_iter<I: IntoIterator<Item = (VertexPair, f64)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (pair, score) in iter {
            mapping.set(pair, score);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: u32, b: u32) -> VertexPair {
        VertexPair::new(VertexId::new(a), VertexId::new(b))
    }

    #[test]
    fn absent_pairs_score_zero() {
        let mut mapping = SimilarityMapping::new();
        mapping.set(pair(0, 1), 0.4);

        assert_eq!(mapping.get(pair(0, 1)), 0.4);
        assert_eq!(mapping.get(pair(1, 0)), 0.0);

        mapping.set(pair(0, 1), 0.0);
        assert!(mapping.is_empty());
    }

    #[test]
    fn normalize_divides_by_max() {
        let mut mapping: SimilarityMapping =
            [(pair(0, 0), 4.0), (pair(0, 1), 2.0), (pair(1, 1), 1.0)]
                .into_iter()
                .collect();

        mapping.normalize_to_max();

        assert_eq!(mapping.get(pair(0, 0)), 1.0);
        assert_eq!(mapping.get(pair(0, 1)), 0.5);
        assert_eq!(mapping.get(pair(1, 1)), 0.25);
    }

    #[test]
    fn normalize_leaves_empty_and_normalized_mappings() {
        let mut empty = SimilarityMapping::new();
        empty.normalize_to_max();
        assert!(empty.is_empty());

        let mut normalized: SimilarityMapping =
            [(pair(0, 0), 1.0), (pair(1, 1), 0.3)].into_iter().collect();
        let before = normalized.clone();
        normalized.normalize_to_max();
        assert_eq!(normalized, before);
    }

    #[test]
    fn all_zero_slice_is_left_alone() {
        let mut values = [0.0, 0.0];
        assert_eq!(normalize_in_place(&mut values), 0.0);
        assert_eq!(values, [0.0, 0.0]);
    }

    #[test]
    fn scale_and_merge() {
        let mut mapping: SimilarityMapping =
            [(pair(0, 0), 0.5), (pair(1, 1), 0.25)].into_iter().collect();
        mapping.scale(2.0);
        assert_eq!(mapping.get(pair(0, 0)), 1.0);

        let other: SimilarityMapping =
            [(pair(1, 1), 0.5), (pair(2, 2), 0.1)].into_iter().collect();
        mapping.merge_with(&other, |own, theirs| own + theirs);

        assert_eq!(mapping.get(pair(0, 0)), 1.0);
        assert_eq!(mapping.get(pair(1, 1)), 1.0);
        assert_eq!(mapping.get(pair(2, 2)), 0.1);

        mapping.scale(0.0);
        assert!(mapping.is_empty());
    }

    #[test]
    fn seeded_clamps_and_skips_zero() {
        let mut a: Graph<()> = Graph::new();
        a.add_named("x");
        a.add_named("y");
        let mut b: Graph<()> = Graph::new();
        b.add_named("x");

        let seed = |l: &str, r: &str| if l == r { 7.0 } else { -1.0 };
        let mapping = SimilarityMapping::seeded(&a, &b, &seed);

        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.get(pair(0, 0)), 1.0);
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let mapping: SimilarityMapping = [(pair(2, 0), 0.2), (pair(0, 1), 0.9), (pair(1, 1), 0.5)]
            .into_iter()
            .collect();
        let order: Vec<VertexPair> = mapping.pairs().collect();
        assert_eq!(order, [pair(2, 0), pair(0, 1), pair(1, 1)]);
    }
}

//! Ordered matching filter: many-to-many scores to a one-to-one matching.
//!
//! Candidates are ranked by score, highest first, and accepted greedily as
//! long as neither of their vertices is taken. Equal scores are broken by the
//! A vertex id and then the B vertex id, i.e. by insertion order in the two
//! graphs, so the result is fully deterministic.

use std::cmp::Ordering;

use itertools::Itertools;
use tracing::debug;

use crate::correspondence::{Correspondence, Match, MatchSource};
use crate::mapping::{SimilarityMapping, VertexPair};
use crate::seed::clamp_score;

/// Extra rank given to flooded candidates in
/// [`OrderedMatchingFilter::filter_with_seed`], placing all of them before any
/// seed candidate; seed ranks are clamped into `[0, 1]`.
const FLOODED_RANK_OFFSET: f64 = 1.0;

struct Candidate {
    rank: f64,
    inner: Match,
}

impl Candidate {
    fn cmp_rank(&self, other: &Self) -> Ordering {
        other
            .rank
            .total_cmp(&self.rank)
            .then_with(|| self.inner.pair.cmp(&other.inner.pair))
    }
}

/// Greedy, score-ordered one-to-one selection.
///
/// - min_similarity: pairs scoring below it are never accepted.
/// - predicate: optional validity check (e.g. "same element kind"); pairs it
///   rejects are skipped without consuming their vertices.
pub struct OrderedMatchingFilter<'p> {
    min_similarity: f64,
    predicate: Option<Box<dyn Fn(VertexPair) -> bool + 'p>>,
}

impl Default for OrderedMatchingFilter<'_> {
    /// Accepts any pair with a non-zero score.
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl<'p> OrderedMatchingFilter<'p> {
    /// Creates a filter accepting pairs scoring at least `min_similarity`.
    #[must_use]
    pub const fn new(min_similarity: f64) -> Self {
        Self {
            min_similarity,
            predicate: None,
        }
    }

    /// Only accepts pairs for which `predicate` holds.
    #[must_use]
    pub fn with_predicate(mut self, predicate: impl Fn(VertexPair) -> bool + 'p) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// The acceptance threshold.
    #[must_use]
    pub const fn min_similarity(&self) -> f64 {
        self.min_similarity
    }

    /// Selects a one-to-one correspondence from flooded scores.
    #[must_use]
    pub fn filter(&self, mapping: &SimilarityMapping) -> Correspondence {
        self.select(Self::flooded_candidates(mapping, self.min_similarity, 0.0))
    }

    /// Like [`filter`](Self::filter), but afterwards also offers seed pairs
    /// scoring at least `seed_threshold`.
    ///
    /// Every flooded candidate ranks before every seed candidate, so seed
    /// scores only decide vertices the flooded scores left unmatched. Seed
    /// scores outside `[0, 1]` are ranked as if clamped.
    #[must_use]
    pub fn filter_with_seed(
        &self,
        mapping: &SimilarityMapping,
        seed: &SimilarityMapping,
        seed_threshold: f64,
    ) -> Correspondence {
        let seeds = seed
            .iter()
            .filter(|&(_, score)| score >= seed_threshold)
            .map(|(pair, score)| Candidate {
                rank: clamp_score(score),
                inner: Match {
                    pair,
                    score,
                    source: MatchSource::Seed,
                },
            });

        self.select(
            Self::flooded_candidates(mapping, self.min_similarity, FLOODED_RANK_OFFSET)
                .chain(seeds),
        )
    }

    fn flooded_candidates(
        mapping: &SimilarityMapping,
        min_similarity: f64,
        offset: f64,
    ) -> impl Iterator<Item = Candidate> + '_ {
        mapping
            .iter()
            .filter(move |&(_, score)| score > 0.0 && score >= min_similarity)
            .map(move |(pair, score)| Candidate {
                rank: score + offset,
                inner: Match {
                    pair,
                    score,
                    source: MatchSource::Flooded,
                },
            })
    }

    fn select(&self, candidates: impl Iterator<Item = Candidate>) -> Correspondence {
        let mut correspondence = Correspondence::default();
        let mut rejected = 0_usize;
        for candidate in candidates.sorted_by(Candidate::cmp_rank) {
            let pair = candidate.inner.pair;
            if !correspondence.is_free(pair) {
                continue;
            }
            if self.predicate.as_ref().is_some_and(|valid| !valid(pair)) {
                rejected += 1;
                continue;
            }
            correspondence.accept(candidate.inner);
        }

        debug!(
            "ordered matching accepted {} pairs ({} rejected by predicate)",
            correspondence.len(),
            rejected
        );
        correspondence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simflood_graph::VertexId;

    fn pair(a: u32, b: u32) -> VertexPair {
        VertexPair::new(VertexId::new(a), VertexId::new(b))
    }

    #[test]
    fn greedy_takes_best_pairs_first() {
        let mapping: SimilarityMapping = [
            (pair(0, 0), 0.9),
            (pair(0, 1), 1.0),
            (pair(1, 1), 0.8),
            (pair(1, 0), 0.7),
        ]
        .into_iter()
        .collect();

        let correspondence = OrderedMatchingFilter::default().filter(&mapping);

        let pairs: Vec<VertexPair> = correspondence.pairs().collect();
        assert_eq!(pairs, [pair(0, 1), pair(1, 0)]);
    }

    #[test]
    fn ties_break_by_insertion_order() {
        let mapping: SimilarityMapping = [(pair(1, 0), 0.5), (pair(0, 1), 0.5), (pair(0, 0), 0.5)]
            .into_iter()
            .collect();

        let correspondence = OrderedMatchingFilter::default().filter(&mapping);

        let pairs: Vec<VertexPair> = correspondence.pairs().collect();
        assert_eq!(pairs, [pair(0, 0)]);
    }

    #[test]
    fn threshold_is_inclusive() {
        let mapping: SimilarityMapping = [(pair(0, 0), 0.3), (pair(1, 1), 0.29)]
            .into_iter()
            .collect();

        let correspondence = OrderedMatchingFilter::new(0.3).filter(&mapping);

        assert_eq!(correspondence.len(), 1);
        assert!(correspondence.contains(pair(0, 0)));
    }

    #[test]
    fn predicate_skips_without_consuming() {
        let mapping: SimilarityMapping = [(pair(0, 0), 1.0), (pair(0, 1), 0.5)]
            .into_iter()
            .collect();

        let correspondence = OrderedMatchingFilter::default()
            .with_predicate(|p| p.b != VertexId::new(0))
            .filter(&mapping);

        let pairs: Vec<VertexPair> = correspondence.pairs().collect();
        assert_eq!(pairs, [pair(0, 1)]);
    }

    #[test]
    fn seed_fills_unmatched_vertices_only() {
        let flooded: SimilarityMapping = [(pair(0, 0), 0.2)].into_iter().collect();
        let seed: SimilarityMapping = [(pair(0, 1), 0.95), (pair(1, 1), 0.9), (pair(2, 2), 0.4)]
            .into_iter()
            .collect();

        let correspondence = OrderedMatchingFilter::default().filter_with_seed(&flooded, &seed, 0.68);

        let matches: Vec<(VertexPair, MatchSource)> =
            correspondence.iter().map(|m| (m.pair, m.source)).collect();
        assert_eq!(
            matches,
            [
                (pair(0, 0), MatchSource::Flooded),
                (pair(1, 1), MatchSource::Seed)
            ]
        );
    }

    #[test]
    fn oversized_seed_scores_still_rank_after_flooded_pairs() {
        let flooded: SimilarityMapping = [(pair(0, 0), 0.2)].into_iter().collect();
        let seed: SimilarityMapping = [(pair(0, 1), 5.0), (pair(1, 1), 3.0)].into_iter().collect();

        let correspondence = OrderedMatchingFilter::default().filter_with_seed(&flooded, &seed, 0.5);

        let matches: Vec<(VertexPair, MatchSource)> =
            correspondence.iter().map(|m| (m.pair, m.source)).collect();
        assert_eq!(
            matches,
            [
                (pair(0, 0), MatchSource::Flooded),
                (pair(1, 1), MatchSource::Seed)
            ]
        );
    }
}

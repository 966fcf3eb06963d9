//! One-to-one vertex correspondence between two graphs.

use contracts::*;
use std::collections::HashMap;

use simflood_graph::VertexId;

use crate::mapping::VertexPair;

/// Where an accepted pair came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MatchSource {
    /// Selected by its flooded score.
    Flooded,
    /// Selected by its seed score after the flooded candidates ran out.
    Seed,
}

/// One accepted pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match {
    /// The matched vertices.
    pub pair: VertexPair,
    /// The score the pair was selected with.
    pub score: f64,
    /// Which mapping supplied the score.
    pub source: MatchSource,
}

/// A partial injective mapping from the vertices of graph A to graph B.
///
/// Built only by [`OrderedMatchingFilter`](crate::OrderedMatchingFilter) and
/// immutable afterwards. Matches are kept in acceptance order, which is
/// descending score order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Correspondence {
    matches: Vec<Match>,
    /// A vertex to position in `matches`
    by_a: HashMap<VertexId, usize>,
    /// B vertex to position in `matches`
    by_b: HashMap<VertexId, usize>,
}

impl Correspondence {
    /// Checks that both lookup tables agree with the match list.
    pub(crate) fn is_consistent(&self) -> bool {
        self.by_a.len() == self.matches.len()
            && self.by_b.len() == self.matches.len()
            && self.matches.iter().enumerate().all(|(idx, m)| {
                self.by_a.get(&m.pair.a) == Some(&idx) && self.by_b.get(&m.pair.b) == Some(&idx)
            })
    }

    /// True if neither endpoint of `pair` is matched yet.
    pub(crate) fn is_free(&self, pair: VertexPair) -> bool {
        !self.by_a.contains_key(&pair.a) && !self.by_b.contains_key(&pair.b)
    }

    /// Records an accepted pair. Both endpoints must be free.
    #[debug_requires(self.is_free(accepted.pair))]
    #[debug_ensures(self.is_consistent())]
    pub(crate) fn accept(&mut self, accepted: Match) {
        let idx = self.matches.len();
        self.by_a.insert(accepted.pair.a, idx);
        self.by_b.insert(accepted.pair.b, idx);
        self.matches.push(accepted);
    }

    /// The B vertex matched to `a`.
    #[must_use]
    pub fn get(&self, a: VertexId) -> Option<VertexId> {
        self.by_a.get(&a).map(|&idx| self.matches[idx].pair.b)
    }

    /// The A vertex matched to `b`.
    #[must_use]
    pub fn get_reverse(&self, b: VertexId) -> Option<VertexId> {
        self.by_b.get(&b).map(|&idx| self.matches[idx].pair.a)
    }

    /// Score with which `a` was matched.
    #[must_use]
    pub fn score(&self, a: VertexId) -> Option<f64> {
        self.by_a.get(&a).map(|&idx| self.matches[idx].score)
    }

    /// True if exactly this pair was accepted.
    #[must_use]
    pub fn contains(&self, pair: VertexPair) -> bool {
        self.get(pair.a) == Some(pair.b)
    }

    /// Accepted matches in acceptance order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Match> + '_ {
        self.matches.iter()
    }

    /// Accepted pairs in acceptance order.
    pub fn pairs(&self) -> impl ExactSizeIterator<Item = VertexPair> + '_ {
        self.matches.iter().map(|m| m.pair)
    }

    /// Number of matched pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.matches.len()
    }

    /// True if nothing was matched.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

impl<'a> IntoIterator for &'a Correspondence {
    type Item = &'a Match;
    type IntoIter = std::slice::Iter<'a, Match>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flooded(a: u32, b: u32, score: f64) -> Match {
        Match {
            pair: VertexPair::new(VertexId::new(a), VertexId::new(b)),
            score,
            source: MatchSource::Flooded,
        }
    }

    #[test]
    fn lookups_in_both_directions() {
        let mut correspondence = Correspondence::default();
        correspondence.accept(flooded(0, 2, 1.0));
        correspondence.accept(flooded(1, 0, 0.5));

        assert_eq!(correspondence.get(VertexId::new(0)), Some(VertexId::new(2)));
        assert_eq!(correspondence.get_reverse(VertexId::new(0)), Some(VertexId::new(1)));
        assert_eq!(correspondence.score(VertexId::new(1)), Some(0.5));
        assert_eq!(correspondence.get(VertexId::new(2)), None);
        assert!(correspondence.contains(VertexPair::new(VertexId::new(0), VertexId::new(2))));
        assert!(correspondence.is_consistent());
    }

    #[test]
    fn used_endpoints_are_not_free() {
        let mut correspondence = Correspondence::default();
        correspondence.accept(flooded(0, 0, 1.0));

        assert!(!correspondence.is_free(VertexPair::new(VertexId::new(0), VertexId::new(1))));
        assert!(!correspondence.is_free(VertexPair::new(VertexId::new(1), VertexId::new(0))));
        assert!(correspondence.is_free(VertexPair::new(VertexId::new(1), VertexId::new(1))));
    }
}

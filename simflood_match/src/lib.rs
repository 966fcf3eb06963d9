//! Similarity flooding: structural matching of two labeled graphs.
//!
//! The matcher takes two [`Graph`]s and a seed similarity between their
//! vertices (usually a textual comparison of the vertex names), floods that
//! similarity along edges both graphs agree on, and finally extracts a
//! one-to-one correspondence from the converged scores.
//!
//! The algorithm follows S. Melnik, H. Garcia-Molina and E. Rahm,
//! "Similarity flooding: a versatile graph matching algorithm and its
//! application to schema matching", ICDE 2002.
//!
//! Quick example
//! ```ignore
//! use simflood_graph::{Graph, Label};
//! use simflood_match::{GraphMatcher, MatchConfig};
//!
//! let mut a: Graph<()> = Graph::new();
//! let x = a.add_named("x");
//! let y = a.add_named("y");
//! a.add_edge(x, y, Label::Default)?;
//!
//! let matcher = GraphMatcher::new(MatchConfig::default())?;
//! let matching = matcher.run(&a, &a, &|l: &str, r: &str| f64::from(u8::from(l == r)))?;
//! assert_eq!(matching.correspondence.get(x), Some(x));
//! ```

mod config;
mod correspondence;
mod filter;
mod flooding;
mod formula;
mod mapping;
mod seed;

pub use crate::config::{
    CoefficientKind, FilterConfig, FixpointKind, FloodingConfig, FloodingConfigBuilder,
    MatchConfig, ResidualNorm,
};
pub use crate::correspondence::{Correspondence, Match, MatchSource};
pub use crate::filter::OrderedMatchingFilter;
pub use crate::flooding::{FloodingOutcome, FloodingState, SimilarityFlooding};
pub use crate::formula::{
    Basic, FixpointA, FixpointB, FixpointC, FixpointFormula, FloodInput, InverseAverage,
    InverseProduct, PropagationCoefficient,
};
pub use crate::mapping::{SimilarityMapping, VertexPair};
pub use crate::seed::{SeedSimilarity, Thresholded, clamp_score};

pub use simflood_graph::{Graph, Label, VertexId};

use thiserror::Error;
use tracing::info;

/// Errors reported by the matcher.
///
/// Everything the algorithm can run into during flooding (empty graphs,
/// zero degrees, an exhausted iteration cap) is handled in-band; only
/// invalid parameters and inputs that do not belong to the matched graphs
/// are errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// Epsilon was negative or not a number.
    #[error("Epsilon must be finite and non-negative, got {0}")]
    InvalidEpsilon(f64),

    /// A similarity threshold was not a number.
    #[error("Similarity threshold must not be NaN")]
    InvalidThreshold,

    /// A seed entry names a vertex that is not part of the matched graphs.
    #[error("Seed pair {pair} is outside the matched graphs ({len_a} x {len_b} vertices)")]
    UnknownPair {
        /// The offending pair.
        pair: VertexPair,
        /// Vertex count of graph A.
        len_a: usize,
        /// Vertex count of graph B.
        len_b: usize,
    },
}

/// The result of [`GraphMatcher::run`].
#[derive(Clone, Debug)]
pub struct Matching {
    /// The seed the flooding started from.
    pub seed: SimilarityMapping,
    /// Raw flooding result: scores and termination state.
    pub outcome: FloodingOutcome,
    /// The one-to-one correspondence extracted from the scores.
    pub correspondence: Correspondence,
}

/// Seeds, floods and filters in one call.
///
/// This is the entry point for callers that only want the final matching;
/// [`SimilarityFlooding`] and [`OrderedMatchingFilter`] remain available
/// for finer control (custom formulas, validity predicates).
pub struct GraphMatcher {
    flooding: SimilarityFlooding,
    filter: FilterConfig,
}

impl GraphMatcher {
    /// Creates a matcher from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if epsilon or a threshold is invalid.
    pub fn new(config: MatchConfig) -> Result<Self, MatchError> {
        config.filter.validate()?;
        Ok(Self {
            flooding: SimilarityFlooding::new(config.flooding)?,
            filter: config.filter,
        })
    }

    /// The flooding stage.
    #[must_use]
    pub const fn flooding(&self) -> &SimilarityFlooding {
        &self.flooding
    }

    /// Matches `a` against `b`, seeding every vertex pair with `seed`
    /// applied to the vertex names.
    ///
    /// # Errors
    ///
    /// Never fails for a seed built from the graphs themselves; the error
    /// type is shared with [`SimilarityFlooding::run`].
    pub fn run<A, B>(
        &self,
        a: &Graph<A>,
        b: &Graph<B>,
        seed: &impl SeedSimilarity,
    ) -> Result<Matching, MatchError> {
        let seed = SimilarityMapping::seeded(a, b, seed);
        let outcome = self.flooding.run(a, b, &seed)?;

        let filter = OrderedMatchingFilter::new(self.filter.min_similarity);
        let correspondence = match self.filter.seed_threshold {
            Some(threshold) => filter.filter_with_seed(&outcome.mapping, &seed, threshold),
            None => filter.filter(&outcome.mapping),
        };

        info!(
            "matched {} of {} x {} vertices ({:?} after {} iterations)",
            correspondence.len(),
            a.len(),
            b.len(),
            outcome.state,
            outcome.iterations
        );

        Ok(Matching {
            seed,
            outcome,
            correspondence,
        })
    }
}

//! The similarity flooding fixpoint iteration.

mod propagation;

use std::borrow::Cow;
use std::fmt;

use contracts::*;
use simflood_graph::{Graph, LabelIndex};
use tracing::{debug, info};

use crate::MatchError;
use crate::config::FloodingConfig;
use crate::formula::{FixpointFormula, FloodInput, PropagationCoefficient};
use crate::mapping::{SimilarityMapping, normalize_in_place};
use crate::seed::{SeedSimilarity, clamp_score};

use propagation::PropagationGraph;

/// Phase of a flooding run.
///
/// A run starts in `Building`, moves to `Iterating` once the pairwise
/// connectivity graph exists, and ends in one of the two terminal states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloodingState {
    /// Discovering pairs and seeding their scores.
    Building,
    /// Running the given (1-based) iteration.
    Iterating(usize),
    /// The residual dropped to epsilon or below.
    Converged,
    /// The iteration cap was reached first; the scores are best effort.
    Exhausted,
}

impl FloodingState {
    /// True for `Converged` and `Exhausted`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Converged | Self::Exhausted)
    }
}

/// Result of [`SimilarityFlooding::run`].
#[derive(Clone, Debug)]
pub struct FloodingOutcome {
    /// Final scores, normalized so the best pair scores 1.0.
    pub mapping: SimilarityMapping,
    /// `Converged` or `Exhausted`.
    pub state: FloodingState,
    /// Iterations performed.
    pub iterations: usize,
    /// Residual after each iteration, in order.
    pub residuals: Vec<f64>,
}

impl FloodingOutcome {
    /// True if the run reached its fixpoint within the iteration cap.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.state == FloodingState::Converged
    }

    /// Residual of the last iteration, `None` if no iteration ran.
    #[must_use]
    pub fn residual(&self) -> Option<f64> {
        self.residuals.last().copied()
    }
}

/// Similarity flooding over two labeled graphs.
///
/// The formulas are strategies fixed at construction; a single instance can
/// match any number of graph pairs, and runs share no state.
pub struct SimilarityFlooding {
    config: FloodingConfig,
    coefficient: Box<dyn PropagationCoefficient>,
    fixpoint: Box<dyn FixpointFormula>,
}

impl fmt::Debug for SimilarityFlooding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimilarityFlooding")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SimilarityFlooding {
    /// Creates an instance using the formulas named in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidEpsilon`] if the configuration is invalid.
    pub fn new(config: FloodingConfig) -> Result<Self, MatchError> {
        let coefficient = config.coefficient.formula();
        let fixpoint = config.fixpoint.formula();
        Self::from_parts(config, coefficient, fixpoint)
    }

    /// Creates an instance with caller-supplied formulas.
    ///
    /// The `coefficient` and `fixpoint` fields of `config` are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidEpsilon`] if the configuration is invalid.
    pub fn with_formulas(
        config: FloodingConfig,
        coefficient: impl PropagationCoefficient + 'static,
        fixpoint: impl FixpointFormula + 'static,
    ) -> Result<Self, MatchError> {
        Self::from_parts(config, Box::new(coefficient), Box::new(fixpoint))
    }

    fn from_parts(
        config: FloodingConfig,
        coefficient: Box<dyn PropagationCoefficient>,
        fixpoint: Box<dyn FixpointFormula>,
    ) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self {
            config,
            coefficient,
            fixpoint,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &FloodingConfig {
        &self.config
    }

    /// Seeds every pair with `seed` applied to the vertex names, then floods.
    ///
    /// # Errors
    ///
    /// Never fails; see [`run`](Self::run).
    pub fn run_seeded<A, B>(
        &self,
        a: &Graph<A>,
        b: &Graph<B>,
        seed: &impl SeedSimilarity,
    ) -> Result<FloodingOutcome, MatchError> {
        self.run(a, b, &SimilarityMapping::seeded(a, b, seed))
    }

    /// Floods `seed` over the pairwise connectivity graph of `a` and `b`.
    ///
    /// Seed scores are clamped into `[0, 1]`. The returned mapping holds every
    /// pair with non-zero final score. When no two edges of the graphs can be
    /// paired there is nothing to propagate and the clamped seed is returned
    /// as converged after zero iterations.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::UnknownPair`] if `seed` mentions a vertex that
    /// does not exist in `a` or `b`.
    #[debug_ensures(ret.is_err() || ret.as_ref().is_ok_and(|o| o.mapping.is_normalized_range()))]
    #[debug_ensures(ret.is_err() || ret.as_ref().is_ok_and(|o| o.state.is_terminal()))]
    pub fn run<A, B>(
        &self,
        a: &Graph<A>,
        b: &Graph<B>,
        seed: &SimilarityMapping,
    ) -> Result<FloodingOutcome, MatchError> {
        if let Some(pair) = seed.pairs().find(|p| !a.contains(p.a) || !b.contains(p.b)) {
            return Err(MatchError::UnknownPair {
                pair,
                len_a: a.len(),
                len_b: b.len(),
            });
        }

        let mut state = FloodingState::Building;
        debug!("{state:?}: {} x {} vertices, {} seeded pairs", a.len(), b.len(), seed.len());

        let index_a = LabelIndex::build(a);
        let index_b = LabelIndex::build(b);
        let graph = PropagationGraph::build(&index_a, &index_b, &*self.coefficient, seed.pairs());

        let initial: Vec<f64> = graph.pairs().map(|pair| clamp_score(seed.get(pair))).collect();

        if graph.arc_count() == 0 {
            info!("no pairable edges; seed of {} pairs is final", graph.len());
            return Ok(Self::finish(&graph, initial, FloodingState::Converged, Vec::new()));
        }

        let mut previous = initial.clone();
        let mut residuals = Vec::new();

        for iteration in 1..=self.config.max_iterations {
            state = FloodingState::Iterating(iteration);

            let next = self.step(&graph, &initial, &previous);
            let residual = self.config.residual.between(&previous, &next);
            residuals.push(residual);
            previous = next;

            debug!("{state:?}: residual {residual:.6}");

            if residual <= self.config.epsilon {
                state = FloodingState::Converged;
                break;
            }
        }

        if !state.is_terminal() {
            state = FloodingState::Exhausted;
        }

        info!(
            "flooding {:?} after {} iterations over {} pairs ({} arcs)",
            state,
            residuals.len(),
            graph.len(),
            graph.arc_count()
        );

        Ok(Self::finish(&graph, previous, state, residuals))
    }

    /// One synchronous iteration: propagate, combine, normalize.
    fn step(&self, graph: &PropagationGraph, initial: &[f64], previous: &[f64]) -> Vec<f64> {
        let input: Cow<'_, [f64]> = match self.fixpoint.flood_input() {
            FloodInput::Previous => Cow::Borrowed(previous),
            FloodInput::SeedAndPrevious => {
                Cow::Owned(initial.iter().zip(previous).map(|(s, p)| s + p).collect())
            }
        };

        let increments = graph.flood(&input);

        let mut next: Vec<f64> = increments
            .iter()
            .zip(initial.iter().zip(previous))
            .map(|(&increment, (&seed, &prev))| {
                let score = self.fixpoint.combine(seed, prev, increment);
                if score.is_finite() && score > 0.0 { score } else { 0.0 }
            })
            .collect();

        normalize_in_place(&mut next);
        next
    }

    fn finish(
        graph: &PropagationGraph,
        scores: Vec<f64>,
        state: FloodingState,
        residuals: Vec<f64>,
    ) -> FloodingOutcome {
        let mapping = graph.pairs().zip(scores).collect();
        FloodingOutcome {
            mapping,
            state,
            iterations: residuals.len(),
            residuals,
        }
    }
}

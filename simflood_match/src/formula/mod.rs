//! Pluggable formulas of the flooding algorithm.
//!
//! Two computations differ between variants of similarity flooding:
//! - how much of a pair's score flows along one edge of the pairwise
//!   connectivity graph ([`PropagationCoefficient`]);
//! - how a pair's seed, previous score and received increment combine into
//!   its next score ([`FixpointFormula`]).
//!
//! Both are traits, injected into
//! [`SimilarityFlooding`](crate::SimilarityFlooding) at construction.

mod coefficient;
mod fixpoint;

pub use coefficient::{InverseAverage, InverseProduct, PropagationCoefficient};
pub use fixpoint::{Basic, FixpointA, FixpointB, FixpointC, FixpointFormula, FloodInput};

/// Which scores are propagated in an iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloodInput {
    /// The previous iteration's scores, σⁱ.
    Previous,
    /// The seed plus the previous scores, σ⁰ + σⁱ.
    SeedAndPrevious,
}

/// Computes a pair's next score.
///
/// Every iteration first propagates the scores selected by
/// [`flood_input`](Self::flood_input) along the pairwise connectivity graph,
/// reading only from the previous iteration. The increment a pair receives
/// is then combined with its seed and previous score; the resulting mapping
/// is normalized afterwards, so `combine` may return values above 1.
pub trait FixpointFormula: Send + Sync {
    /// Scores fed into propagation.
    fn flood_input(&self) -> FloodInput {
        FloodInput::Previous
    }

    /// Unnormalized next score of one pair.
    fn combine(&self, seed: f64, previous: f64, increment: f64) -> f64;
}

/// σⁱ⁺¹ = σⁱ + φ(σⁱ)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Basic;

impl FixpointFormula for Basic {
    fn combine(&self, _seed: f64, previous: f64, increment: f64) -> f64 {
        previous + increment
    }
}

/// σⁱ⁺¹ = σ⁰ + φ(σⁱ)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixpointA;

impl FixpointFormula for FixpointA {
    fn combine(&self, seed: f64, _previous: f64, increment: f64) -> f64 {
        seed + increment
    }
}

/// σⁱ⁺¹ = φ(σ⁰ + σⁱ)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixpointB;

impl FixpointFormula for FixpointB {
    fn flood_input(&self) -> FloodInput {
        FloodInput::SeedAndPrevious
    }

    fn combine(&self, _seed: f64, _previous: f64, increment: f64) -> f64 {
        increment
    }
}

/// σⁱ⁺¹ = σ⁰ + σⁱ + φ(σ⁰ + σⁱ)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixpointC;

impl FixpointFormula for FixpointC {
    fn flood_input(&self) -> FloodInput {
        FloodInput::SeedAndPrevious
    }

    fn combine(&self, seed: f64, previous: f64, increment: f64) -> f64 {
        seed + previous + increment
    }
}

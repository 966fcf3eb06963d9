//! Configuration for similarity flooding and result filtering.
//!
//! Everything the matcher can be tuned with is passed explicitly through
//! these types; there is no global state.
//!
//! Quick examples
//!
//! Defaults (basic fixpoint, inverse-product coefficients, max-abs residual):
//! ```ignore
//! use simflood_match::FloodingConfig;
//! let cfg = FloodingConfig::default();
//! ```
//!
//! The setup used in the similarity flooding paper:
//! ```ignore
//! use simflood_match::{FloodingConfig, ResidualNorm};
//! let cfg = FloodingConfig::builder()
//!     .epsilon(0.075)
//!     .max_iterations(100)
//!     .residual(ResidualNorm::Euclidean)
//!     .build();
//! ```

use serde::{Deserialize, Serialize};

use crate::MatchError;
use crate::formula::{
    Basic, FixpointA, FixpointB, FixpointC, FixpointFormula, InverseAverage, InverseProduct,
    PropagationCoefficient,
};

/// Default stop threshold.
pub const DEFAULT_EPSILON: f64 = 0.075;
/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// How the change between two iterations is measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResidualNorm {
    /// Largest absolute change of any single pair.
    #[default]
    MaxAbs,
    /// Euclidean distance of the two score vectors.
    Euclidean,
}

impl ResidualNorm {
    /// Distance between two score vectors of equal length.
    #[must_use]
    pub fn between(self, previous: &[f64], next: &[f64]) -> f64 {
        debug_assert_eq!(previous.len(), next.len());
        let deltas = previous.iter().zip(next).map(|(p, n)| (p - n).abs());
        match self {
            Self::MaxAbs => deltas.fold(0.0, f64::max),
            Self::Euclidean => deltas.map(|d| d * d).sum::<f64>().sqrt(),
        }
    }
}

/// Built-in propagation coefficient formulas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoefficientKind {
    /// See [`InverseProduct`].
    #[default]
    InverseProduct,
    /// See [`InverseAverage`].
    InverseAverage,
}

impl CoefficientKind {
    /// Instantiates the formula.
    #[must_use]
    pub fn formula(self) -> Box<dyn PropagationCoefficient> {
        match self {
            Self::InverseProduct => Box::new(InverseProduct),
            Self::InverseAverage => Box::new(InverseAverage),
        }
    }
}

/// Built-in fixpoint formulas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixpointKind {
    /// See [`Basic`].
    #[default]
    Basic,
    /// See [`FixpointA`].
    A,
    /// See [`FixpointB`].
    B,
    /// See [`FixpointC`].
    C,
}

impl FixpointKind {
    /// Instantiates the formula.
    #[must_use]
    pub fn formula(self) -> Box<dyn FixpointFormula> {
        match self {
            Self::Basic => Box::new(Basic),
            Self::A => Box::new(FixpointA),
            Self::B => Box::new(FixpointB),
            Self::C => Box::new(FixpointC),
        }
    }
}

/// Parameters of the flooding iteration.
///
/// - epsilon: iteration stops once the residual between two consecutive
///   iterations is at most this value.
/// - max_iterations: hard cap; reaching it is reported, not treated as a
///   failure.
/// - residual: how the residual is measured.
/// - coefficient / fixpoint: which built-in formulas to use. Custom formulas
///   bypass these through
///   [`SimilarityFlooding::with_formulas`](crate::SimilarityFlooding::with_formulas).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloodingConfig {
    /// Convergence threshold.
    pub epsilon: f64,
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Residual measure.
    pub residual: ResidualNorm,
    /// Propagation coefficient formula.
    pub coefficient: CoefficientKind,
    /// Fixpoint formula.
    pub fixpoint: FixpointKind,
}

impl Default for FloodingConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            residual: ResidualNorm::default(),
            coefficient: CoefficientKind::default(),
            fixpoint: FixpointKind::default(),
        }
    }
}

impl FloodingConfig {
    /// Starts a builder from the defaults.
    #[must_use]
    pub fn builder() -> FloodingConfigBuilder {
        FloodingConfigBuilder::default()
    }

    /// Checks the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidEpsilon`] for a negative, infinite or NaN
    /// epsilon.
    pub fn validate(&self) -> Result<(), MatchError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(MatchError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }
}

/// Builder for [`FloodingConfig`].
#[derive(Clone, Debug, Default)]
pub struct FloodingConfigBuilder {
    config: FloodingConfig,
}

impl FloodingConfigBuilder {
    /// Sets the convergence threshold.
    #[must_use]
    pub const fn epsilon(mut self, epsilon: f64) -> Self {
        self.config.epsilon = epsilon;
        self
    }

    /// Sets the iteration cap.
    #[must_use]
    pub const fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.max_iterations = max_iterations;
        self
    }

    /// Sets the residual measure.
    #[must_use]
    pub const fn residual(mut self, residual: ResidualNorm) -> Self {
        self.config.residual = residual;
        self
    }

    /// Selects the propagation coefficient formula.
    #[must_use]
    pub const fn coefficient(mut self, coefficient: CoefficientKind) -> Self {
        self.config.coefficient = coefficient;
        self
    }

    /// Selects the fixpoint formula.
    #[must_use]
    pub const fn fixpoint(mut self, fixpoint: FixpointKind) -> Self {
        self.config.fixpoint = fixpoint;
        self
    }

    /// Finishes the configuration.
    #[must_use]
    pub fn build(self) -> FloodingConfig {
        self.config
    }
}

/// Parameters of the ordered matching filter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Pairs scoring below this value are never accepted.
    pub min_similarity: f64,
    /// When set, seed pairs scoring at least this value are offered after
    /// all flooded pairs, filling vertices flooding left unmatched.
    pub seed_threshold: Option<f64>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_similarity: 0.0,
            seed_threshold: None,
        }
    }
}

impl FilterConfig {
    /// Checks the thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::InvalidThreshold`] if a threshold is NaN.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.min_similarity.is_nan() || self.seed_threshold.is_some_and(f64::is_nan) {
            return Err(MatchError::InvalidThreshold);
        }
        Ok(())
    }
}

/// Flooding and filtering parameters together.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Flooding stage.
    pub flooding: FloodingConfig,
    /// Filter stage.
    pub filter: FilterConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let cfg = FloodingConfig::builder()
            .epsilon(0.01)
            .max_iterations(5)
            .residual(ResidualNorm::Euclidean)
            .fixpoint(FixpointKind::C)
            .build();

        assert_eq!(cfg.epsilon, 0.01);
        assert_eq!(cfg.max_iterations, 5);
        assert_eq!(cfg.residual, ResidualNorm::Euclidean);
        assert_eq!(cfg.coefficient, CoefficientKind::InverseProduct);
        assert_eq!(cfg.fixpoint, FixpointKind::C);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let negative = FloodingConfig::builder().epsilon(-1.0).build();
        assert_eq!(negative.validate(), Err(MatchError::InvalidEpsilon(-1.0)));
        assert!(FloodingConfig::builder().epsilon(f64::NAN).build().validate().is_err());
        assert_eq!(
            FloodingConfig::builder().epsilon(f64::INFINITY).build().validate(),
            Err(MatchError::InvalidEpsilon(f64::INFINITY))
        );
        assert!(FloodingConfig::default().validate().is_ok());

        let filter = FilterConfig {
            seed_threshold: Some(f64::NAN),
            ..FilterConfig::default()
        };
        assert_eq!(filter.validate(), Err(MatchError::InvalidThreshold));
    }

    #[test]
    fn residual_norms() {
        let previous = [1.0, 0.5, 0.0];
        let next = [1.0, 0.2, 0.4];
        assert!((ResidualNorm::MaxAbs.between(&previous, &next) - 0.4).abs() < 1e-12);
        assert!((ResidualNorm::Euclidean.between(&previous, &next) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: MatchConfig = serde_json::from_str(
            r#"{ "flooding": { "epsilon": 0.05, "fixpoint": "a" }, "filter": { "seed_threshold": 0.68 } }"#,
        )
        .unwrap();

        assert_eq!(cfg.flooding.epsilon, 0.05);
        assert_eq!(cfg.flooding.fixpoint, FixpointKind::A);
        assert_eq!(cfg.flooding.max_iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(cfg.filter.seed_threshold, Some(0.68));
        assert_eq!(cfg.filter.min_similarity, 0.0);
    }
}

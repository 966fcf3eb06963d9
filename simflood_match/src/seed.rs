//! Seed similarity: the structure-independent starting point of flooding.

/// Brings an arbitrary score into `[0, 1]`. NaN becomes 0.
#[must_use]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// A pure comparison of two vertex names.
///
/// Implementations should return values in `[0, 1]`; anything outside is
/// clamped before it reaches the algorithm. Closures of the shape
/// `Fn(&str, &str) -> f64` implement this trait.
pub trait SeedSimilarity {
    /// Similarity of a vertex named `a` in graph A and one named `b` in graph B.
    fn similarity(&self, a: &str, b: &str) -> f64;
}

impl<F> SeedSimilarity for F
where
    F: Fn(&str, &str) -> f64,
{
    fn similarity(&self, a: &str, b: &str) -> f64 {
        self(a, b)
    }
}

/// Drops weak seed scores.
///
/// Scores strictly below `threshold` are reported as 0, so only confident
/// textual matches bootstrap the propagation.
#[derive(Clone, Debug)]
pub struct Thresholded<S> {
    inner: S,
    threshold: f64,
}

impl<S: SeedSimilarity> Thresholded<S> {
    /// Wraps `inner`, zeroing scores below `threshold`.
    pub const fn new(inner: S, threshold: f64) -> Self {
        Self { inner, threshold }
    }

    /// The cut-off below which scores are discarded.
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl<S: SeedSimilarity> SeedSimilarity for Thresholded<S> {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let score = self.inner.similarity(a, b);
        if score < self.threshold { 0.0 } else { score }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_handles_out_of_range() {
        assert_eq!(clamp_score(-0.5), 0.0);
        assert_eq!(clamp_score(1.5), 1.0);
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(0.25), 0.25);
    }

    #[test]
    fn threshold_zeroes_weak_scores() {
        let seed = Thresholded::new(|a: &str, b: &str| if a == b { 1.0 } else { 0.5 }, 0.68);
        assert_eq!(seed.similarity("a", "a"), 1.0);
        assert_eq!(seed.similarity("a", "b"), 0.0);
        assert_eq!(seed.threshold(), 0.68);
    }
}

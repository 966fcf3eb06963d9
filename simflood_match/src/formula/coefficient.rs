use simflood_graph::Label;

/// Weight of the arcs of the pairwise connectivity graph.
///
/// For an A-edge `a1 -> a2` and a B-edge `b1 -> b2` sharing `label`, the
/// arc `(a1, b1) -> (a2, b2)` is weighted with the coefficient of the
/// out-degrees of `a1` and `b1` for that label, and the reverse arc
/// `(a2, b2) -> (a1, b1)` with the coefficient of the in-degrees of `a2`
/// and `b2`. Degrees count distinct neighbors.
///
/// A coefficient of 0 (or anything not positive) removes the arc.
/// Closures `Fn(Label, usize, usize) -> f64` implement this trait.
pub trait PropagationCoefficient: Send + Sync {
    /// Coefficient for neighborhoods of `degree_a` and `degree_b` vertices.
    fn coefficient(&self, label: Label, degree_a: usize, degree_b: usize) -> f64;
}

impl<F> PropagationCoefficient for F
where
    F: Fn(Label, usize, usize) -> f64 + Send + Sync,
{
    fn coefficient(&self, label: Label, degree_a: usize, degree_b: usize) -> f64 {
        self(label, degree_a, degree_b)
    }
}

/// `1 / (degree_a * degree_b)`: every neighbor pair receives an equal share
/// and the shares of one arc group sum to 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InverseProduct;

impl PropagationCoefficient for InverseProduct {
    fn coefficient(&self, _label: Label, degree_a: usize, degree_b: usize) -> f64 {
        if degree_a == 0 || degree_b == 0 {
            return 0.0;
        }
        1.0 / (degree_a as f64 * degree_b as f64)
    }
}

/// `2 / (degree_a + degree_b)`: the inverse of the average degree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InverseAverage;

impl PropagationCoefficient for InverseAverage {
    fn coefficient(&self, _label: Label, degree_a: usize, degree_b: usize) -> f64 {
        if degree_a == 0 || degree_b == 0 {
            return 0.0;
        }
        2.0 / (degree_a as f64 + degree_b as f64)
    }
}

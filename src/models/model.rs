//! Model evaluation.
//!
//! The fitter relies on two primitive operations:
//! - predict `y` at a grid point given parameters (for residuals/plots)
//! - the gradient of `y` with respect to the parameters (Jacobian rows)
//!
//! Both are provided through [`CurveModel`], so the fitter stays generic.

use crate::domain::InputGrid;

/// A model `y = f(x1, x2; θ)` that can be fitted by least squares.
pub trait CurveModel {
    /// Number of free parameters.
    fn param_count(&self) -> usize;

    /// Parameter labels, in the same order as the parameter vector.
    fn param_names(&self) -> &'static [&'static str];

    /// Evaluate the model at one grid point.
    fn eval(&self, x1: f64, x2: f64, params: &[f64]) -> f64;

    /// Fill `out` with `∂f/∂θ_j` at one grid point.
    fn gradient(&self, x1: f64, x2: f64, params: &[f64], out: &mut [f64]);

    /// Evaluate the model over every point of `grid`.
    fn eval_grid(&self, grid: &InputGrid, params: &[f64]) -> Vec<f64> {
        grid.points()
            .map(|(x1, x2)| self.eval(x1, x2, params))
            .collect()
    }
}

/// `y = a + b·x1 + c·x2²`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuadraticModel;

impl QuadraticModel {
    /// Evaluate with explicit coefficients.
    pub fn value(x1: f64, x2: f64, a: f64, b: f64, c: f64) -> f64 {
        a + b * x1 + c * x2 * x2
    }
}

impl CurveModel for QuadraticModel {
    fn param_count(&self) -> usize {
        3
    }

    fn param_names(&self) -> &'static [&'static str] {
        &["a", "b", "c"]
    }

    /// # Panics
    /// Panics if `params` has fewer than three entries.
    fn eval(&self, x1: f64, x2: f64, params: &[f64]) -> f64 {
        Self::value(x1, x2, params[0], params[1], params[2])
    }

    // Linear in the parameters, so the gradient does not depend on them.
    fn gradient(&self, x1: f64, x2: f64, _params: &[f64], out: &mut [f64]) {
        out[0] = 1.0;
        out[1] = x1;
        out[2] = x2 * x2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_known_values() {
        let m = QuadraticModel;
        assert_eq!(m.eval(0.0, 0.0, &[1.0, 3.0, -4.0]), 1.0);
        assert_eq!(m.eval(2.0, 3.0, &[1.0, 3.0, -4.0]), 1.0 + 6.0 - 36.0);
    }

    #[test]
    fn linear_in_a_and_b() {
        let (x1, x2) = (1.7, 2.3);
        let base = QuadraticModel::value(x1, x2, 1.0, 3.0, -4.0);
        let da = QuadraticModel::value(x1, x2, 2.0, 3.0, -4.0) - base;
        let da2 = QuadraticModel::value(x1, x2, 3.0, 3.0, -4.0) - base;
        assert!((da2 - 2.0 * da).abs() < 1e-12);

        let db = QuadraticModel::value(x1, x2, 1.0, 4.0, -4.0) - base;
        assert!((db - x1).abs() < 1e-12);
    }

    #[test]
    fn quadratic_in_x2() {
        let f = |x2: f64| QuadraticModel::value(0.5, x2, 1.0, 3.0, -4.0);
        // Second finite difference of c·x2² is 2c·h².
        let h = 0.25;
        let second = f(1.0 + h) - 2.0 * f(1.0) + f(1.0 - h);
        assert!((second - 2.0 * -4.0 * h * h).abs() < 1e-12);
    }

    #[test]
    fn deterministic_over_grid() {
        let grid = InputGrid::linspace(0.0, 4.0, 50).unwrap();
        let m = QuadraticModel;
        assert_eq!(m.eval_grid(&grid, &[1.0, 3.0, -4.0]), m.eval_grid(&grid, &[1.0, 3.0, -4.0]));
    }

    #[test]
    fn gradient_matches_finite_difference() {
        let m = QuadraticModel;
        let p = [0.3, -1.2, 2.5];
        let mut g = [0.0; 3];
        m.gradient(1.5, 2.5, &p, &mut g);
        for j in 0..3 {
            let mut q = p;
            q[j] += 1e-6;
            let fd = (m.eval(1.5, 2.5, &q) - m.eval(1.5, 2.5, &p)) / 1e-6;
            assert!((fd - g[j]).abs() < 1e-5, "param {j}: fd={fd} analytic={}", g[j]);
        }
    }
}

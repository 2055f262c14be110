//! Nonlinear least-squares fitting of a [`CurveModel`] on an [`InputGrid`].
//!
//! Given:
//! - the grid points `(x1_i, x2_i)`
//! - observed values `y_i`
//! - an initial parameter guess
//!
//! we minimize `Σ (f(x1_i, x2_i; θ) - y_i)²` with Levenberg-Marquardt and
//! report the solution together with its covariance (see
//! [`crate::math::estimate_covariance`]).

use levenberg_marquardt::{LeastSquaresProblem, LevenbergMarquardt, TerminationReason};
use nalgebra::{DMatrix, DVector, Dyn, storage::Owned};

use crate::domain::{FitResult, InputGrid};
use crate::error::AppError;
use crate::math::estimate_covariance;
use crate::models::CurveModel;

/// Fit `model` to `ydata` starting from all parameters set to `1.0`.
pub fn curve_fit<M>(model: &M, grid: &InputGrid, ydata: &[f64]) -> Result<FitResult, AppError>
where
    M: CurveModel + ?Sized,
{
    let p0 = vec![1.0; model.param_count()];
    curve_fit_from(model, grid, ydata, &p0)
}

/// Fit `model` to `ydata` starting from `p0`.
pub fn curve_fit_from<M>(
    model: &M,
    grid: &InputGrid,
    ydata: &[f64],
    p0: &[f64],
) -> Result<FitResult, AppError>
where
    M: CurveModel + ?Sized,
{
    if ydata.len() != grid.len() {
        return Err(AppError::input(format!(
            "Observation length {} does not match grid length {}.",
            ydata.len(),
            grid.len()
        )));
    }
    if p0.len() != model.param_count() {
        return Err(AppError::input(format!(
            "Initial guess has {} parameters, model expects {}.",
            p0.len(),
            model.param_count()
        )));
    }
    if ydata.iter().any(|v| !v.is_finite()) {
        return Err(AppError::fit("Observations must be finite."));
    }

    let problem = CurveFitProblem {
        model,
        grid,
        ydata,
        params: DVector::from_column_slice(p0),
    };
    let (problem, report) = LevenbergMarquardt::new().minimize(problem);

    match &report.termination {
        t if t.was_successful() => {}
        // The step cannot reduce the objective any further at machine
        // precision, so the current point is the optimum we can reach.
        TerminationReason::NoImprovementPossible(which) => {
            log::debug!("fit stopped early: no improvement possible ({which})");
        }
        other => {
            return Err(AppError::fit(format!(
                "Optimal parameters not found: {other:?} after {} evaluations.",
                report.number_of_evaluations
            )));
        }
    }

    let params = problem.params.clone();
    if params.iter().any(|v| !v.is_finite()) {
        return Err(AppError::fit("Fit produced non-finite parameters."));
    }

    let residuals = problem.residual_vector();
    let jacobian = problem.jacobian_matrix();
    let covariance = estimate_covariance(&jacobian, &residuals)?;
    let sse = residuals.norm_squared();

    log::trace!(
        "fit: params={:?} sse={sse:.4e} evals={} termination={:?}",
        params.as_slice(),
        report.number_of_evaluations,
        report.termination
    );

    Ok(FitResult {
        params,
        covariance,
        sse,
        evaluations: report.number_of_evaluations,
        termination: format!("{:?}", report.termination),
    })
}

/// Levenberg-Marquardt adapter over a [`CurveModel`] and fixed data.
struct CurveFitProblem<'a, M: ?Sized> {
    model: &'a M,
    grid: &'a InputGrid,
    ydata: &'a [f64],
    params: DVector<f64>,
}

impl<M> CurveFitProblem<'_, M>
where
    M: CurveModel + ?Sized,
{
    fn residual_vector(&self) -> DVector<f64> {
        let p = self.params.as_slice();
        DVector::from_iterator(
            self.grid.len(),
            self.grid
                .points()
                .zip(self.ydata.iter())
                .map(|((x1, x2), y)| self.model.eval(x1, x2, p) - y),
        )
    }

    fn jacobian_matrix(&self) -> DMatrix<f64> {
        let p = self.params.as_slice();
        let cols = self.model.param_count();
        let mut jacobian = DMatrix::zeros(self.grid.len(), cols);
        let mut row = vec![0.0; cols];
        for (i, (x1, x2)) in self.grid.points().enumerate() {
            self.model.gradient(x1, x2, p, &mut row);
            for (j, v) in row.iter().enumerate() {
                jacobian[(i, j)] = *v;
            }
        }
        jacobian
    }
}

impl<M> LeastSquaresProblem<f64, Dyn, Dyn> for CurveFitProblem<'_, M>
where
    M: CurveModel + ?Sized,
{
    type ResidualStorage = Owned<f64, Dyn>;
    type JacobianStorage = Owned<f64, Dyn, Dyn>;
    type ParameterStorage = Owned<f64, Dyn>;

    fn set_params(&mut self, x: &DVector<f64>) {
        self.params.copy_from(x);
    }

    fn params(&self) -> DVector<f64> {
        self.params.clone()
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        let r = self.residual_vector();
        r.iter().all(|v| v.is_finite()).then_some(r)
    }

    fn jacobian(&self) -> Option<DMatrix<f64>> {
        Some(self.jacobian_matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{noisy_observations, session_rng};
    use crate::domain::TRUE_PARAMS;
    use crate::models::QuadraticModel;

    fn grid() -> InputGrid {
        InputGrid::linspace(0.0, 4.0, 1000).unwrap()
    }

    #[test]
    fn noiseless_data_recovers_true_params() {
        let grid = grid();
        let y = QuadraticModel.eval_grid(&grid, &TRUE_PARAMS);
        let fit = curve_fit(&QuadraticModel, &grid, &y).unwrap();

        for (got, want) in fit.params.iter().zip(TRUE_PARAMS) {
            assert!((got - want).abs() < 1e-6, "expected {want}, got {got}");
        }
        assert!(fit.std_errors().iter().all(|se| *se >= 0.0 && *se < 1e-6));
    }

    #[test]
    fn noisy_fit_is_close_and_reports_uncertainty() {
        let grid = grid();
        let mut rng = session_rng(Some(11));
        let y = noisy_observations(&QuadraticModel, &grid, &TRUE_PARAMS, 10.0, &mut rng).unwrap();
        let fit = curve_fit(&QuadraticModel, &grid, &y).unwrap();

        let se = fit.std_errors();
        for i in 0..3 {
            assert!(se[i] > 0.0 && se[i].is_finite());
            // 6 sigma keeps this stable for any seed.
            assert!(
                (fit.params[i] - TRUE_PARAMS[i]).abs() < 6.0 * se[i],
                "param {i}: {} ± {}",
                fit.params[i],
                se[i]
            );
        }
        assert_eq!(fit.covariance.shape(), (3, 3));
        assert!((fit.covariance[(0, 1)] - fit.covariance[(1, 0)]).abs() < 1e-9);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let grid = grid();
        let err = curve_fit(&QuadraticModel, &grid, &[1.0, 2.0]).unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let y = QuadraticModel.eval_grid(&grid, &TRUE_PARAMS);
        assert!(curve_fit_from(&QuadraticModel, &grid, &y, &[1.0]).is_err());
    }

    #[test]
    fn too_few_points_cannot_estimate_covariance() {
        let grid = InputGrid::linspace(0.0, 4.0, 3).unwrap();
        let y = QuadraticModel.eval_grid(&grid, &TRUE_PARAMS);
        let err = curve_fit(&QuadraticModel, &grid, &y).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}

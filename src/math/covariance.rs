//! Parameter covariance from a least-squares solution.
//!
//! For a converged fit with Jacobian `J` (n×p) and residual sum of squares
//! `SSE`, the parameter covariance is
//!
//! ```text
//! cov = s² (JᵀJ)⁻¹,    s² = SSE / (n - p)
//! ```
//!
//! i.e. the residual variance is estimated from the data (the observations
//! carry no absolute sigma).
//!
//! `JᵀJ` is symmetric positive definite whenever `J` has full column rank, so
//! we invert it through a Cholesky factorization. A failed factorization means
//! the parameters are not identifiable from the grid.

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;

/// Estimate the parameter covariance at a least-squares solution.
pub fn estimate_covariance(
    jacobian: &DMatrix<f64>,
    residuals: &DVector<f64>,
) -> Result<DMatrix<f64>, AppError> {
    let (n, p) = jacobian.shape();
    if residuals.len() != n {
        return Err(AppError::fit(format!(
            "Residual length {} does not match Jacobian rows {n}.",
            residuals.len()
        )));
    }
    if n <= p {
        return Err(AppError::fit(format!(
            "Covariance of the parameters could not be estimated: {n} points for {p} parameters."
        )));
    }

    let jtj = jacobian.tr_mul(jacobian);
    let Some(chol) = jtj.cholesky() else {
        return Err(AppError::fit(
            "Covariance of the parameters could not be estimated: JᵀJ is singular.",
        ));
    };

    let s_sq = residuals.norm_squared() / (n - p) as f64;
    let cov = chol.inverse() * s_sq;
    if cov.iter().any(|v| !v.is_finite()) {
        return Err(AppError::fit("Non-finite parameter covariance."));
    }
    Ok(cov)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_line_covariance() {
        // y = 2 + 3x on x = [0,1,2,3] with residuals [0.1,-0.1,0.1,-0.1]
        let j = DMatrix::from_row_slice(4, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0, 1.0, 3.0]);
        let r = DVector::from_row_slice(&[0.1, -0.1, 0.1, -0.1]);
        let cov = estimate_covariance(&j, &r).unwrap();

        // JᵀJ = [[4,6],[6,14]], inverse = [[0.7,-0.3],[-0.3,0.2]], s² = 0.04/2
        let s_sq = 0.02;
        assert!((cov[(0, 0)] - 0.7 * s_sq).abs() < 1e-12);
        assert!((cov[(0, 1)] + 0.3 * s_sq).abs() < 1e-12);
        assert!((cov[(1, 1)] - 0.2 * s_sq).abs() < 1e-12);
    }

    #[test]
    fn zero_residuals_give_zero_covariance() {
        let j = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let r = DVector::zeros(3);
        let cov = estimate_covariance(&j, &r).unwrap();
        assert!(cov.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn rank_deficient_jacobian_is_rejected() {
        // Second parameter has no influence on the residuals.
        let j = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        let r = DVector::from_row_slice(&[0.1, 0.2, 0.3]);
        assert!(estimate_covariance(&j, &r).is_err());
    }

    #[test]
    fn too_few_points_is_rejected() {
        let j = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 1.0, 1.0]);
        let r = DVector::zeros(2);
        assert!(estimate_covariance(&j, &r).is_err());
    }
}

//! Monte Carlo estimation of a single parameter.
//!
//! Each trial draws fresh noise on top of the true model, refits, and records
//! the tracked parameter together with its one-sigma error from the fit
//! covariance. The trial estimates are then averaged and the mean per-trial
//! error is scaled by `1/sqrt(trials)`.

use rand::Rng;

use crate::data::noisy_observations;
use crate::domain::{InputGrid, McEstimate};
use crate::error::AppError;
use crate::fit::curve_fit;
use crate::models::CurveModel;

/// Inputs for one Monte Carlo run.
#[derive(Debug, Clone, Copy)]
pub struct MonteCarlo<'a> {
    pub grid: &'a InputGrid,
    /// Parameters used to synthesize observations.
    pub truth: &'a [f64],
    /// Gaussian noise standard deviation per point.
    pub noise: f64,
    /// Index of the parameter being estimated.
    pub param: usize,
}

impl MonteCarlo<'_> {
    /// Run `trials` synthetic fits and summarize the tracked parameter.
    pub fn estimate<M, R>(&self, model: &M, trials: usize, rng: &mut R) -> Result<McEstimate, AppError>
    where
        M: CurveModel + ?Sized,
        R: Rng + ?Sized,
    {
        if trials == 0 {
            return Err(AppError::input("Number of trials must be >= 1."));
        }
        if !(self.noise.is_finite() && self.noise >= 0.0) {
            return Err(AppError::input(format!(
                "Invalid noise level: {} (must be finite and >= 0).",
                self.noise
            )));
        }
        if self.param >= model.param_count() {
            return Err(AppError::input(format!(
                "Parameter index {} out of range for a {}-parameter model.",
                self.param,
                model.param_count()
            )));
        }

        let mut value_sum = 0.0;
        let mut error_sum = 0.0;
        for _ in 0..trials {
            let y = noisy_observations(model, self.grid, self.truth, self.noise, rng)?;
            let fit = curve_fit(model, self.grid, &y)?;
            // Index was validated above and the fit always returns param_count values.
            value_sum += fit.params[self.param];
            error_sum += fit.std_errors()[self.param];
        }

        let n = trials as f64;
        let mean = value_sum / n;
        let mean_err = error_sum / n;

        Ok(McEstimate {
            trials,
            mean,
            std_error: mean_err / n.sqrt(),
        })
    }
}

//! Trial-count sweep.
//!
//! Runs the Monte Carlo estimator once per trial count in a linearly spaced
//! (truncated) sequence between the minimum and maximum trial counts.

use rand::Rng;

use crate::domain::{McEstimate, SweepSettings};
use crate::error::AppError;
use crate::fit::MonteCarlo;
use crate::math::linspace_counts;
use crate::models::CurveModel;

/// Trial counts visited by a sweep, in order.
pub fn sweep_trial_counts(settings: &SweepSettings) -> impl Iterator<Item = usize> {
    linspace_counts(settings.min_trials, settings.max_trials, settings.runs)
}

/// Run the sweep and return one estimate per sweep point.
pub fn run_sweep<M, R>(
    model: &M,
    mc: &MonteCarlo<'_>,
    settings: &SweepSettings,
    rng: &mut R,
) -> Result<Vec<McEstimate>, AppError>
where
    M: CurveModel + ?Sized,
    R: Rng + ?Sized,
{
    let runs = settings.runs;
    log::info!(
        "sweep: {} points, trials {}..={}, noise {}",
        runs,
        settings.min_trials,
        settings.max_trials,
        mc.noise
    );

    let mut out = Vec::new();
    for (i, trials) in sweep_trial_counts(settings).enumerate() {
        let est = mc.estimate(model, trials, rng)?;
        log::debug!(
            "sweep point {}/{}: trials={trials} mean={:.4} se={:.4}",
            i + 1,
            runs,
            est.mean,
            est.std_error
        );
        out.push(est);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::session_rng;
    use crate::domain::{InputGrid, TRUE_PARAMS};
    use crate::models::QuadraticModel;

    #[test]
    fn output_length_matches_runs_and_is_ordered() {
        let grid = InputGrid::linspace(0.0, 4.0, 200).unwrap();
        let mc = MonteCarlo { grid: &grid, truth: &TRUE_PARAMS, noise: 30.0, param: 0 };
        let settings = SweepSettings::clamped(1, 6, 20);

        let out = run_sweep(&QuadraticModel, &mc, &settings, &mut session_rng(Some(5))).unwrap();
        assert_eq!(out.len(), 20);
        assert!(out.windows(2).all(|w| w[0].trials <= w[1].trials));
        assert_eq!(out[0].trials, 1);
        assert_eq!(out[19].trials, 6);
        assert!(out.iter().all(|e| e.std_error >= 0.0 && e.mean.is_finite()));
    }

    #[test]
    fn counts_follow_settings() {
        let counts: Vec<usize> = sweep_trial_counts(&SweepSettings::default()).collect();
        assert_eq!(counts.len(), 20);
        assert_eq!(counts[0], 2);
        assert_eq!(counts[19], 250);
    }

    #[test]
    fn zero_noise_sweep_is_exact() {
        let grid = InputGrid::linspace(0.0, 4.0, 100).unwrap();
        let mc = MonteCarlo { grid: &grid, truth: &TRUE_PARAMS, noise: 0.0, param: 0 };
        let settings = SweepSettings::clamped(2, 3, 20);
        let out = run_sweep(&QuadraticModel, &mc, &settings, &mut session_rng(Some(0))).unwrap();
        assert!(out.iter().all(|e| (e.mean - 1.0).abs() < 1e-6));
    }
}

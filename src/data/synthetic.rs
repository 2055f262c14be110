//! Synthetic observations: model output plus independent Gaussian noise.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::InputGrid;
use crate::error::AppError;
use crate::models::CurveModel;

/// Build the session RNG.
///
/// A fixed seed makes every fit and sweep in the session reproducible; without
/// one the generator is seeded from OS entropy.
pub fn session_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Evaluate `model` at `params` over `grid` and add `N(0, noise²)` to each point.
///
/// `noise = 0` yields the exact model output.
pub fn noisy_observations<M, R>(
    model: &M,
    grid: &InputGrid,
    params: &[f64],
    noise: f64,
    rng: &mut R,
) -> Result<Vec<f64>, AppError>
where
    M: CurveModel + ?Sized,
    R: Rng + ?Sized,
{
    if params.len() != model.param_count() {
        return Err(AppError::input(format!(
            "Expected {} model parameters, got {}.",
            model.param_count(),
            params.len()
        )));
    }
    // `Normal::new` only checks finiteness, so the sign is checked here.
    if !(noise.is_finite() && noise >= 0.0) {
        return Err(AppError::input(format!(
            "Invalid noise level: {noise} (must be finite and >= 0)."
        )));
    }
    let normal = Normal::new(0.0, noise)
        .map_err(|e| AppError::input(format!("Noise distribution error (sigma={noise}): {e}")))?;

    let mut y = model.eval_grid(grid, params);
    for v in &mut y {
        *v += normal.sample(rng);
    }
    Ok(y)
}

//! Shared domain types.
//!
//! These types are intentionally kept small and immutable so they can be
//! passed explicitly between the fitting, reporting and plotting layers:
//!
//! - the input grid every fit is evaluated on (`InputGrid`)
//! - the outcome of a single least-squares fit (`FitResult`)
//! - Monte Carlo / sweep outputs (`McEstimate`)
//! - the resolved run configuration (`RunConfig`)

use nalgebra::{DMatrix, DVector};

use crate::error::AppError;

/// Number of grid points used by the demo.
pub const DEFAULT_GRID_LEN: usize = 1000;
/// Lower bound of both grid axes.
pub const GRID_MIN: f64 = 0.0;
/// Upper bound of both grid axes.
pub const GRID_MAX: f64 = 4.0;

/// True model parameters `(a, b, c)` used to synthesize observations.
pub const TRUE_PARAMS: [f64; 3] = [1.0, 3.0, -4.0];

/// Noise standard deviation for the single 2D/3D fits.
pub const DEFAULT_FIT_NOISE: f64 = 10.0;

/// Noise standard deviation for the trial-count sweep.
pub const DEFAULT_SWEEP_NOISE: f64 = 30.0;

/// The fixed 2×N input grid `(x1, x2)`.
///
/// Both axes always have the same length; this is checked at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct InputGrid {
    x1: Vec<f64>,
    x2: Vec<f64>,
}

impl InputGrid {
    /// Pair two coordinate arrays.
    pub fn new(x1: Vec<f64>, x2: Vec<f64>) -> Result<Self, AppError> {
        if x1.len() != x2.len() {
            return Err(AppError::input(format!(
                "Grid axes must have equal length (x1={}, x2={}).",
                x1.len(),
                x2.len()
            )));
        }
        if x1.iter().chain(x2.iter()).any(|v| !v.is_finite()) {
            return Err(AppError::input("Grid coordinates must be finite."));
        }
        Ok(Self { x1, x2 })
    }

    /// Both axes linearly spaced over `[min, max]` with `len` points.
    pub fn linspace(min: f64, max: f64, len: usize) -> Result<Self, AppError> {
        let axis = crate::math::linspace(min, max, len)?;
        Self::new(axis.clone(), axis)
    }

    pub fn len(&self) -> usize {
        self.x1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x1.is_empty()
    }

    pub fn x1(&self) -> &[f64] {
        &self.x1
    }

    pub fn x2(&self) -> &[f64] {
        &self.x2
    }

    /// Iterate the grid as `(x1, x2)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x1.iter().copied().zip(self.x2.iter().copied())
    }
}

/// Outcome of one least-squares fit.
#[derive(Debug, Clone)]
pub struct FitResult {
    /// Best-fit parameters, in model order.
    pub params: DVector<f64>,
    /// Parameter covariance, `s² (JᵀJ)⁻¹` at the solution.
    pub covariance: DMatrix<f64>,
    /// Residual sum of squares at the solution.
    pub sse: f64,
    /// Number of residual evaluations used by the solver.
    pub evaluations: usize,
    /// Human-readable solver termination reason.
    pub termination: String,
}

impl FitResult {
    /// One-sigma parameter uncertainties (square roots of the covariance diagonal).
    pub fn std_errors(&self) -> DVector<f64> {
        self.covariance.diagonal().map(|v| v.max(0.0).sqrt())
    }

    pub fn param(&self, idx: usize) -> Option<f64> {
        self.params.get(idx).copied()
    }

    pub fn std_error(&self, idx: usize) -> Option<f64> {
        if idx >= self.params.len() {
            return None;
        }
        Some(self.covariance[(idx, idx)].max(0.0).sqrt())
    }
}

/// Monte Carlo estimate of one parameter at a given trial count.
///
/// The sweep produces one of these per trial count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct McEstimate {
    pub trials: usize,
    /// Mean of the per-trial parameter estimates.
    pub mean: f64,
    /// Mean per-trial standard error divided by `sqrt(trials)`.
    pub std_error: f64,
}

/// Inputs for a trial-count sweep after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepSettings {
    pub min_trials: usize,
    pub max_trials: usize,
    pub runs: usize,
}

impl SweepSettings {
    /// Smallest number of sweep points accepted.
    pub const MIN_RUNS: usize = 20;

    /// Apply the interactive clamping rules to raw user input.
    ///
    /// - `min < 1` becomes `2`
    /// - `max < min` becomes `min + 20` (using the clamped `min`)
    /// - `runs < 20` becomes `20`
    pub fn clamped(min_trials: i64, max_trials: i64, runs: i64) -> Self {
        let min_trials = if min_trials < 1 { 2 } else { min_trials };
        let max_trials = if max_trials < min_trials {
            min_trials.saturating_add(20)
        } else {
            max_trials
        };
        let runs = runs.max(Self::MIN_RUNS as i64);

        Self {
            min_trials: to_count(min_trials),
            max_trials: to_count(max_trials),
            runs: to_count(runs),
        }
    }
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            min_trials: 2,
            max_trials: 250,
            runs: Self::MIN_RUNS,
        }
    }
}

fn to_count(v: i64) -> usize {
    usize::try_from(v).unwrap_or(usize::MAX)
}

/// How plots are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotMode {
    /// Full-screen terminal chart that blocks until dismissed.
    Terminal,
    /// Character plot printed to stdout.
    Ascii { width: usize, height: usize },
}

/// Fully resolved configuration for a session.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub grid_len: usize,
    pub true_params: [f64; 3],
    pub fit_noise: f64,
    pub sweep_noise: f64,
    /// `None` means seed from OS entropy.
    pub seed: Option<u64>,
    pub plot: PlotMode,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.grid_len < 2 {
            return Err(AppError::input(format!(
                "Grid length must be >= 2 (got {}).",
                self.grid_len
            )));
        }
        for (name, noise) in [("noise", self.fit_noise), ("sweep noise", self.sweep_noise)] {
            if !(noise.is_finite() && noise >= 0.0) {
                return Err(AppError::input(format!(
                    "Invalid {name} level: {noise} (must be finite and >= 0)."
                )));
            }
        }
        Ok(())
    }

    /// Build the input grid for this configuration.
    pub fn grid(&self) -> Result<InputGrid, AppError> {
        InputGrid::linspace(GRID_MIN, GRID_MAX, self.grid_len)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            grid_len: DEFAULT_GRID_LEN,
            true_params: TRUE_PARAMS,
            fit_noise: DEFAULT_FIT_NOISE,
            sweep_noise: DEFAULT_SWEEP_NOISE,
            seed: None,
            plot: PlotMode::Terminal,
        }
    }
}

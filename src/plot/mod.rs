//! Plot descriptions shared by the terminal chart view and the ASCII renderer.
//!
//! A view is pure data: all series are computed up front so the renderers only
//! draw.

use crate::domain::{FitResult, InputGrid, McEstimate};
use crate::models::CurveModel;

pub mod ascii;

pub use ascii::*;

/// Observed data and the fitted model over the grid.
#[derive(Debug, Clone)]
pub struct FitPlot {
    pub x1: Vec<f64>,
    pub x2: Vec<f64>,
    pub observed: Vec<f64>,
    pub fitted: Vec<f64>,
    /// `(name, value, std_error)` per parameter, for captions.
    pub params: Vec<(&'static str, f64, f64)>,
}

impl FitPlot {
    pub fn new<M: CurveModel + ?Sized>(
        model: &M,
        grid: &InputGrid,
        observed: Vec<f64>,
        fit: &FitResult,
    ) -> Self {
        let se = fit.std_errors();
        let params = model
            .param_names()
            .iter()
            .zip(fit.params.iter().zip(se.iter()))
            .map(|(name, (v, e))| (*name, *v, *e))
            .collect();

        Self {
            x1: grid.x1().to_vec(),
            x2: grid.x2().to_vec(),
            observed,
            fitted: model.eval_grid(grid, fit.params.as_slice()),
            params,
        }
    }

    /// `name = value ± se` for every parameter, joined on one line.
    pub fn caption(&self) -> String {
        self.params
            .iter()
            .map(|(name, v, e)| format!("{name} = {v:.4} ± {e:.4}"))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Sweep estimates against trial count, with the true value as reference.
#[derive(Debug, Clone)]
pub struct ConvergencePlot {
    pub points: Vec<McEstimate>,
    pub truth: f64,
}

/// Everything the program can plot.
#[derive(Debug, Clone)]
pub enum PlotView {
    Fit2d(FitPlot),
    Fit3d(FitPlot),
    Convergence(ConvergencePlot),
}

impl PlotView {
    pub fn title(&self) -> &'static str {
        match self {
            PlotView::Fit2d(_) => "Fit (2D): pixel intensity vs x1",
            PlotView::Fit3d(_) => "Fit (3D): pixel intensity over (x1, x2)",
            PlotView::Convergence(_) => "Best fit of the parameter a vs number of trials",
        }
    }
}

/// Min and max of the finite values, if there is a non-empty span.
pub fn value_range<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.into_iter().filter(|v| v.is_finite()) {
        min = min.min(v);
        max = max.max(v);
    }
    if min.is_finite() && max.is_finite() && max > min {
        Some((min, max))
    } else if min.is_finite() && max.is_finite() {
        // Degenerate (single value): widen so the mapping stays defined.
        Some((min - 0.5, max + 0.5))
    } else {
        None
    }
}

/// Widen `[min, max]` by `frac` of its span on both sides.
pub fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

/// Bounds of a convergence plot: trial counts on x, `mean ± se` and the truth on y.
pub fn convergence_bounds(plot: &ConvergencePlot) -> ([f64; 2], [f64; 2]) {
    let (x0, x1) = value_range(plot.points.iter().map(|p| p.trials as f64)).unwrap_or((0.0, 1.0));
    let ys = plot
        .points
        .iter()
        .flat_map(|p| [p.mean - p.std_error, p.mean + p.std_error])
        .chain(std::iter::once(plot.truth));
    let (y0, y1) = value_range(ys).unwrap_or((0.0, 1.0));
    let (x0, x1) = pad_range(x0, x1, 0.03);
    let (y0, y1) = pad_range(y0, y1, 0.05);
    ([x0, x1], [y0, y1])
}

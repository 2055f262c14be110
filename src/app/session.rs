//! Shared session logic used by the menu and the one-shot subcommands.
//!
//! A session owns everything that lives for the whole process: the input
//! grid, the model, the RNG and the resolved configuration. Each action
//! (2D fit, 3D fit, sweep) draws fresh data from the RNG and is otherwise
//! independent of the others.

use std::io::{BufRead, Write};

use rand::rngs::StdRng;

use crate::cli::prompt::prompt_sweep_settings;
use crate::data::{noisy_observations, session_rng};
use crate::domain::{FitResult, InputGrid, McEstimate, PlotMode, RunConfig, SweepSettings};
use crate::error::AppError;
use crate::fit::{MonteCarlo, curve_fit, run_sweep};
use crate::models::QuadraticModel;
use crate::plot::{ConvergencePlot, FitPlot, PlotView, render_ascii};
use crate::report::{NOTE_3D, format_fit_summary, format_sweep_header, format_sweep_table};

pub struct Session {
    config: RunConfig,
    grid: InputGrid,
    model: QuadraticModel,
    rng: StdRng,
}

impl Session {
    pub fn new(config: RunConfig) -> Result<Self, AppError> {
        config.validate()?;
        let grid = config.grid()?;
        let rng = session_rng(config.seed);
        log::info!(
            "session: grid={} points, fit noise={}, sweep noise={}, seed={:?}",
            grid.len(),
            config.fit_noise,
            config.sweep_noise,
            config.seed
        );

        Ok(Self {
            config,
            grid,
            model: QuadraticModel,
            rng,
        })
    }

    /// Draw one noisy dataset at the fit noise level and fit it.
    pub fn fit_once(&mut self) -> Result<(Vec<f64>, FitResult), AppError> {
        let y = noisy_observations(
            &self.model,
            &self.grid,
            &self.config.true_params,
            self.config.fit_noise,
            &mut self.rng,
        )?;
        let fit = curve_fit(&self.model, &self.grid, &y)?;
        log::info!(
            "fit: params={:?} evaluations={}",
            fit.params.as_slice(),
            fit.evaluations
        );
        Ok((y, fit))
    }

    /// Fit, plot `y` against `x1`, then print the parameters.
    pub fn fit_2d<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<FitResult, AppError> {
        let (y, fit) = self.fit_once()?;
        let view = PlotView::Fit2d(FitPlot::new(&self.model, &self.grid, y, &fit));
        self.present(&view, out)?;
        self.print_fit(&fit, out)?;
        Ok(fit)
    }

    /// Print the 3D note, fit, plot over `(x1, x2)`, then print the parameters.
    pub fn fit_3d<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<FitResult, AppError> {
        writeln!(out, "{NOTE_3D}").map_err(|e| AppError::io("Failed to write output", e))?;
        let (y, fit) = self.fit_once()?;
        let view = PlotView::Fit3d(FitPlot::new(&self.model, &self.grid, y, &fit));
        self.present(&view, out)?;
        self.print_fit(&fit, out)?;
        Ok(fit)
    }

    /// Prompt for the sweep bounds, then run the sweep.
    pub fn run_sim<R, W>(&mut self, input: &mut R, out: &mut W) -> Result<Vec<McEstimate>, AppError>
    where
        R: BufRead + ?Sized,
        W: Write + ?Sized,
    {
        let settings = prompt_sweep_settings(input, out)?;
        self.sweep(&settings, out)
    }

    /// Run the sweep at the sweep noise level, print the table and plot it.
    pub fn sweep<W: Write + ?Sized>(
        &mut self,
        settings: &SweepSettings,
        out: &mut W,
    ) -> Result<Vec<McEstimate>, AppError> {
        writeln!(out, "{}", format_sweep_header(settings, self.config.sweep_noise))
            .map_err(|e| AppError::io("Failed to write output", e))?;

        let mc = MonteCarlo {
            grid: &self.grid,
            truth: &self.config.true_params,
            noise: self.config.sweep_noise,
            param: 0,
        };
        let points = run_sweep(&self.model, &mc, settings, &mut self.rng)?;
        let truth = self.config.true_params[0];

        write!(out, "{}", format_sweep_table(&points, truth))
            .map_err(|e| AppError::io("Failed to write output", e))?;

        let view = PlotView::Convergence(ConvergencePlot {
            points: points.clone(),
            truth,
        });
        self.present(&view, out)?;
        Ok(points)
    }

    fn print_fit<W: Write + ?Sized>(&self, fit: &FitResult, out: &mut W) -> Result<(), AppError> {
        write!(out, "{}", format_fit_summary(&self.model, fit))
            .map_err(|e| AppError::io("Failed to write output", e))
    }

    fn present<W: Write + ?Sized>(&self, view: &PlotView, out: &mut W) -> Result<(), AppError> {
        match self.config.plot {
            PlotMode::Terminal => {
                out.flush().map_err(|e| AppError::io("Failed to write output", e))?;
                crate::tui::show(view)
            }
            PlotMode::Ascii { width, height } => write!(out, "{}", render_ascii(view, width, height))
                .map_err(|e| AppError::io("Failed to write output", e)),
        }
    }
}

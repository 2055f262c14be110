//! Command-line parsing.
//!
//! The goal of this module is to keep **argument parsing** and **interactive
//! input** separate from the fitting code.
//!
//! Every option can also come from the environment (`MCFIT_*`), which in turn
//! may be populated from a `.env` file loaded before parsing.

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_FIT_NOISE, DEFAULT_GRID_LEN, DEFAULT_SWEEP_NOISE, PlotMode, RunConfig, TRUE_PARAMS};

pub mod menu;
pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "mcfit",
    version,
    about = "Least-squares fitting and Monte Carlo precision demo for y = a + b*x1 + c*x2^2"
)]
pub struct Cli {
    #[command(flatten)]
    pub common: CommonArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive main menu (the default when no subcommand is given).
    Menu,
    /// Fit one noisy dataset and plot y against x1.
    Fit2d,
    /// Fit one noisy dataset and plot it over (x1, x2).
    Fit3d,
    /// Run the trial-count sweep once and plot the convergence of `a`.
    Sweep(SweepArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// Seed for the random number generator (reproducible runs).
    #[arg(long, global = true, env = "MCFIT_SEED")]
    pub seed: Option<u64>,

    /// Noise standard deviation for the single 2D/3D fits.
    #[arg(long, global = true, env = "MCFIT_NOISE", default_value_t = DEFAULT_FIT_NOISE)]
    pub noise: f64,

    /// Noise standard deviation for the trial-count sweep.
    #[arg(long, global = true, env = "MCFIT_SWEEP_NOISE", default_value_t = DEFAULT_SWEEP_NOISE)]
    pub sweep_noise: f64,

    /// Number of grid points on [0, 4].
    #[arg(long, global = true, env = "MCFIT_POINTS", default_value_t = DEFAULT_GRID_LEN)]
    pub points: usize,

    /// Print ASCII plots instead of opening the full-screen plot view.
    #[arg(long, global = true)]
    pub ascii: bool,

    /// ASCII plot width (columns).
    #[arg(long, global = true, default_value_t = 100)]
    pub width: usize,

    /// ASCII plot height (rows).
    #[arg(long, global = true, default_value_t = 25)]
    pub height: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Sweep bounds; clamped the same way as the interactive prompts.
#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    /// Minimum number of trials.
    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    pub min_trials: i64,

    /// Maximum number of trials.
    #[arg(long, default_value_t = 250, allow_negative_numbers = true)]
    pub max_trials: i64,

    /// Number of sweep points.
    #[arg(long, default_value_t = 20, allow_negative_numbers = true)]
    pub runs: i64,
}

impl CommonArgs {
    /// Fold the parsed options into a run configuration.
    ///
    /// `interactive` is whether stdout is a terminal; without one the
    /// full-screen view cannot work, so plots fall back to ASCII.
    pub fn to_config(&self, interactive: bool) -> RunConfig {
        let plot = if self.ascii || !interactive {
            PlotMode::Ascii {
                width: self.width,
                height: self.height,
            }
        } else {
            PlotMode::Terminal
        };

        RunConfig {
            grid_len: self.points,
            true_params: TRUE_PARAMS,
            fit_noise: self.noise,
            sweep_noise: self.sweep_noise,
            seed: self.seed,
            plot,
        }
    }
}

/// Rewrite argv so a bare `mcfit` lands in the menu.
///
/// Rules:
/// - `mcfit`                     -> `mcfit menu`
/// - `mcfit --seed 3 ...`        -> `mcfit menu --seed 3 ...`
/// - `mcfit --help/--version/-h` -> unchanged (show top-level help/version)
/// - `mcfit <subcommand> ...`    -> unchanged
pub fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("menu".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "menu" | "fit2d" | "fit3d" | "sweep");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "menu flags".
    if arg1.starts_with('-') {
        argv.insert(1, "menu".to_string());
        return argv;
    }

    // Otherwise, leave as-is and let clap report the unknown subcommand.
    argv
}

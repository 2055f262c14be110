//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized

use crate::domain::{FitResult, McEstimate, SweepSettings};
use crate::models::CurveModel;

/// Main menu banner.
pub const MENU_BANNER: &str = "\
### Main Menu ###
        1. Fit the data using curve_fit and plot in 2D
        2. Fit the data using curve_fit and plot in 3D
        3. Run the simulation to estimate the parameter \"a\" over a varying number of trials
        q. Quit
";

/// Printed before the 3D fit.
pub const NOTE_3D: &str =
    "N.B.: I have found that often the 3D plot does not work unless I run using 64-bit";

/// Printed for any unrecognized menu input.
pub const INVALID_OPTION: &str = "Please choose a valid option";

/// Fitted parameters on one line, then their standard errors on the next.
pub fn format_fit_summary<M: CurveModel + ?Sized>(model: &M, fit: &FitResult) -> String {
    let names = model.param_names();
    let se = fit.std_errors();

    let mut out = String::new();
    out.push_str(&format!("{}\n", fmt_vec(fit.params.as_slice())));
    out.push_str(&format!("{}\n", fmt_vec(se.as_slice())));
    for (i, value) in fit.params.iter().enumerate() {
        let name = names.get(i).copied().unwrap_or("?");
        out.push_str(&format!("  {name} = {value:>12.6} ± {:.6}\n", se[i]));
    }
    out.push_str(&format!(
        "  sse = {:.4} | evaluations = {} | {}\n",
        fit.sse, fit.evaluations, fit.termination
    ));
    out
}

/// One-line description of the sweep that is about to run.
pub fn format_sweep_header(settings: &SweepSettings, noise: f64) -> String {
    format!(
        "Running {} simulations from {} to {} trials (noise sigma = {noise})",
        settings.runs, settings.min_trials, settings.max_trials
    )
}

/// Table of `(trials, estimate, standard error)` rows.
pub fn format_sweep_table(points: &[McEstimate], truth: f64) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>8}  {:>12}  {:>12}  {:>10}\n",
        "trials", "a_estimate", "std_error", "|Δ|/se"
    ));
    for p in points {
        let z = if p.std_error > 0.0 {
            format!("{:.2}", (p.mean - truth).abs() / p.std_error)
        } else {
            "-".to_string()
        };
        out.push_str(&format!(
            "{:>8}  {:>12.6}  {:>12.6}  {:>10}\n",
            p.trials, p.mean, p.std_error, z
        ));
    }
    out
}

fn fmt_vec(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.8}")).collect();
    format!("[{}]", parts.join(" "))
}

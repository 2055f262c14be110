//! `mc-curvefit` library crate.
//!
//! The binary (`mcfit`) is a thin wrapper around this library so the fitting,
//! Monte Carlo and rendering code is testable without a terminal.
//!
//! Layout:
//! - [`models`]: the curve model `y = a + b*x1 + c*x2^2`
//! - [`data`]: noisy synthetic observations
//! - [`fit`]: nonlinear least squares, Monte Carlo estimates, trial sweeps
//! - [`plot`] / [`tui`]: ASCII and full-screen plot views
//! - [`cli`] / [`app`]: argument parsing, menu and orchestration

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;

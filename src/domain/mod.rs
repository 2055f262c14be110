//! Domain types used throughout the program.
//!
//! This module defines:
//!
//! - the input grid (`InputGrid`) and the demo constants
//! - fit outputs (`FitResult`, `McEstimate`)
//! - run configuration (`RunConfig`, `SweepSettings`, `PlotMode`)

pub mod types;

pub use types::*;

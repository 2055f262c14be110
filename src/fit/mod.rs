//! Curve fitting and the Monte Carlo experiments built on it.
//!
//! Responsibilities:
//!
//! - fit a model to one synthetic dataset (Levenberg-Marquardt + covariance)
//! - repeat fits over many noise draws (Monte Carlo)
//! - sweep the Monte Carlo estimate over increasing trial counts

pub mod fitter;
pub mod montecarlo;
pub mod sweep;

pub use fitter::*;
pub use montecarlo::*;
pub use sweep::*;

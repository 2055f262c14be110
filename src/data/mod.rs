//! Data generation: seeded RNG and synthetic noisy observations.

pub mod synthetic;

pub use synthetic::*;

//! Reporting utilities: console text for fits, sweeps and the menu.

pub mod format;

pub use format::*;

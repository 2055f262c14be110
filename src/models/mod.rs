//! Model implementations.
//!
//! Models are small, pure types behind the [`CurveModel`] trait so that the
//! fitting code can stay generic.

pub mod model;

pub use model::*;

//! Forecast simulator.
//!
//! Kept as small, pure functions with no dependency on the loaded data.

pub mod engine;

pub use engine::*;

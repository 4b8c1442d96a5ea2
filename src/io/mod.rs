//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - trend exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;

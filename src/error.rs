//! Error types.
//!
//! - `AppError`: what the `dash` binary reports (message + process exit code)
//! - `LoadError`: why a sales source could not be turned into a dataset
//! - `ForecastError`: caller defects when building forecast inputs from text

use std::path::PathBuf;

use thiserror::Error;

/// Exit code for bad input or usage (missing columns, out-of-range values).
pub const EXIT_INPUT: u8 = 2;
/// Exit code when a requested view has no data behind it.
pub const EXIT_NO_DATA: u8 = 3;
/// Exit code for terminal or export I/O failures.
pub const EXIT_IO: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// A sales source that could not be loaded.
///
/// The data store absorbs these into an empty dataset and keeps the error
/// around as an advisory for the UI.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    #[error("Sales source '{}' is unavailable: {reason}", path.display())]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("Sales source is missing required column `{0}`")]
    MissingColumn(&'static str),

    #[error("Failed to read CSV headers: {0}")]
    Headers(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForecastError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

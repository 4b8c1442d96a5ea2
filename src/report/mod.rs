//! Reporting utilities: currency text, tables and summaries for the CLI and TUI.

pub mod format;

pub use format::*;

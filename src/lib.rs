//! `sales-dashboard` library crate.
//!
//! The binary (`dash`) is a thin wrapper around this library so that:
//!
//! - the data view and forecast logic are testable without spawning processes
//! - the CLI and the TUI share one pipeline
//!
//! Layout:
//!
//! - `data`: load-once sales store, sector filter, trend series
//! - `forecast`: the what-if forecast formula
//! - `io`: CSV ingest and trend export
//! - `report` / `plot`: terminal text output
//! - `cli` / `app` / `tui`: front ends

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod io;
pub mod plot;
pub mod report;
pub mod tui;

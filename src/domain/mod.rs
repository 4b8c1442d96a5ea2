//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - loaded sales rows and the dataset that holds them (`SalesRecord`, `SalesDataset`)
//! - trend points for the chart (`TrendPoint`, `DuplicateMonths`)
//! - forecast inputs and outputs (`ForecastSector`, `Quarter`, `ForecastInput`, `Forecast`)

pub mod types;

pub use types::*;

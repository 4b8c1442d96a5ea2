//! Sales data access.
//!
//! - `store`: load-once cache around the CSV source
//! - `filter`: sector choice list and per-sector selection
//! - `trend`: `(month, amount)` series for the chart

pub mod filter;
pub mod store;
pub mod trend;

pub use filter::{distinct_sectors, filter_by_sector};
pub use store::DataStore;
pub use trend::{amount_range, to_trend, to_trend_with};

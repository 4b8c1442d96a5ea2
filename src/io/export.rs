//! Export a sector's trend series to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::domain::TrendPoint;
use crate::error::{AppError, EXIT_IO};

#[derive(Serialize)]
struct TrendRow<'a> {
    sector: &'a str,
    month: &'a str,
    sales: f64,
}

/// Write `sector,month,sales` rows for a trend series to a file.
pub fn write_trend_csv(path: &Path, sector: &str, trend: &[TrendPoint]) -> Result<(), AppError> {
    let file = std::fs::File::create(path).map_err(|e| {
        AppError::new(
            EXIT_IO,
            format!("Failed to create export CSV '{}': {e}", path.display()),
        )
    })?;
    write_trend(file, sector, trend)
}

/// Write `sector,month,sales` rows for a trend series to any writer.
pub fn write_trend<W: Write>(out: W, sector: &str, trend: &[TrendPoint]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);

    for p in trend {
        writer
            .serialize(TrendRow {
                sector,
                month: &p.month,
                sales: p.amount,
            })
            .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

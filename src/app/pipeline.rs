//! Shared "sector view" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! dataset -> sector choice -> filter -> trend series
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use tracing::debug;

use crate::data::{distinct_sectors, filter_by_sector, to_trend_with, DataStore};
use crate::domain::{DuplicateMonths, SalesDataset, SalesRecord, TrendSeries};
use crate::error::{AppError, EXIT_INPUT, EXIT_NO_DATA};

/// Everything the data view shows for one sector.
#[derive(Debug, Clone)]
pub struct SectorView<'a> {
    pub sector: String,
    pub records: Vec<&'a SalesRecord>,
    pub trend: TrendSeries,
}

/// Filter the dataset to `sector` and build its trend series.
pub fn select_sector<'a>(
    dataset: &'a SalesDataset,
    sector: &str,
    duplicates: DuplicateMonths,
) -> SectorView<'a> {
    let records = filter_by_sector(dataset, sector);
    let trend = to_trend_with(&records, duplicates);
    debug!(sector, rows = records.len(), points = trend.len(), "selected sector");

    SectorView {
        sector: sector.to_string(),
        records,
        trend,
    }
}

/// Return the loaded dataset, or a "no data" error carrying the store's advisory.
pub fn require_dataset(store: &DataStore) -> Result<&SalesDataset, AppError> {
    let dataset = store.load();
    if !dataset.is_empty() {
        return Ok(dataset);
    }

    let detail = match store.advisory() {
        Some(err) => err.to_string(),
        None => "no valid rows".to_string(),
    };
    Err(AppError::new(
        EXIT_NO_DATA,
        format!(
            "No sales data available from '{}' ({detail}).",
            store.source().display()
        ),
    ))
}

/// Pick the sector to show: the requested one if the dataset has it, else the first seen.
pub fn resolve_sector(dataset: &SalesDataset, requested: Option<&str>) -> Result<String, AppError> {
    let sectors = distinct_sectors(dataset);

    match requested {
        Some(wanted) => sectors
            .iter()
            .find(|s| **s == wanted)
            .map(|s| s.to_string())
            .ok_or_else(|| {
                AppError::new(
                    EXIT_INPUT,
                    format!(
                        "Unknown sector '{wanted}'. Available sectors: {}.",
                        sectors.join(", ")
                    ),
                )
            }),
        None => sectors
            .first()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::new(EXIT_NO_DATA, "The dataset has no sectors.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> SalesDataset {
        SalesDataset::from_records(vec![
            SalesRecord::new("Tecnologia", "Jan", 200.0).unwrap(),
            SalesRecord::new("Varejo", "Jan", 100.0).unwrap(),
            SalesRecord::new("Varejo", "Jan", 50.0).unwrap(),
            SalesRecord::new("Varejo", "Fev", 120.0).unwrap(),
        ])
    }

    #[test]
    fn select_sector_filters_then_trends() {
        let ds = dataset();
        let view = select_sector(&ds, "Varejo", DuplicateMonths::KeepAll);
        assert_eq!(view.records.len(), 3);
        assert_eq!(view.trend.len(), 3);

        let summed = select_sector(&ds, "Varejo", DuplicateMonths::Sum);
        assert_eq!(summed.records.len(), 3);
        assert_eq!(summed.trend.len(), 2);
        assert_eq!(summed.trend[0].amount, 150.0);
    }

    #[test]
    fn resolve_sector_defaults_to_first_seen() {
        let ds = dataset();
        assert_eq!(resolve_sector(&ds, None).unwrap(), "Tecnologia");
        assert_eq!(resolve_sector(&ds, Some("Varejo")).unwrap(), "Varejo");

        let err = resolve_sector(&ds, Some("Saude")).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.to_string().contains("Tecnologia, Varejo"));
    }

    #[test]
    fn require_dataset_reports_missing_source() {
        let store = DataStore::new("missing/vendas.csv");
        let err = require_dataset(&store).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_NO_DATA);
        assert!(err.to_string().contains("missing/vendas.csv"));
    }
}

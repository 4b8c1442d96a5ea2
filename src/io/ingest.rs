//! CSV ingest for the sales source.
//!
//! Turns a `sector,month,sales` CSV into a `SalesDataset`:
//! - **Strict schema** for the three required columns (English or the
//!   Portuguese `setor,mes,vendas` headers)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Source order preserved**: no sorting, no aggregation

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Local};
use csv::StringRecord;
use tracing::{debug, info, warn};

use crate::domain::{SalesDataset, SalesRecord};
use crate::error::LoadError;

/// Accepted header names per logical column (compared lowercased).
const SECTOR_COLUMNS: [&str; 2] = ["sector", "setor"];
const MONTH_COLUMNS: [&str; 3] = ["month", "mes", "mês"];
const SALES_COLUMNS: [&str; 3] = ["sales", "vendas", "amount"];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// What happened while loading a source.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_used: usize,
    pub row_errors: Vec<RowError>,
    pub loaded_at: DateTime<Local>,
}

/// Ingest output: the dataset plus its load report.
#[derive(Debug, Clone)]
pub struct LoadedSales {
    pub dataset: SalesDataset,
    pub report: LoadReport,
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    sector: usize,
    month: usize,
    sales: usize,
}

/// Load a sales CSV from disk.
pub fn load_sales_csv(path: &Path) -> Result<LoadedSales, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let loaded = load_from_reader(file)?;
    info!(
        path = %path.display(),
        rows_read = loaded.report.rows_read,
        rows_used = loaded.report.rows_used,
        "loaded sales source"
    );
    Ok(loaded)
}

/// Load sales rows from any UTF-8 CSV reader.
pub fn load_from_reader<R: Read>(reader: R) -> Result<LoadedSales, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| LoadError::Headers(e.to_string()))?
        .clone();

    let columns = resolve_columns(&build_header_map(&headers))?;

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: header is line 1, records are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, columns) {
            Ok(r) => records.push(r),
            Err(message) => {
                debug!(line, %message, "skipping sales row");
                row_errors.push(RowError { line, message });
            }
        }
    }

    if !row_errors.is_empty() {
        warn!(skipped = row_errors.len(), "some sales rows were skipped");
    }

    let rows_used = records.len();
    Ok(LoadedSales {
        dataset: SalesDataset::from_records(records),
        report: LoadReport {
            rows_read,
            rows_used,
            row_errors,
            loaded_at: Local::now(),
        },
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins for repeated headers.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_lowercase()
}

fn resolve_columns(header_map: &HashMap<String, usize>) -> Result<Columns, LoadError> {
    let find = |aliases: &[&str]| aliases.iter().find_map(|a| header_map.get(*a).copied());

    Ok(Columns {
        sector: find(&SECTOR_COLUMNS).ok_or(LoadError::MissingColumn("sector"))?,
        month: find(&MONTH_COLUMNS).ok_or(LoadError::MissingColumn("month"))?,
        sales: find(&SALES_COLUMNS).ok_or(LoadError::MissingColumn("sales"))?,
    })
}

fn parse_row(record: &StringRecord, columns: Columns) -> Result<SalesRecord, String> {
    let sector = get_required(record, columns.sector, "sector")?;
    let month = get_required(record, columns.month, "month")?;
    let raw_sales = get_required(record, columns.sales, "sales")?;

    let amount = raw_sales
        .parse::<f64>()
        .map_err(|_| format!("Invalid `sales` value '{raw_sales}'."))?;

    SalesRecord::new(sector, month, amount)
}

fn get_required<'a>(record: &'a StringRecord, idx: usize, name: &str) -> Result<&'a str, String> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

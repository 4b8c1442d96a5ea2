//! Formatted terminal output: currency, record tables, forecast summaries.
//!
//! We keep formatting code in one place so the data/forecast code stays free of
//! presentation concerns and output changes are localized.

use crate::domain::{Forecast, SalesRecord};
use crate::io::ingest::LoadReport;

/// Format an amount as currency text, e.g. `R$ 1,234.56`.
pub fn format_currency(amount: f64) -> String {
    format!("R$ {}", format_grouped(amount, 2))
}

/// Format a number with `,` thousands separators and a fixed number of decimals.
pub fn format_grouped(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let digits = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + int_part.len() / 3 + 1);
    // "-0.00" reads badly; only keep the sign when a non-zero digit survives rounding.
    if value < 0.0 && digits.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format the rows of one sector as an aligned table.
pub fn format_records_table(records: &[&SalesRecord]) -> String {
    let mut out = String::new();
    if records.is_empty() {
        out.push_str("(no rows)\n");
        return out;
    }

    let amounts: Vec<String> = records.iter().map(|r| format_grouped(r.amount(), 2)).collect();
    let w_sector = records.iter().map(|r| r.sector().chars().count()).max().unwrap_or(0).max(6);
    let w_month = records.iter().map(|r| r.month().chars().count()).max().unwrap_or(0).max(5);
    let w_sales = amounts.iter().map(String::len).max().unwrap_or(0).max(5);

    out.push_str(&format!(
        "{:<w_sector$}  {:<w_month$}  {:>w_sales$}\n",
        "sector", "month", "sales"
    ));
    out.push_str(&format!(
        "{}  {}  {}\n",
        "-".repeat(w_sector),
        "-".repeat(w_month),
        "-".repeat(w_sales)
    ));
    for (r, amount) in records.iter().zip(&amounts) {
        out.push_str(&format!(
            "{:<w_sector$}  {:<w_month$}  {:>w_sales$}\n",
            r.sector(),
            r.month(),
            amount
        ));
    }
    out
}

/// Format the distinct sector list, one per line.
pub fn format_sector_list(sectors: &[&str]) -> String {
    let mut out = String::new();
    for (idx, s) in sectors.iter().enumerate() {
        out.push_str(&format!("{:>3}) {s}\n", idx + 1));
    }
    out
}

/// Format a forecast result together with its inputs.
pub fn format_forecast(forecast: &Forecast) -> String {
    let input = &forecast.input;
    let mut out = String::new();
    out.push_str("=== dash - Sales forecast simulator ===\n");
    out.push_str(&format!("Sector: {}\n", input.sector));
    out.push_str(&format!("Quarter: {}\n", input.quarter));
    out.push_str(&format!("Marketing investment: R$ {} mil\n", format_grouped(input.investment, 0)));
    out.push_str(&format!("Expected growth: {}%\n", format_grouped(input.growth_rate, 0)));
    out.push_str(&format!(
        "Estimated sales forecast: {}\n",
        format_currency(forecast.amount)
    ));
    out
}

/// One-line summary of an ingest run.
pub fn format_load_report(report: &LoadReport) -> String {
    let mut out = format!(
        "Loaded {} of {} row(s) at {}",
        report.rows_used,
        report.rows_read,
        report.loaded_at.format("%Y-%m-%d %H:%M:%S")
    );
    if !report.row_errors.is_empty() {
        out.push_str(&format!(" ({} skipped", report.row_errors.len()));
        if let Some(first) = report.row_errors.first() {
            out.push_str(&format!(", first at line {}: {}", first.line, first.message));
        }
        out.push(')');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ForecastInput, ForecastSector, Quarter};

    #[test]
    fn currency_groups_thousands() {
        assert_eq!(format_currency(1700.0), "R$ 1,700.00");
        assert_eq!(format_currency(1320.0000000000002), "R$ 1,320.00");
        assert_eq!(format_currency(1234567.891), "R$ 1,234,567.89");
        assert_eq!(format_currency(999.999), "R$ 1,000.00");
        assert_eq!(format_currency(0.0), "R$ 0.00");
        assert_eq!(format_currency(-4170.5), "R$ -4,170.50");
        assert_eq!(format_currency(-0.001), "R$ 0.00");
    }

    #[test]
    fn grouped_without_decimals() {
        assert_eq!(format_grouped(200.0, 0), "200");
        assert_eq!(format_grouped(12345.0, 0), "12,345");
    }

    #[test]
    fn records_table_golden() {
        let recs = vec![
            SalesRecord::new("Varejo", "Jan", 1500.0).unwrap(),
            SalesRecord::new("Varejo", "Fev", 980.5).unwrap(),
        ];
        let refs: Vec<&SalesRecord> = recs.iter().collect();
        let expected = concat!(
            "sector  month     sales\n",
            "------  -----  --------\n",
            "Varejo  Jan    1,500.00\n",
            "Varejo  Fev      980.50\n",
        );
        assert_eq!(format_records_table(&refs), expected);
        assert_eq!(format_records_table(&[]), "(no rows)\n");
    }

    #[test]
    fn forecast_summary_mentions_amount() {
        let f = Forecast {
            input: ForecastInput {
                sector: ForecastSector::Varejo,
                quarter: Quarter::Q2,
                investment: 50.0,
                growth_rate: 20.0,
            },
            amount: 1700.0,
        };
        let txt = format_forecast(&f);
        assert!(txt.contains("Sector: Varejo\n"));
        assert!(txt.contains("Quarter: Q2\n"));
        assert!(txt.ends_with("Estimated sales forecast: R$ 1,700.00\n"));
    }
}

//! Shared domain types.
//!
//! Two independent vocabularies live here:
//!
//! - the *loaded* data (`SalesRecord`, `SalesDataset`, `TrendPoint`), where a
//!   sector is whatever text the source file contains
//! - the *forecast* inputs (`ForecastSector`, `Quarter`, `ForecastInput`), which
//!   are closed enums so unknown values are rejected at the boundary

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// One row of the sales source.
///
/// Fields are private: records are immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesRecord {
    sector: String,
    month: String,
    #[serde(rename = "sales")]
    amount: f64,
}

impl SalesRecord {
    /// Build a record, rejecting blank labels and non-finite amounts.
    pub fn new(sector: &str, month: &str, amount: f64) -> Result<Self, String> {
        let sector = sector.trim();
        let month = month.trim();
        if sector.is_empty() {
            return Err("Blank `sector` value.".to_string());
        }
        if month.is_empty() {
            return Err("Blank `month` value.".to_string());
        }
        if !amount.is_finite() {
            return Err("Non-finite `sales` value.".to_string());
        }
        Ok(Self {
            sector: sector.to_string(),
            month: month.to_string(),
            amount,
        })
    }

    pub fn sector(&self) -> &str {
        &self.sector
    }

    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
}

/// The loaded sales data, in source order.
///
/// Either empty (nothing could be loaded) or made only of validated records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesDataset {
    records: Vec<SalesRecord>,
}

impl SalesDataset {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SalesRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a SalesDataset {
    type Item = &'a SalesRecord;
    type IntoIter = std::slice::Iter<'a, SalesRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A single `(month, amount)` point of a trend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: String,
    #[serde(rename = "sales")]
    pub amount: f64,
}

/// Ordered points for the sales-over-time view.
pub type TrendSeries = Vec<TrendPoint>;

/// What to do when one sector lists the same month more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateMonths {
    /// Plot every row as its own point.
    #[default]
    KeepAll,
    /// Keep the last amount seen for a month (at the month's first position).
    LastWins,
    /// Add up the amounts for a month (at the month's first position).
    Sum,
}

/// Sector choices offered by the forecast simulator.
///
/// Independent of the sectors found in the data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum ForecastSector {
    Tecnologia,
    Varejo,
    Saude,
}

impl ForecastSector {
    pub const ALL: [ForecastSector; 3] = [
        ForecastSector::Tecnologia,
        ForecastSector::Varejo,
        ForecastSector::Saude,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            ForecastSector::Tecnologia => "Tecnologia",
            ForecastSector::Varejo => "Varejo",
            ForecastSector::Saude => "Saude",
        }
    }

    /// Multiplicative weight applied to the base amount.
    pub fn factor(self) -> f64 {
        match self {
            ForecastSector::Tecnologia => 1.2,
            ForecastSector::Varejo => 1.0,
            ForecastSector::Saude => 0.9,
        }
    }

    pub fn next(self) -> Self {
        match self {
            ForecastSector::Tecnologia => ForecastSector::Varejo,
            ForecastSector::Varejo => ForecastSector::Saude,
            ForecastSector::Saude => ForecastSector::Tecnologia,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ForecastSector::Tecnologia => ForecastSector::Saude,
            ForecastSector::Varejo => ForecastSector::Tecnologia,
            ForecastSector::Saude => ForecastSector::Varejo,
        }
    }
}

impl fmt::Display for ForecastSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ForecastSector {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ForecastSector::ALL
            .into_iter()
            .find(|sector| sector.display_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                ForecastError::InvalidInput(format!(
                    "unknown sector '{s}' (expected Tecnologia, Varejo or Saude)"
                ))
            })
    }
}

/// Fiscal quarter used by the forecast formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    pub fn display_name(self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }

    /// Seasonal weight applied to the base amount.
    pub fn factor(self) -> f64 {
        match self {
            Quarter::Q1 => 1.1,
            Quarter::Q2 => 1.0,
            Quarter::Q3 => 0.95,
            Quarter::Q4 => 1.3,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Quarter::Q1 => Quarter::Q2,
            Quarter::Q2 => Quarter::Q3,
            Quarter::Q3 => Quarter::Q4,
            Quarter::Q4 => Quarter::Q1,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Quarter::Q1 => Quarter::Q4,
            Quarter::Q2 => Quarter::Q1,
            Quarter::Q3 => Quarter::Q2,
            Quarter::Q4 => Quarter::Q3,
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Quarter {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Quarter::ALL
            .into_iter()
            .find(|q| q.display_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                ForecastError::InvalidInput(format!("unknown quarter '{s}' (expected Q1-Q4)"))
            })
    }
}

/// Inputs of a single what-if forecast.
///
/// `investment` is in thousands of currency units (intended range 0..=200);
/// `growth_rate` is a percentage (intended range 0..=100). The ranges are
/// enforced by the front ends, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastInput {
    pub sector: ForecastSector,
    pub quarter: Quarter,
    pub investment: f64,
    pub growth_rate: f64,
}

/// A computed forecast, kept together with the inputs that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Forecast {
    #[serde(flatten)]
    pub input: ForecastInput,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_rejects_blank_labels() {
        assert!(SalesRecord::new("  ", "Jan", 1.0).is_err());
        assert!(SalesRecord::new("Varejo", "", 1.0).is_err());
        assert!(SalesRecord::new("Varejo", "Jan", f64::NAN).is_err());

        let r = SalesRecord::new(" Varejo ", " Jan ", 10.0).unwrap();
        assert_eq!(r.sector(), "Varejo");
        assert_eq!(r.month(), "Jan");
    }

    #[test]
    fn sector_and_quarter_parse_known_labels_only() {
        assert_eq!("Tecnologia".parse::<ForecastSector>().unwrap(), ForecastSector::Tecnologia);
        assert_eq!("saude".parse::<ForecastSector>().unwrap(), ForecastSector::Saude);
        assert_eq!("q4".parse::<Quarter>().unwrap(), Quarter::Q4);

        assert!(matches!(
            "Industria".parse::<ForecastSector>(),
            Err(ForecastError::InvalidInput(_))
        ));
        assert!(matches!("Q5".parse::<Quarter>(), Err(ForecastError::InvalidInput(_))));
        assert!(matches!("".parse::<Quarter>(), Err(ForecastError::InvalidInput(_))));
    }

    #[test]
    fn next_prev_cycle() {
        for s in ForecastSector::ALL {
            assert_eq!(s.next().prev(), s);
        }
        for q in Quarter::ALL {
            assert_eq!(q.prev().next(), q);
        }
    }
}

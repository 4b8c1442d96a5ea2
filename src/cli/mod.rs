//! Command-line parsing for the sales dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the data/forecast code.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DuplicateMonths, ForecastSector, Quarter};

/// Default sales file, looked up in the working directory.
pub const DEFAULT_DATA_FILE: &str = "vendas.csv";

/// Intended range of the marketing investment (thousands of currency units).
pub const INVESTMENT_RANGE: RangeInclusive<f64> = 0.0..=200.0;
/// Intended range of the expected growth rate (percent).
pub const GROWTH_RANGE: RangeInclusive<f64> = 0.0..=100.0;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "dash", version, about = "Sales-by-sector dashboard and forecast simulator")]
pub struct Cli {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the sales data comes from.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Sales CSV with `sector,month,sales` columns.
    #[arg(
        short = 'f',
        long = "data",
        value_name = "CSV",
        env = "SALES_CSV",
        default_value = DEFAULT_DATA_FILE,
        global = true
    )]
    pub path: PathBuf,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the sectors found in the sales data.
    Sectors,
    /// Print one sector's rows and sales trend, and optionally export the trend.
    View(ViewArgs),
    /// Run the what-if sales forecast.
    Forecast(ForecastArgs),
    /// Launch the interactive dashboard.
    Tui,
}

/// Options for the data view.
#[derive(Debug, Parser, Clone)]
pub struct ViewArgs {
    /// Sector to show (defaults to the first sector in the file).
    #[arg(short = 's', long)]
    pub sector: Option<String>,

    /// How to treat several rows for the same month.
    #[arg(long, value_enum, default_value_t = DuplicateMonths::KeepAll)]
    pub duplicates: DuplicateMonths,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 16)]
    pub height: usize,

    /// Export the trend series to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Options for the forecast simulator.
#[derive(Debug, Parser, Clone)]
pub struct ForecastArgs {
    /// Sector (Tecnologia, Varejo, Saude).
    #[arg(short = 's', long, value_enum, ignore_case = true)]
    pub sector: ForecastSector,

    /// Quarter (Q1-Q4).
    #[arg(short = 'q', long, value_enum, ignore_case = true)]
    pub quarter: Quarter,

    /// Marketing investment in thousands (0-200).
    #[arg(short = 'i', long, default_value_t = 50.0, value_parser = parse_investment)]
    pub investment: f64,

    /// Expected growth rate in percent (0-100).
    #[arg(short = 'g', long = "growth", default_value_t = 20.0, value_parser = parse_growth)]
    pub growth_rate: f64,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

fn parse_investment(s: &str) -> Result<f64, String> {
    parse_bounded(s, INVESTMENT_RANGE)
}

fn parse_growth(s: &str) -> Result<f64, String> {
    parse_bounded(s, GROWTH_RANGE)
}

fn parse_bounded(s: &str, range: RangeInclusive<f64>) -> Result<f64, String> {
    let v: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if !range.contains(&v) {
        return Err(format!(
            "{v} is outside {}..={}",
            range.start(),
            range.end()
        ));
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_args_parse_with_defaults() {
        let cli = Cli::parse_from(["dash", "forecast", "--sector", "varejo", "--quarter", "q2"]);
        let Command::Forecast(args) = cli.command else {
            panic!("expected forecast command");
        };
        assert_eq!(args.sector, ForecastSector::Varejo);
        assert_eq!(args.quarter, Quarter::Q2);
        assert_eq!(args.investment, 50.0);
        assert_eq!(args.growth_rate, 20.0);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let res = Cli::try_parse_from([
            "dash", "forecast", "-s", "Saude", "-q", "Q4", "--investment", "250",
        ]);
        assert!(res.is_err());

        let res = Cli::try_parse_from(["dash", "forecast", "-s", "Saude", "-q", "Q4", "--growth", "-1"]);
        assert!(res.is_err());

        let res = Cli::try_parse_from(["dash", "forecast", "-s", "Industria", "-q", "Q4"]);
        assert!(res.is_err());
    }

    #[test]
    fn bounded_parser_accepts_edges() {
        assert_eq!(parse_investment("0").unwrap(), 0.0);
        assert_eq!(parse_investment("200").unwrap(), 200.0);
        assert_eq!(parse_growth("100").unwrap(), 100.0);
        assert!(parse_growth("abc").is_err());
    }

    #[test]
    fn data_flag_is_global() {
        let cli = Cli::parse_from(["dash", "view", "--data", "other.csv", "--sector", "Varejo"]);
        assert_eq!(cli.data.path, PathBuf::from("other.csv"));
        let Command::View(args) = cli.command else {
            panic!("expected view command");
        };
        assert_eq!(args.sector.as_deref(), Some("Varejo"));
        assert_eq!(args.duplicates, DuplicateMonths::KeepAll);
    }
}

//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments
//! - builds the one `DataStore` for the process
//! - dispatches to the data view, forecast, or TUI

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, ForecastArgs, ViewArgs};
use crate::data::{distinct_sectors, DataStore};
use crate::domain::ForecastInput;
use crate::error::{AppError, EXIT_IO};
use crate::forecast::run_forecast;

pub mod pipeline;

/// Entry point for the `dash` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env file is normal.
    let _ = dotenvy::dotenv();

    // `dash` and `dash -f file.csv` behave like `dash tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);

    init_logging(matches!(cli.command, Command::Tui));

    let store = DataStore::new(cli.data.path.clone());
    info!(source = %store.source().display(), "starting dash");

    match cli.command {
        Command::Sectors => handle_sectors(&store),
        Command::View(args) => handle_view(&store, &args),
        Command::Forecast(args) => handle_forecast(&args),
        Command::Tui => crate::tui::run(&store),
    }
}

/// Install the stderr subscriber.
///
/// The TUI owns the terminal, so it only logs when `RUST_LOG` asks for it.
fn init_logging(interactive: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if interactive => return,
        Err(_) => EnvFilter::new("sales_dashboard=warn"),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_sectors(store: &DataStore) -> Result<(), AppError> {
    let dataset = pipeline::require_dataset(store)?;
    let sectors = distinct_sectors(dataset);
    print!("{}", crate::report::format_sector_list(&sectors));
    Ok(())
}

fn handle_view(store: &DataStore, args: &ViewArgs) -> Result<(), AppError> {
    let dataset = pipeline::require_dataset(store)?;
    let sector = pipeline::resolve_sector(dataset, args.sector.as_deref())?;
    let view = pipeline::select_sector(dataset, &sector, args.duplicates);

    println!("=== dash - Sales by sector: {} ===", view.sector);
    if let Some(report) = store.report() {
        println!("{}", crate::report::format_load_report(report));
    }
    println!();
    print!("{}", crate::report::format_records_table(&view.records));

    if args.plot && !args.no_plot {
        println!();
        print!(
            "{}",
            crate::plot::render_trend_plot(&view.sector, &view.trend, args.width, args.height)
        );
    }

    if let Some(path) = &args.export {
        crate::io::export::write_trend_csv(path, &view.sector, &view.trend)?;
        info!(path = %path.display(), points = view.trend.len(), "exported trend");
    }

    Ok(())
}

fn handle_forecast(args: &ForecastArgs) -> Result<(), AppError> {
    let forecast = run_forecast(ForecastInput {
        sector: args.sector,
        quarter: args.quarter,
        investment: args.investment,
        growth_rate: args.growth_rate,
    });

    if args.json {
        let json = serde_json::to_string_pretty(&forecast)
            .map_err(|e| AppError::new(EXIT_IO, format!("Failed to encode forecast JSON: {e}")))?;
        println!("{json}");
    } else {
        print!("{}", crate::report::format_forecast(&forecast));
    }
    Ok(())
}

/// Rewrite argv so `dash` defaults to `dash tui`.
///
/// Rules:
/// - `dash`                       -> `dash tui`
/// - `dash -f sales.csv ...`      -> `dash tui -f sales.csv ...`
/// - `dash --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if is_subcommand_name(&arg1) {
        return argv;
    }

    // Global flags before any subcommand: treat them as "tui flags".
    if arg1.starts_with('-') && !argv.iter().skip(1).any(|a| is_subcommand_name(a)) {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

fn is_subcommand_name(arg: &str) -> bool {
    matches!(arg, "sectors" | "view" | "forecast" | "tui")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_launches_tui() {
        assert_eq!(rewrite_args(args(&["dash"])), args(&["dash", "tui"]));
        assert_eq!(
            rewrite_args(args(&["dash", "-f", "x.csv"])),
            args(&["dash", "tui", "-f", "x.csv"])
        );
    }

    #[test]
    fn explicit_commands_are_untouched() {
        assert_eq!(rewrite_args(args(&["dash", "--help"])), args(&["dash", "--help"]));
        assert_eq!(
            rewrite_args(args(&["dash", "forecast", "-s", "Varejo"])),
            args(&["dash", "forecast", "-s", "Varejo"])
        );
        assert_eq!(
            rewrite_args(args(&["dash", "-f", "x.csv", "view"])),
            args(&["dash", "-f", "x.csv", "view"])
        );
    }
}

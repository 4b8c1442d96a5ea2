//! What-if sales forecast.
//!
//! The formula is a fixed weighting, not a fitted model:
//!
//! `amount = 1000 * sector_factor * quarter_factor + investment * 10 + growth_rate / 100 * 1000`
//!
//! Inputs are not clamped here; the CLI and TUI bound `investment` to 0..=200
//! and `growth_rate` to 0..=100. No rounding is applied.

use crate::domain::{Forecast, ForecastInput, ForecastSector, Quarter};
use crate::error::ForecastError;

/// Base sales amount before sector/quarter weighting.
pub const BASE_AMOUNT: f64 = 1000.0;
/// Sales added per unit (thousand) of marketing investment.
pub const INVESTMENT_MULTIPLIER: f64 = 10.0;
/// Sales added for a 100% expected growth rate.
pub const GROWTH_SCALE: f64 = 1000.0;

/// Predict sales for one sector/quarter under the given investment and growth.
pub fn forecast(sector: ForecastSector, quarter: Quarter, investment: f64, growth_rate: f64) -> f64 {
    BASE_AMOUNT * sector.factor() * quarter.factor()
        + investment * INVESTMENT_MULTIPLIER
        + (growth_rate / 100.0) * GROWTH_SCALE
}

/// Run the forecast for a prepared input.
pub fn run_forecast(input: ForecastInput) -> Forecast {
    Forecast {
        input,
        amount: forecast(input.sector, input.quarter, input.investment, input.growth_rate),
    }
}

/// Build an input from free-text sector/quarter labels.
///
/// Labels outside the enumerated sets fail with `ForecastError::InvalidInput`.
pub fn parse_input(
    sector: &str,
    quarter: &str,
    investment: f64,
    growth_rate: f64,
) -> Result<ForecastInput, ForecastError> {
    Ok(ForecastInput {
        sector: sector.parse()?,
        quarter: quarter.parse()?,
        investment,
        growth_rate,
    })
}

/// `parse_input` followed by `run_forecast`.
pub fn forecast_from_labels(
    sector: &str,
    quarter: &str,
    investment: f64,
    growth_rate: f64,
) -> Result<Forecast, ForecastError> {
    parse_input(sector, quarter, investment, growth_rate).map(run_forecast)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn known_values() {
        assert_relative_eq!(
            forecast(ForecastSector::Tecnologia, Quarter::Q1, 0.0, 0.0),
            1320.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            forecast(ForecastSector::Varejo, Quarter::Q2, 50.0, 20.0),
            1700.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            forecast(ForecastSector::Saude, Quarter::Q4, 200.0, 100.0),
            4170.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn deterministic_for_all_pairs() {
        for sector in ForecastSector::ALL {
            for quarter in Quarter::ALL {
                let a = forecast(sector, quarter, 37.5, 12.0);
                let b = forecast(sector, quarter, 37.5, 12.0);
                assert_eq!(a.to_bits(), b.to_bits());
            }
        }
    }

    #[test]
    fn strictly_increasing_in_investment_and_growth() {
        for sector in ForecastSector::ALL {
            for quarter in Quarter::ALL {
                let mut prev = f64::NEG_INFINITY;
                for step in 0..=40 {
                    let y = forecast(sector, quarter, step as f64 * 5.0, 20.0);
                    assert!(y > prev, "{sector}/{quarter}: investment step {step}");
                    prev = y;
                }

                let mut prev = f64::NEG_INFINITY;
                for step in 0..=20 {
                    let y = forecast(sector, quarter, 50.0, step as f64 * 5.0);
                    assert!(y > prev, "{sector}/{quarter}: growth step {step}");
                    prev = y;
                }
            }
        }
    }

    #[test]
    fn no_clamping_inside_the_engine() {
        // 1000 * 1.0 * 1.0 + 300 * 10 + 1.5 * 1000
        let y = forecast(ForecastSector::Varejo, Quarter::Q2, 300.0, 150.0);
        assert_relative_eq!(y, 5500.0, epsilon = 1e-9);
    }

    #[test]
    fn labels_outside_the_sets_are_invalid_input() {
        let err = forecast_from_labels("Industria", "Q1", 0.0, 0.0).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidInput(_)));

        let err = forecast_from_labels("Varejo", "Q5", 0.0, 0.0).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidInput(_)));
    }

    #[test]
    fn labels_round_trip_into_forecast() {
        let f = forecast_from_labels("Varejo", "Q2", 50.0, 20.0).unwrap();
        assert_eq!(f.input.sector, ForecastSector::Varejo);
        assert_eq!(f.input.quarter, Quarter::Q2);
        assert_relative_eq!(f.amount, 1700.0, epsilon = 1e-9);
    }
}

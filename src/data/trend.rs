//! Trend series: filtered records projected to `(month, amount)` points.
//!
//! Points follow source order; months are labels, never sorted.

use std::collections::HashMap;

use crate::domain::{DuplicateMonths, SalesRecord, TrendPoint, TrendSeries};

/// Project records to trend points, one point per record.
pub fn to_trend(records: &[&SalesRecord]) -> TrendSeries {
    records
        .iter()
        .map(|r| TrendPoint {
            month: r.month().to_string(),
            amount: r.amount(),
        })
        .collect()
}

/// Project records to trend points, resolving repeated months with `policy`.
///
/// `LastWins` and `Sum` keep each month at the position of its first occurrence.
pub fn to_trend_with(records: &[&SalesRecord], policy: DuplicateMonths) -> TrendSeries {
    if policy == DuplicateMonths::KeepAll {
        return to_trend(records);
    }

    let mut out: TrendSeries = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for r in records {
        match index.get(r.month()) {
            Some(&i) => match policy {
                DuplicateMonths::LastWins => out[i].amount = r.amount(),
                DuplicateMonths::Sum => out[i].amount += r.amount(),
                DuplicateMonths::KeepAll => unreachable!("handled above"),
            },
            None => {
                index.insert(r.month(), out.len());
                out.push(TrendPoint {
                    month: r.month().to_string(),
                    amount: r.amount(),
                });
            }
        }
    }

    out
}

/// Min/max amount of a series, if it has any points.
pub fn amount_range(trend: &[TrendPoint]) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for p in trend {
        min = min.min(p.amount);
        max = max.max(p.amount);
    }
    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

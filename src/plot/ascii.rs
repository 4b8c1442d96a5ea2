//! ASCII plotting of a sales trend for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Months are categorical: point `i` sits at the `i`-th evenly spaced column,
//! in series order. Plot elements:
//! - data points: `o`
//! - connecting line: `-`

use crate::data::amount_range;
use crate::domain::TrendPoint;

/// Render a sector's trend series as a line plot.
pub fn render_trend_plot(sector: &str, trend: &[TrendPoint], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let mut out = String::new();
    if trend.is_empty() {
        out.push_str(&format!("Sales trend - {sector} | no data\n"));
        return out;
    }

    let (y_min, y_max) = match amount_range(trend) {
        Some((lo, hi)) if hi > lo => (lo, hi),
        Some((lo, hi)) => (lo - 1.0, hi + 1.0),
        None => (0.0, 1.0),
    };
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];
    let last = trend.len().saturating_sub(1);
    let cells: Vec<(usize, usize)> = trend
        .iter()
        .enumerate()
        .map(|(i, p)| {
            (
                map_x(i, last, width),
                map_y(p.amount, y_min, y_max, height),
            )
        })
        .collect();

    // Lines first so points overlay them.
    for pair in cells.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        draw_line(&mut grid, x0, y0, x1, y1, '-');
    }
    for &(x, y) in &cells {
        grid[y][x] = 'o';
    }

    out.push_str(&format!(
        "Sales trend - {sector} | sales=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    let months: Vec<&str> = trend.iter().map(|p| p.month.as_str()).collect();
    out.push_str(&format!("months: {}\n", months.join(", ")));

    out
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(i: usize, last: usize, width: usize) -> usize {
    if last == 0 {
        return 0;
    }
    let u = i as f64 / last as f64;
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(month: &str, amount: f64) -> TrendPoint {
        TrendPoint {
            month: month.to_string(),
            amount,
        }
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let trend = vec![point("Jan", 100.0), point("Fev", 110.0)];
        let txt = render_trend_plot("Varejo", &trend, 10, 5);
        let expected = concat!(
            "Sales trend - Varejo | sales=[99.50, 110.50]\n",
            "        -o\n",
            "      --  \n",
            "    --    \n",
            "  --      \n",
            "o-        \n",
            "months: Jan, Fev\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn single_point_and_flat_series() {
        let txt = render_trend_plot("Saude", &[point("Jan", 50.0)], 10, 5);
        assert_eq!(txt.lines().count(), 7);
        assert!(txt.contains("months: Jan\n"));
        let marks: usize = txt.lines().skip(1).take(5).map(|l| l.matches('o').count()).sum();
        assert_eq!(marks, 1);
    }

    #[test]
    fn empty_series_says_no_data() {
        assert_eq!(render_trend_plot("Saude", &[], 10, 5), "Sales trend - Saude | no data\n");
    }
}

//! Plotters-powered sales trend chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.
//! Months are categorical, so the x axis is the point index and tick labels are
//! looked up in `months`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct TrendPlottersChart<'a> {
    /// `(index, amount)` points in series order.
    pub points: &'a [(f64, f64)],
    /// Month label per point index.
    pub months: &'a [String],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
}

impl<'a> Widget for TrendPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to build a chart in tiny areas; show a hint instead.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let months = self.months;
        let label_count = months.len().clamp(1, 12);

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 8)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(label_count)
                .y_labels(5)
                .x_label_formatter(&|v| month_tick(months, *v))
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let line_color = RGBColor(0, 128, 255); // blue
            let marker_color = RGBColor(0, 255, 255); // cyan

            chart.draw_series(LineSeries::new(self.points.iter().copied(), &line_color))?;

            // `Circle` radii are mis-scaled by the ratatui backend; a colored
            // `Pixel` gives a clean marker instead.
            chart.draw_series(
                self.points
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), marker_color)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Month label for a tick at `v`, blank between whole indices.
pub(crate) fn month_tick(months: &[String], v: f64) -> String {
    let idx = v.round();
    if (v - idx).abs() > 0.25 || idx < 0.0 {
        return String::new();
    }
    months.get(idx as usize).cloned().unwrap_or_default()
}

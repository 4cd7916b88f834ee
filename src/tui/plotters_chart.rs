//! Plotters-powered comparison chart widget for Ratatui.
//!
//! Plotters does the cartesian bookkeeping (axes, label placement, line
//! clipping) that Ratatui's built-in `Chart` widget would make us hand-roll,
//! and leaves room to grow (legends, PNG export). Output lands in the
//! terminal buffer via `plotters-ratatui-backend`.

use chrono::NaiveDate;
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
/// The widget is intentionally data-driven: both series and bounds are
/// computed outside the render call. X values are indices into `dates`, so
/// gaps in one side never distort the shared axis. Each render draws into a
/// fresh buffer region; no chart state survives between frames.
pub struct CompareChart<'a> {
    /// Left percent series, present points only, as (axis index, pct).
    pub left: &'a [(f64, f64)],
    /// Right percent series, present points only, as (axis index, pct).
    pub right: &'a [(f64, f64)],
    /// The unified date axis backing the index positions.
    pub dates: &'a [NaiveDate],
    /// X bounds (axis indices).
    pub x_bounds: [f64; 2],
    /// Y bounds (percent change).
    pub y_bounds: [f64; 2],
    /// Y axis description (names the period).
    pub y_label: String,
}

impl<'a> Widget for CompareChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters can fail to lay out a chart in a tiny area; show a hint
        // instead of panicking inside the draw call.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (enlarge the terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        let dates = self.dates;

        // The crate-provided `widget_fn` helper keeps us decoupled from the
        // backend's internal types; the closure just draws onto a Plotters
        // root area.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            let fmt_x = |v: &f64| format_axis_date(dates, *v);
            let fmt_y = |v: &f64| format!("{v:.0}%");

            // Mesh lines are clutter at terminal resolution; axes plus tick
            // labels are enough to read relative performance.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc("date")
                .y_desc(&self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&fmt_x)
                .y_label_formatter(&fmt_y)
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            // Series styling: high-contrast two-line palette for terminals.
            let left_color = RGBColor(96, 165, 250);
            let right_color = RGBColor(34, 211, 238);

            // Present points only: the line simply spans gaps, the data
            // itself is never filled in.
            chart.draw_series(LineSeries::new(self.left.iter().copied(), &left_color))?;
            chart.draw_series(LineSeries::new(self.right.iter().copied(), &right_color))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

/// Format the date at a (possibly fractional) axis index for tick labels.
fn format_axis_date(dates: &[NaiveDate], value: f64) -> String {
    if dates.is_empty() {
        return String::new();
    }
    let idx = (value.round().max(0.0) as usize).min(dates.len() - 1);
    dates[idx].format("%b %d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_date_formatting_clamps_to_the_axis() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
        ];

        assert_eq!(format_axis_date(&dates, 0.0), "Jan 02");
        assert_eq!(format_axis_date(&dates, 0.6), "Jan 03");
        assert_eq!(format_axis_date(&dates, 99.0), "Jan 03");
        assert_eq!(format_axis_date(&dates, -3.0), "Jan 02");
        assert_eq!(format_axis_date(&[], 0.0), "");
    }
}

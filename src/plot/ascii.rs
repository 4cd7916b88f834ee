//! ASCII plotting for terminal output.
//!
//! A deliberately simple fixed-size character grid: good for quick visual
//! sanity checks in a pipe-friendly terminal, and deterministic enough to
//! pin down with golden tests.
//!
//! Plot elements:
//! - left series: `+`
//! - right series: `x`
//! - overlapping cells: `*`
//!
//! Consecutive present points are joined with straight segments, so gaps are
//! spanned visually; the underlying data is never filled in.

use crate::compare::Comparison;
use crate::domain::Period;

const LEFT_MARK: char = '+';
const RIGHT_MARK: char = 'x';
const OVERLAP_MARK: char = '*';

/// Render the two percent series as a fixed-size character grid.
pub fn render_percent_plot(
    cmp: &Comparison,
    left_label: &str,
    right_label: &str,
    period: Period,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = pct_range(cmp);

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {left_label} ({LEFT_MARK}) vs {right_label} ({RIGHT_MARK}) | pct=[{y_min:.1}%, {y_max:.1}%] | {}\n",
        period.display_name()
    ));

    if cmp.is_empty() {
        out.push_str("(nothing to plot)\n");
        return out;
    }

    let mut grid = vec![vec![' '; width]; height];
    draw_series(&mut grid, &cmp.left_pct, y_min, y_max, LEFT_MARK);
    draw_series(&mut grid, &cmp.right_pct, y_min, y_max, RIGHT_MARK);

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    if let (Some(first), Some(last)) = (cmp.dates.first(), cmp.dates.last()) {
        out.push_str(&format!("dates: {first} .. {last}\n"));
    }

    out
}

/// Y-axis range over the finite percent values of both sides, padded the way
/// the chart sink does it: at least 5 percent points, else 8% of the span.
fn pct_range(cmp: &Comparison) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for value in cmp.left_pct.iter().chain(&cmp.right_pct).flatten() {
        if value.is_finite() {
            min = min.min(*value);
            max = max.max(*value);
        }
    }

    if !min.is_finite() || !max.is_finite() {
        min = -5.0;
        max = 5.0;
    }

    let pad = ((max - min) * 0.08).max(5.0);
    ((min - pad).floor(), (max + pad).ceil())
}

fn draw_series(grid: &mut [Vec<char>], series: &[Option<f64>], y_min: f64, y_max: f64, mark: char) {
    let height = grid.len();
    let width = grid[0].len();
    let n = series.len();

    let mut prev: Option<(usize, usize)> = None;
    for (i, entry) in series.iter().enumerate() {
        let Some(value) = entry.filter(|v| v.is_finite()) else {
            continue;
        };
        let x = map_x(i, n, width);
        let y = map_y(value, y_min, y_max, height);
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, y, mark),
            None => set_cell(grid, x, y, mark),
        }
        prev = Some((x, y));
    }
}

fn map_x(index: usize, n: usize, width: usize) -> usize {
    if n < 2 {
        return 0;
    }
    let u = index as f64 / (n as f64 - 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(value: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    if y_max <= y_min {
        return height / 2;
    }
    let u = ((value - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn set_cell(grid: &mut [Vec<char>], x: usize, y: usize, mark: char) {
    if y >= grid.len() || x >= grid[0].len() {
        return;
    }
    let cell = &mut grid[y][x];
    *cell = if *cell == ' ' || *cell == mark {
        mark
    } else {
        OVERLAP_MARK
    };
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, mark: char) {
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
        if x0 >= 0 && y0 >= 0 {
            set_cell(grid, x0 as usize, y0 as usize, mark);
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
    use crate::compare;
    use crate::domain::DailyRecord;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[test]
    fn plot_golden_snapshot_flat_left_series() {
        // A flat left series lands on one row; pct range is [0,0] padded by
        // the 5-point minimum to [-5, 5].
        let left = vec![
            DailyRecord::new(d(1), Some(80.0)),
            DailyRecord::new(d(2), Some(80.0)),
        ];
        let cmp = compare::compare(&left, &[]);

        let txt = render_percent_plot(&cmp, "L", "R", Period::OneMonth, 10, 5);
        let expected = concat!(
            "Plot: L (+) vs R (x) | pct=[-5.0%, 5.0%] | 1 Month\n",
            "          \n",
            "          \n",
            "++++++++++\n",
            "          \n",
            "          \n",
            "dates: 2025-06-01 .. 2025-06-02\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn empty_comparison_degrades_to_nothing_to_plot() {
        let cmp = compare::compare(&[], &[]);
        let txt = render_percent_plot(&cmp, "L", "R", Period::OneYear, 40, 10);

        assert!(txt.contains("(nothing to plot)"));
    }

    #[test]
    fn overlapping_series_use_the_overlap_mark() {
        // Identical histories draw on the same cells.
        let hist = vec![
            DailyRecord::new(d(1), Some(100.0)),
            DailyRecord::new(d(2), Some(110.0)),
            DailyRecord::new(d(3), Some(120.0)),
        ];
        let cmp = compare::compare(&hist, &hist);

        let txt = render_percent_plot(&cmp, "L", "R", Period::OneMonth, 20, 8);

        assert!(txt.contains('*'));
        assert!(!txt.lines().skip(1).any(|l| l.contains('+')), "left marks should be overdrawn");
    }

    #[test]
    fn all_null_series_render_an_empty_grid() {
        let left = vec![DailyRecord::new(d(1), None), DailyRecord::new(d(2), None)];
        let cmp = compare::compare(&left, &[]);

        let txt = render_percent_plot(&cmp, "L", "R", Period::OneMonth, 12, 5);

        // Header + 5 grid rows + dates footer, no marks anywhere.
        assert_eq!(txt.lines().count(), 7);
        assert!(!txt.contains('+'));
        assert!(!txt.contains('x'));
    }
}

//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the alignment/normalization code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::compare::Comparison;
use crate::domain::{CompareConfig, SideSummary};

/// Format an optional number, `-` when absent.
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => "-".to_string(),
    }
}

/// Format an optional percent value with an explicit sign, `-` when absent.
pub fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:+.2}%"),
        None => "-".to_string(),
    }
}

/// One-line comparison summary (scripting-friendly).
pub fn format_summary_line(
    left_label: &str,
    right_label: &str,
    left: &SideSummary,
    right: &SideSummary,
) -> String {
    format!(
        "{left_label}: {} | {right_label}: {}",
        fmt_pct(left.pct_change),
        fmt_pct(right.pct_change)
    )
}

/// Full run summary block: header, axis stats, one line per side.
pub fn format_run_summary(
    config: &CompareConfig,
    cmp: &Comparison,
    left: &SideSummary,
    right: &SideSummary,
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} vs {} | {} ({})\n",
        config.left_symbol,
        config.right_symbol,
        config.period.display_name(),
        config.interval.display_name(),
    ));

    match (cmp.dates.first(), cmp.dates.last()) {
        (Some(first), Some(last)) => {
            out.push_str(&format!("axis: {first} .. {last} ({} dates)\n", cmp.len()));
        }
        _ => out.push_str("axis: empty\n"),
    }

    let left_n = cmp.left_close.iter().flatten().count();
    let right_n = cmp.right_close.iter().flatten().count();
    out.push_str(&format_side_line(&config.left_symbol, left, left_n));
    out.push_str(&format_side_line(&config.right_symbol, right, right_n));

    out
}

fn format_side_line(label: &str, summary: &SideSummary, n_closes: usize) -> String {
    format!(
        "{label:<8} start {:>10}  end {:>10}  change {:>8}  ({n_closes} closes)\n",
        fmt_opt(summary.start, 2),
        fmt_opt(summary.end, 2),
        fmt_pct(summary.pct_change),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare;
    use crate::domain::{DailyRecord, Interval, Period};
    use chrono::NaiveDate;

    fn config() -> CompareConfig {
        CompareConfig {
            left_symbol: "AAPL".to_string(),
            right_symbol: "MSFT".to_string(),
            period: Period::OneYear,
            interval: Interval::Daily,
            offline: true,
            sample_seed: 0,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export: None,
        }
    }

    #[test]
    fn optional_values_format_with_dash_fallback() {
        assert_eq!(fmt_opt(Some(1234.5), 2), "1234.50");
        assert_eq!(fmt_opt(None, 2), "-");
        assert_eq!(fmt_pct(Some(12.345)), "+12.35%");
        assert_eq!(fmt_pct(Some(-5.0)), "-5.00%");
        assert_eq!(fmt_pct(None), "-");
    }

    #[test]
    fn summary_line_names_both_sides() {
        let left = SideSummary {
            start: Some(100.0),
            end: Some(110.0),
            pct_change: Some(10.0),
        };
        let right = SideSummary::default();

        let line = format_summary_line("AAPL", "MSFT", &left, &right);

        assert_eq!(line, "AAPL: +10.00% | MSFT: -");
    }

    #[test]
    fn run_summary_includes_axis_range_and_side_lines() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
        let left = vec![
            DailyRecord::new(d(2), Some(100.0)),
            DailyRecord::new(d(3), Some(105.0)),
        ];
        let right = vec![DailyRecord::new(d(3), Some(50.0))];

        let cmp = compare::compare(&left, &right);
        let text = format_run_summary(
            &config(),
            &cmp,
            &crate::report::summarize_side(&left),
            &crate::report::summarize_side(&right),
        );

        assert!(text.contains("AAPL vs MSFT | 1 Year (daily)"));
        assert!(text.contains("axis: 2025-01-02 .. 2025-01-03 (2 dates)"));
        assert!(text.contains("+5.00%"));
        assert!(text.contains("(2 closes)"));
        assert!(text.contains("(1 closes)"));
    }

    #[test]
    fn run_summary_handles_empty_axis() {
        let cmp = compare::compare(&[], &[]);
        let text = format_run_summary(
            &config(),
            &cmp,
            &SideSummary::default(),
            &SideSummary::default(),
        );

        assert!(text.contains("axis: empty"));
    }
}

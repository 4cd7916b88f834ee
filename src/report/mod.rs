//! Reporting utilities: per-side summaries and formatted terminal output.

use crate::domain::{DailyRecord, SideSummary};

pub mod format;

pub use format::*;

/// Summarize one side of the comparison from its raw history.
///
/// Start is the first usable close, end the last; `pct_change` is undefined
/// (and `None`) when either is missing or the start is zero. This never
/// fails: an empty or all-null history is a valid, fully-`None` summary.
pub fn summarize_side(records: &[DailyRecord]) -> SideSummary {
    let start = records
        .iter()
        .filter_map(|r| r.close)
        .find(|v| v.is_finite());
    let end = records
        .iter()
        .rev()
        .filter_map(|r| r.close)
        .find(|v| v.is_finite());

    let pct_change = match (start, end) {
        (Some(s), Some(e)) if s != 0.0 => Some((e - s) / s * 100.0),
        _ => None,
    };

    SideSummary {
        start,
        end,
        pct_change,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(day: u32, close: Option<f64>) -> DailyRecord {
        DailyRecord::new(NaiveDate::from_ymd_opt(2025, 4, day).unwrap(), close)
    }

    #[test]
    fn summary_uses_first_and_last_usable_close() {
        let records = vec![
            rec(1, None),
            rec(2, Some(100.0)),
            rec(3, Some(90.0)),
            rec(4, Some(125.0)),
            rec(5, None),
        ];

        let s = summarize_side(&records);

        assert_eq!(s.start, Some(100.0));
        assert_eq!(s.end, Some(125.0));
        assert_eq!(s.pct_change, Some(25.0));
    }

    #[test]
    fn empty_history_summarizes_to_all_none() {
        assert_eq!(summarize_side(&[]), SideSummary::default());
    }

    #[test]
    fn zero_start_leaves_pct_change_undefined() {
        let records = vec![rec(1, Some(0.0)), rec(2, Some(10.0))];

        let s = summarize_side(&records);

        assert_eq!(s.start, Some(0.0));
        assert_eq!(s.end, Some(10.0));
        assert_eq!(s.pct_change, None);
    }

    #[test]
    fn single_observation_has_zero_change() {
        let s = summarize_side(&[rec(1, Some(5.0))]);
        assert_eq!(s.pct_change, Some(0.0));
    }
}

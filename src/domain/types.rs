//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during comparison runs
//! - exported to CSV
//! - reused by both the CLI and TUI front-ends

use std::path::PathBuf;

use chrono::{Months, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One (instrument, trading day) observation as delivered by the provider.
///
/// `close` is `None` when the provider reported the day but carried no usable
/// closing price (missing field, unparseable or non-finite value). The date
/// still counts toward the unified axis in that case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub close: Option<f64>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, close: Option<f64>) -> Self {
        Self { date, close }
    }
}

/// Lookback window for the comparison, anchored at the last observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Period {
    #[serde(rename = "1mo")]
    #[value(name = "1mo")]
    OneMonth,
    #[serde(rename = "3mo")]
    #[value(name = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    #[value(name = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    #[value(name = "1y")]
    OneYear,
    #[serde(rename = "2y")]
    #[value(name = "2y")]
    TwoYears,
}

impl Period {
    /// Short request code, as used by the original web API.
    pub fn code(self) -> &'static str {
        match self {
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
        }
    }

    /// Human-readable label for axis titles and headers.
    pub fn display_name(self) -> &'static str {
        match self {
            Period::OneMonth => "1 Month",
            Period::ThreeMonths => "3 Months",
            Period::SixMonths => "6 Months",
            Period::OneYear => "1 Year",
            Period::TwoYears => "2 Years",
        }
    }

    pub fn months(self) -> u32 {
        match self {
            Period::OneMonth => 1,
            Period::ThreeMonths => 3,
            Period::SixMonths => 6,
            Period::OneYear => 12,
            Period::TwoYears => 24,
        }
    }

    /// First calendar date inside the window that ends at `end`.
    pub fn start_from(self, end: NaiveDate) -> NaiveDate {
        end.checked_sub_months(Months::new(self.months()))
            .unwrap_or(end)
    }

    pub fn next(self) -> Self {
        match self {
            Period::OneMonth => Period::ThreeMonths,
            Period::ThreeMonths => Period::SixMonths,
            Period::SixMonths => Period::OneYear,
            Period::OneYear => Period::TwoYears,
            Period::TwoYears => Period::OneMonth,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Period::OneMonth => Period::TwoYears,
            Period::ThreeMonths => Period::OneMonth,
            Period::SixMonths => Period::ThreeMonths,
            Period::OneYear => Period::SixMonths,
            Period::TwoYears => Period::OneYear,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Sampling interval of the requested history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Interval {
    #[serde(rename = "1d")]
    #[value(name = "1d")]
    Daily,
    #[serde(rename = "1wk")]
    #[value(name = "1wk")]
    Weekly,
    #[serde(rename = "1mo")]
    #[value(name = "1mo")]
    Monthly,
}

impl Interval {
    pub fn code(self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Interval::Daily => "daily",
            Interval::Weekly => "weekly",
            Interval::Monthly => "monthly",
        }
    }

    /// AlphaVantage query function for this interval.
    pub fn series_function(self) -> &'static str {
        match self {
            Interval::Daily => "TIME_SERIES_DAILY",
            Interval::Weekly => "TIME_SERIES_WEEKLY",
            Interval::Monthly => "TIME_SERIES_MONTHLY",
        }
    }

    /// Trading days between consecutive offline sample observations.
    pub fn trading_day_step(self) -> usize {
        match self {
            Interval::Daily => 1,
            Interval::Weekly => 5,
            Interval::Monthly => 21,
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct CompareConfig {
    pub left_symbol: String,
    pub right_symbol: String,
    pub period: Period,
    pub interval: Interval,

    /// Use the deterministic offline sample generator instead of the network.
    pub offline: bool,
    /// Extra seed folded into the per-symbol offline sample seed.
    pub sample_seed: u64,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export: Option<PathBuf>,
}

/// Start/end/percent-change summary for one side of the comparison.
///
/// All fields are `None` when the side has no usable closes; `pct_change` is
/// additionally `None` when the starting close is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SideSummary {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub pct_change: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_window_is_anchored_at_end() {
        let end = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        assert_eq!(
            Period::OneMonth.start_from(end),
            NaiveDate::from_ymd_opt(2025, 2, 15).unwrap()
        );
        assert_eq!(
            Period::TwoYears.start_from(end),
            NaiveDate::from_ymd_opt(2023, 3, 15).unwrap()
        );
    }

    #[test]
    fn period_cycling_round_trips() {
        let mut p = Period::OneMonth;
        for _ in 0..5 {
            p = p.next();
        }
        assert_eq!(p, Period::OneMonth);
        assert_eq!(Period::OneMonth.prev(), Period::TwoYears);
        assert_eq!(Period::OneYear.next().prev(), Period::OneYear);
    }

    #[test]
    fn period_labels_match_codes() {
        assert_eq!(Period::OneYear.code(), "1y");
        assert_eq!(Period::OneYear.display_name(), "1 Year");
        assert_eq!(Interval::Weekly.code(), "1wk");
        assert_eq!(Interval::Weekly.series_function(), "TIME_SERIES_WEEKLY");
    }
}

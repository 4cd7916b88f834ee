//! AlphaVantage price-history integration.
//!
//! The provider returns a JSON object keyed by `YYYY-MM-DD` date strings.
//! Dates are parsed into `NaiveDate` right here at the boundary; nothing
//! downstream ever orders or compares dates as strings.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::domain::{DailyRecord, Interval, Period};
use crate::error::AppError;

const BASE_URL: &str = "https://www.alphavantage.co/query";

pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
}

impl AlphaVantageClient {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("ALPHAVANTAGE_KEY").map_err(|_| {
            AppError::usage(
                "Missing ALPHAVANTAGE_KEY in environment (.env). Use --offline for sample data.",
            )
        })?;
        Ok(Self {
            client: Client::new(),
            api_key,
        })
    }

    /// Fetch one instrument's close history for the requested window.
    ///
    /// Returns records in ascending date order, trimmed to `period` anchored
    /// at the provider's last observation. Unparseable or non-finite closes
    /// become `close: None` records rather than being dropped.
    pub fn fetch_history(
        &self,
        symbol: &str,
        period: Period,
        interval: Interval,
    ) -> Result<Vec<DailyRecord>, AppError> {
        let mut query: Vec<(&str, &str)> = vec![
            ("function", interval.series_function()),
            ("symbol", symbol),
            ("apikey", &self.api_key),
        ];
        // Daily responses are truncated to ~100 rows unless the full dump is
        // requested; weekly/monthly always return the full history.
        if interval == Interval::Daily {
            query.push(("outputsize", "full"));
        }

        let resp = self
            .client
            .get(BASE_URL)
            .query(&query)
            .send()
            .map_err(|e| AppError::data(format!("AlphaVantage request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::data(format!(
                "AlphaVantage request failed with status {}.",
                resp.status()
            )));
        }

        let body: TimeSeriesResponse = resp
            .json()
            .map_err(|e| AppError::data(format!("Failed to parse AlphaVantage response: {e}")))?;

        if let Some(note) = body.note.or(body.information) {
            return Err(AppError::data(format!("AlphaVantage throttled the request: {note}")));
        }
        if let Some(msg) = body.error_message {
            return Err(AppError::data(format!("AlphaVantage rejected symbol '{symbol}': {msg}")));
        }

        let Some(series) = body.series else {
            return Err(AppError::data(format!(
                "AlphaVantage returned no time series for symbol '{symbol}'."
            )));
        };

        let mut by_date = BTreeMap::new();
        for (raw_date, quote) in &series {
            let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
                .map_err(|e| AppError::data(format!("Invalid AlphaVantage date '{raw_date}': {e}")))?;
            by_date.insert(date, parse_value(&quote.close));
        }

        let records = records_in_window(by_date, period);
        if records.is_empty() {
            return Err(AppError::data(format!(
                "No observations for symbol '{symbol}' in the requested window."
            )));
        }

        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(
        rename = "Time Series (Daily)",
        alias = "Weekly Time Series",
        alias = "Monthly Time Series"
    )]
    series: Option<HashMap<String, Quote>>,

    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(rename = "4. close")]
    close: String,
}

fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == "." || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

/// Trim a full date-keyed history to the period window anchored at the last
/// observation, in ascending order.
fn records_in_window(by_date: BTreeMap<NaiveDate, Option<f64>>, period: Period) -> Vec<DailyRecord> {
    let Some((&last, _)) = by_date.iter().next_back() else {
        return Vec::new();
    };
    let start = period.start_from(last);

    by_date
        .into_iter()
        .filter(|(date, _)| *date >= start)
        .map(|(date, close)| DailyRecord::new(date, close))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_handles_placeholder_and_garbage() {
        assert_eq!(parse_value("123.45"), Some(123.45));
        assert_eq!(parse_value(" 7 "), Some(7.0));
        assert_eq!(parse_value("."), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("n/a"), None);
        assert_eq!(parse_value("inf"), None);
    }

    #[test]
    fn window_trim_is_anchored_at_last_observation() {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        let mut by_date = BTreeMap::new();
        by_date.insert(d(2023, 1, 10), Some(1.0));
        by_date.insert(d(2025, 2, 3), Some(2.0));
        by_date.insert(d(2025, 5, 1), None);
        by_date.insert(d(2025, 6, 2), Some(3.0));

        let records = records_in_window(by_date, Period::SixMonths);

        // Window is [2024-12-02, 2025-06-02]; the 2023 row falls outside.
        assert_eq!(
            records,
            vec![
                DailyRecord::new(d(2025, 2, 3), Some(2.0)),
                DailyRecord::new(d(2025, 5, 1), None),
                DailyRecord::new(d(2025, 6, 2), Some(3.0)),
            ]
        );
    }

    #[test]
    fn window_trim_of_empty_history_is_empty() {
        assert!(records_in_window(BTreeMap::new(), Period::OneYear).is_empty());
    }
}

//! Deterministic offline sample histories.
//!
//! When no API key (or no network) is available, we synthesize a plausible
//! close history per symbol: a seeded geometric random walk over weekday
//! dates, with occasional skipped days and null closes so the alignment
//! paths downstream see the same irregularities a real feed produces.
//!
//! Two different symbols hash to different seeds, so their trading calendars
//! and walks diverge, which is exactly what the comparison pipeline needs to
//! be exercised properly.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{DailyRecord, Interval, Period};
use crate::error::AppError;

/// Mean daily log-return of the synthetic walk.
const DAILY_DRIFT: f64 = 0.0004;
/// Daily log-return standard deviation.
const DAILY_VOL: f64 = 0.018;
/// Probability a trading day is missing from the feed entirely.
const GAP_PROB: f64 = 0.03;
/// Probability a reported day carries no usable close.
const NULL_CLOSE_PROB: f64 = 0.01;

/// Generate one symbol's synthetic history ending at `end`.
///
/// Output is strictly ascending and stays inside the period window. The walk
/// advances on every weekday; records are emitted once per interval step.
pub fn generate_history(
    symbol: &str,
    end: NaiveDate,
    period: Period,
    interval: Interval,
    seed: u64,
) -> Result<Vec<DailyRecord>, AppError> {
    let mut rng = StdRng::seed_from_u64(history_seed(symbol, seed));
    let normal = Normal::new(DAILY_DRIFT, DAILY_VOL)
        .map_err(|e| AppError::data(format!("Noise distribution error: {e}")))?;

    let start = period.start_from(end);
    let mut price = rng.gen_range(20.0..500.0);
    let step = interval.trading_day_step();

    let mut records = Vec::new();
    let mut date = start;
    let mut trading_day = 0usize;
    while date <= end {
        if is_weekday(date) {
            let r: f64 = normal.sample(&mut rng);
            price *= r.exp();

            if trading_day % step == 0 && !rng.gen_bool(GAP_PROB) {
                let close = if rng.gen_bool(NULL_CLOSE_PROB) {
                    None
                } else {
                    Some((price * 100.0).round() / 100.0)
                };
                records.push(DailyRecord::new(date, close));
            }
            trading_day += 1;
        }
        date = date + Duration::days(1);
    }

    Ok(records)
}

fn history_seed(symbol: &str, seed: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    symbol.to_uppercase().hash(&mut hasher);
    seed.hash(&mut hasher);
    hasher.finish()
}

fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

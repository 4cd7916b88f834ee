//! Shared "comparison pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch left/right histories -> align onto a unified axis -> percent rebase
//! -> per-side summaries
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).
//! Fetching is strictly upstream: the pure pipeline only ever runs once both
//! histories are fully resolved in memory.

use chrono::Utc;

use crate::compare::{self, Comparison};
use crate::data::{AlphaVantageClient, sample};
use crate::domain::{CompareConfig, DailyRecord, SideSummary};
use crate::error::AppError;
use crate::report;

/// All computed outputs of a single comparison run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub comparison: Comparison,
    pub left_summary: SideSummary,
    pub right_summary: SideSummary,
    pub left_history: Vec<DailyRecord>,
    pub right_history: Vec<DailyRecord>,
}

/// Fetch both histories and execute the full comparison pipeline.
pub fn run_compare(config: &CompareConfig) -> Result<RunOutput, AppError> {
    let (left, right) = fetch_histories(config)?;
    Ok(run_compare_with_histories(left, right))
}

/// Execute the pipeline with pre-fetched histories.
///
/// This is useful for callers that want to recompute without re-fetching,
/// and it is the pure part: no I/O, no failure modes.
pub fn run_compare_with_histories(
    left: Vec<DailyRecord>,
    right: Vec<DailyRecord>,
) -> RunOutput {
    let comparison = compare::compare(&left, &right);
    let left_summary = report::summarize_side(&left);
    let right_summary = report::summarize_side(&right);

    RunOutput {
        comparison,
        left_summary,
        right_summary,
        left_history: left,
        right_history: right,
    }
}

/// Resolve both sides' histories from the configured source.
pub fn fetch_histories(
    config: &CompareConfig,
) -> Result<(Vec<DailyRecord>, Vec<DailyRecord>), AppError> {
    if config.offline {
        let end = Utc::now().date_naive();
        let left = sample::generate_history(
            &config.left_symbol,
            end,
            config.period,
            config.interval,
            config.sample_seed,
        )?;
        let right = sample::generate_history(
            &config.right_symbol,
            end,
            config.period,
            config.interval,
            config.sample_seed,
        )?;
        return Ok((left, right));
    }

    let client = AlphaVantageClient::from_env()?;
    let left = client.fetch_history(&config.left_symbol, config.period, config.interval)?;
    let right = client.fetch_history(&config.right_symbol, config.period, config.interval)?;
    Ok((left, right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn pipeline_output_is_internally_consistent() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 3, day).unwrap();
        let left = vec![
            DailyRecord::new(d(3), Some(10.0)),
            DailyRecord::new(d(4), Some(12.0)),
        ];
        let right = vec![
            DailyRecord::new(d(4), Some(40.0)),
            DailyRecord::new(d(5), Some(30.0)),
        ];

        let run = run_compare_with_histories(left.clone(), right.clone());

        assert_eq!(run.comparison.len(), 3);
        assert_eq!(run.left_summary.pct_change, Some(20.0));
        assert_eq!(run.right_summary.pct_change, Some(-25.0));
        assert_eq!(run.left_history, left);
        assert_eq!(run.right_history, right);
    }

    #[test]
    fn pipeline_accepts_empty_histories() {
        let run = run_compare_with_histories(Vec::new(), Vec::new());

        assert!(run.comparison.is_empty());
        assert_eq!(run.left_summary, SideSummary::default());
        assert_eq!(run.right_summary, SideSummary::default());
    }
}

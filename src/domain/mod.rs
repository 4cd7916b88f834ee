//! Domain types used throughout the comparison pipeline.
//!
//! This module defines:
//!
//! - provider records (`DailyRecord`)
//! - request enums (`Period`, `Interval`)
//! - the resolved run configuration (`CompareConfig`)
//! - per-side summary stats (`SideSummary`)

pub mod types;

pub use types::*;

//! Data acquisition: the upstream side of the comparison pipeline.
//!
//! - AlphaVantage price history client (`alpha`)
//! - deterministic offline sample histories (`sample`)
//! - ticker suggestion database (`tickers`)

pub mod alpha;
pub mod sample;
pub mod tickers;

pub use alpha::AlphaVantageClient;
pub use sample::generate_history;
pub use tickers::{Suggestion, TickerDb};

//! Command-line parsing for the percent-change comparison tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the alignment/normalization code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{Interval, Period};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rp", version, about = "Relative performance of two tickers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch both histories, print summaries, and render the overlay plot.
    Compare(CompareArgs),
    /// Print the compact one-line summary only (useful for scripting).
    Summary(CompareArgs),
    /// Print ticker suggestions for a query.
    Search(SearchArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same underlying comparison pipeline as `rp compare`,
    /// but renders results in a terminal UI using Ratatui.
    Tui(CompareArgs),
}

/// Common options for comparing and summarizing.
#[derive(Debug, Parser, Clone)]
pub struct CompareArgs {
    /// Left-hand ticker symbol.
    #[arg(short = 'l', long, default_value = "AAPL")]
    pub left: String,

    /// Right-hand ticker symbol.
    #[arg(short = 'r', long, default_value = "MSFT")]
    pub right: String,

    /// Lookback window (1mo, 3mo, 6mo, 1y, 2y).
    #[arg(short = 'p', long, value_enum, default_value_t = Period::OneYear)]
    pub period: Period,

    /// Sampling interval (1d, 1wk, 1mo).
    #[arg(long, value_enum, default_value_t = Interval::Daily)]
    pub interval: Interval,

    /// Use deterministic offline sample data instead of the network.
    #[arg(long)]
    pub offline: bool,

    /// Extra seed for the offline sample generator.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export the aligned comparison to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Options for ticker search.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Query string (symbol prefix or name fragment).
    pub query: String,

    /// Maximum number of suggestions.
    #[arg(long, default_value_t = 8)]
    pub max: usize,
}

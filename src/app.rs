//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - fetches both price histories
//! - runs the alignment/normalization pipeline
//! - prints summaries/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, CompareArgs, SearchArgs};
use crate::domain::CompareConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `rp` binary.
pub fn run() -> Result<(), AppError> {
    // We want `rp` and `rp -l AAPL -r MSFT` to behave like `rp tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Compare(args) => handle_compare(args, OutputMode::Full),
        Command::Summary(args) => handle_compare(args, OutputMode::SummaryOnly),
        Command::Search(args) => handle_search(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    SummaryOnly,
}

fn handle_compare(args: CompareArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = compare_config_from_args(&args);
    let run = pipeline::run_compare(&config)?;

    if mode == OutputMode::Full {
        println!(
            "{}",
            crate::report::format_run_summary(
                &config,
                &run.comparison,
                &run.left_summary,
                &run.right_summary,
            )
        );
    }

    println!(
        "{}",
        crate::report::format_summary_line(
            &config.left_symbol,
            &config.right_symbol,
            &run.left_summary,
            &run.right_summary,
        )
    );

    if mode == OutputMode::Full && config.plot {
        let plot = crate::plot::render_percent_plot(
            &run.comparison,
            &config.left_symbol,
            &config.right_symbol,
            config.period,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional export.
    if mode == OutputMode::Full {
        if let Some(path) = &config.export {
            crate::io::export::write_comparison_csv(
                path,
                &run.comparison,
                &config.left_symbol,
                &config.right_symbol,
            )?;
        }
    }

    Ok(())
}

fn handle_search(args: SearchArgs) -> Result<(), AppError> {
    let db = crate::data::TickerDb::load_default();
    let suggestions = db.suggest(&args.query, args.max);

    if suggestions.is_empty() {
        println!("No suggestions for '{}'.", args.query);
        return Ok(());
    }
    for s in suggestions {
        println!("{:<8} {}", s.symbol, s.name);
    }
    Ok(())
}

pub fn compare_config_from_args(args: &CompareArgs) -> CompareConfig {
    CompareConfig {
        left_symbol: args.left.trim().to_uppercase(),
        right_symbol: args.right.trim().to_uppercase(),
        period: args.period,
        interval: args.interval,
        offline: args.offline,
        sample_seed: args.seed,
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export: args.export.clone(),
    }
}

/// Rewrite argv so `rp` defaults to `rp tui`.
///
/// Rules:
/// - `rp`                      -> `rp tui`
/// - `rp -l AAPL ...`          -> `rp tui -l AAPL ...`
/// - `rp --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    match argv.get(1).map(String::as_str) {
        // Bare invocation.
        None => argv.push("tui".to_string()),
        // Top-level help/version and explicit subcommands pass through.
        Some("-h" | "--help" | "-V" | "--version" | "help") => {}
        Some("compare" | "summary" | "search" | "tui") => {}
        // A leading flag means "tui flags".
        Some(arg) if arg.starts_with('-') => argv.insert(1, "tui".to_string()),
        Some(_) => {}
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(args(&["rp"])), args(&["rp", "tui"]));
    }

    #[test]
    fn leading_flags_are_forwarded_to_tui() {
        assert_eq!(
            rewrite_args(args(&["rp", "-l", "AAPL", "-r", "MSFT"])),
            args(&["rp", "tui", "-l", "AAPL", "-r", "MSFT"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through_unchanged() {
        assert_eq!(
            rewrite_args(args(&["rp", "compare", "-l", "AAPL"])),
            args(&["rp", "compare", "-l", "AAPL"])
        );
        assert_eq!(rewrite_args(args(&["rp", "--help"])), args(&["rp", "--help"]));
    }

    #[test]
    fn config_uppercases_and_trims_symbols() {
        let parsed = crate::cli::Cli::parse_from(["rp", "compare", "-l", " aapl ", "-r", "msft"]);
        let Command::Compare(compare_args) = parsed.command else {
            panic!("expected compare subcommand");
        };

        let config = compare_config_from_args(&compare_args);
        assert_eq!(config.left_symbol, "AAPL");
        assert_eq!(config.right_symbol, "MSFT");
    }

    #[test]
    fn no_plot_flag_wins_over_plot_default() {
        let parsed = crate::cli::Cli::parse_from(["rp", "compare", "--no-plot"]);
        let Command::Compare(compare_args) = parsed.command else {
            panic!("expected compare subcommand");
        };

        assert!(!compare_config_from_args(&compare_args).plot);
    }
}

//! CLI argument definitions for tickcast.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Next-session stock forecast from trend, momentum, and news mood.
///
/// Accepts an exchange symbol (INFY.NS) or a free-text company name
/// (tata motors) and prints a one-day-ahead close forecast with a
/// confidence band, or just the resolved symbol.
#[derive(Debug, Parser)]
#[command(
    name = "tickcast",
    author,
    version,
    about = "Next-session stock forecast CLI"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat degradation warnings as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full forecast pipeline for a symbol or company name.
    Analyze(AnalyzeArgs),
    /// Resolve a company name to an exchange symbol and stop.
    Resolve(ResolveArgs),
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Symbol or company name. Multiple words are joined with spaces;
    /// an empty query falls back to the default symbol.
    pub query: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Symbol or company name to resolve.
    pub query: Vec<String>,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn parses_multi_word_analyze_query() {
        let cli = Cli::parse_from(["tickcast", "analyze", "tata", "motors"]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze command");
        };
        assert_eq!(args.query, vec!["tata", "motors"]);
    }

    #[test]
    fn global_flags_apply_after_subcommand() {
        let cli = Cli::parse_from(["tickcast", "resolve", "INFY", "--format", "table"]);
        assert_eq!(cli.format, OutputFormat::Table);
    }
}

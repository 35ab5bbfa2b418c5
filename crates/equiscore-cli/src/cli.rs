//! CLI argument definitions for equiscore.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Equity safety scoring from one year of daily prices.
///
/// Derives standard risk/return statistics (volatility, alpha/beta,
/// Sharpe, max drawdown, Treynor, VaR, downside deviation, tracking
/// error, trend, Calmar) from daily adjusted closes and blends them into
/// a single 1-100 safety score.
#[derive(Debug, Parser)]
#[command(
    name = "equiscore",
    author,
    version,
    about = "Equity safety scoring from daily price history"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report for terminal display.
    Text,
    /// Single JSON object output.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Assess one ticker and print its metrics and safety score.
    ///
    /// Prompts for the symbol when it is not given on the command line.
    ///
    /// # Examples
    ///
    ///   equiscore assess AAPL
    ///   equiscore assess AAPL --risk-free-rate 0.03 --format json --pretty
    ///   equiscore assess MSFT --index ^GSPC --index ^IXIC
    Assess(AssessArgs),
}

/// Arguments for the `assess` command.
#[derive(Debug, Args)]
pub struct AssessArgs {
    /// Market symbol to assess (e.g. AAPL). Prompted for when omitted.
    pub symbol: Option<String>,

    /// Trailing window length in calendar days, ending yesterday.
    #[arg(long, default_value_t = 366)]
    pub window_days: i64,

    /// Market index to compare against. Repeatable.
    #[arg(
        long = "index",
        value_name = "SYMBOL",
        default_values_t = vec![
            String::from("^GSPC"),
            String::from("^DJI"),
            String::from("^IXIC"),
        ]
    )]
    pub indices: Vec<String>,

    /// Risk-free rate subtracted from each daily return as-is.
    #[arg(long, default_value_t = 0.02)]
    pub risk_free_rate: f64,

    /// Tail probability for the value-at-risk quantile.
    #[arg(long, default_value_t = 0.05)]
    pub var_tail: f64,

    /// Returns below this value count as downside.
    #[arg(long, default_value_t = 0.0)]
    pub downside_threshold: f64,

    /// Use the deterministic offline price source instead of the network.
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    /// Per-request timeout in milliseconds.
    #[arg(long, default_value_t = 3000)]
    pub timeout_ms: u64,
}

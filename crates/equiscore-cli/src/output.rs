use equiscore_core::RiskReport;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(report: &RiskReport, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            println!("{payload}");
        }
        OutputFormat::Text => render_text(report),
    }

    Ok(())
}

fn render_text(report: &RiskReport) {
    println!();
    println!("Volatility: {:.2}%", report.volatility * 100.0);
    println!("Max Drawdown: {:.2}%", report.max_drawdown * 100.0);
    println!("Value at Risk (VaR): {:.2}%", report.value_at_risk * 100.0);
    println!(
        "Downside Deviation: {:.2}%",
        report.downside_deviation * 100.0
    );
    println!("Trend: {:.2}%", report.trend);
    println!("Sharpe Ratio: {:.4}", report.sharpe_ratio);
    println!("Calmar Ratio: {:.4}", report.calmar_ratio);

    println!();
    println!("Market comparisons:");
    for market in &report.markets {
        println!(
            "  {}: alpha {:.6}  beta {:.4}  treynor {:.4}  tracking error {:.4}",
            market.index, market.alpha, market.beta, market.treynor_ratio, market.tracking_error
        );
    }
    for excluded in &report.excluded_indices {
        println!(
            "  {}: excluded from the treynor average ({})",
            excluded.index, excluded.reason
        );
    }

    println!();
    println!(
        "With 1 being the least safe and 100 being the most safe, {}'s safety score \
in terms of risk of investment is {:.2}/100. This is based on data from the past year.",
        report.symbol, report.safety_score
    );
}

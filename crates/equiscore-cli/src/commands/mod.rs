mod assess;

use equiscore_core::RiskReport;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<RiskReport, CliError> {
    match &cli.command {
        Command::Assess(args) => assess::run(args).await,
    }
}

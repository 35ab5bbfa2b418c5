use equiscore_core::{AssessmentError, MetricError, SourceError, Symbol, ValidationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("data source failed for {symbol}: {source}")]
    Source { symbol: Symbol, source: SourceError },

    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    #[error("cannot derive returns for {symbol}: {source}")]
    Returns { symbol: Symbol, source: MetricError },

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Source { .. } => 3,
            Self::Assessment(_) | Self::Returns { .. } => 4,
            Self::Command(_) | Self::Serialization(_) | Self::Io(_) => 10,
        }
    }
}

//! Price-history source contract and its structured errors.

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::{PriceSeries, Symbol, TradingDate};

/// Identifier of a registered price-history provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    Yahoo,
    Fixture,
}

impl ProviderId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
            Self::Fixture => "fixture",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    DataUnavailable,
    EmptyRange,
    InvalidRequest,
    Internal,
}

/// Structured provider error.
///
/// `DataUnavailable` covers both unknown symbols (not retryable) and an
/// unreachable provider (retryable); `retryable()` separates them so the
/// caller can decide on a retry policy. The core itself never retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    kind: SourceErrorKind,
    message: String,
    retryable: bool,
}

impl SourceError {
    pub fn unknown_symbol(symbol: &Symbol) -> Self {
        Self {
            kind: SourceErrorKind::DataUnavailable,
            message: format!("no data for symbol '{symbol}'"),
            retryable: false,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::DataUnavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn empty_range(symbol: &Symbol, start: TradingDate, end: TradingDate) -> Self {
        Self {
            kind: SourceErrorKind::EmptyRange,
            message: format!("no observations for '{symbol}' between {start} and {end}"),
            retryable: false,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: SourceErrorKind::Internal,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> SourceErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            SourceErrorKind::DataUnavailable => "source.data_unavailable",
            SourceErrorKind::EmptyRange => "source.empty_range",
            SourceErrorKind::InvalidRequest => "source.invalid_request",
            SourceErrorKind::Internal => "source.internal",
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for SourceError {}

/// Request for one symbol's daily adjusted-close history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceHistoryRequest {
    pub symbol: Symbol,
    pub start: TradingDate,
    pub end: TradingDate,
}

impl PriceHistoryRequest {
    pub fn new(
        symbol: Symbol,
        start: TradingDate,
        end: TradingDate,
    ) -> Result<Self, SourceError> {
        if start >= end {
            return Err(SourceError::invalid_request(format!(
                "window start {start} must precede end {end}"
            )));
        }
        Ok(Self { symbol, start, end })
    }
}

/// Provider adapter contract.
pub trait PriceHistorySource: Send + Sync {
    fn id(&self) -> ProviderId;

    fn price_history<'a>(
        &'a self,
        request: &'a PriceHistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>>;
}

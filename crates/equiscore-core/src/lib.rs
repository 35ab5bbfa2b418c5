//! Core contracts for equiscore.
//!
//! This crate contains:
//! - Canonical domain models and validation (symbols, dates, price series)
//! - Return-series construction and date alignment
//! - The risk/return metric functions and their statistics primitives
//! - Weighted aggregation into the 1..=100 safety score
//! - The price-history source contract and provider adapters

pub mod adapters;
pub mod assessment;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod metrics;
pub mod returns;
pub mod stats;

pub use adapters::{FixtureSource, YahooSource};
pub use assessment::{
    assess, AssessmentConfig, AssessmentError, ExcludedIndex, MarketReturns, MarketStats,
    RiskReport, Weights, MAX_SCORE, MIN_SCORE,
};
pub use data_source::{
    PriceHistoryRequest, PriceHistorySource, ProviderId, SourceError, SourceErrorKind,
};
pub use domain::{PricePoint, PriceSeries, Symbol, TradingDate};
pub use error::{MetricError, ValidationError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, NoopHttpClient, ReqwestHttpClient};
pub use metrics::{AlphaBeta, TRADING_DAYS_PER_YEAR};
pub use returns::{AlignedPair, ReturnSeries};

use thiserror::Error;

/// Validation and contract errors exposed by `equiscore-core`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter or '^': '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("date must be ISO calendar format YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },
    #[error("timestamp {value} is outside the representable date range")]
    TimestampOutOfRange { value: i64 },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("price must be positive: {value}")]
    NonPositivePrice { value: f64 },
    #[error("observation dates must be strictly increasing (violation at index {index})")]
    DatesNotIncreasing { index: usize },

    #[error("weight for '{metric}' must be a non-negative finite number")]
    InvalidWeight { metric: &'static str },
    #[error("weights must sum to 1.0, got {sum}")]
    WeightSumNotOne { sum: f64 },
    #[error("tail probability must lie in (0, 1): {value}")]
    InvalidTailProbability { value: f64 },
}

/// Failure modes of the statistical metric functions.
///
/// Every metric fails fast with the specific kind instead of letting a
/// NaN or infinity leak into downstream arithmetic.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetricError {
    #[error("{metric} requires at least {required} observations, got {actual}")]
    InsufficientData {
        metric: &'static str,
        required: usize,
        actual: usize,
    },
    #[error("{metric} is undefined for zero-variance input")]
    DegenerateVariance { metric: &'static str },
    #[error("{metric} denominator is zero")]
    DivisionByZero { metric: &'static str },
    #[error("paired series have different lengths: {left} vs {right}")]
    MisalignedSeries { left: usize, right: usize },
}

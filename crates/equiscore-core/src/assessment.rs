//! Weighted aggregation of the individual metrics into one safety score.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metrics;
use crate::returns::{AlignedPair, ReturnSeries};
use crate::{MetricError, Symbol, ValidationError};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Score bounds after clamping.
pub const MIN_SCORE: f64 = 1.0;
pub const MAX_SCORE: f64 = 100.0;

/// Aggregator failures, attributed to the metric that could not be
/// computed. A partial score is never produced.
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("cannot compute {metric} for {symbol}: {source}")]
    Metric {
        symbol: Symbol,
        metric: &'static str,
        source: MetricError,
    },

    #[error("no usable market index: {excluded} of {total} had a degenerate beta")]
    AllMarketsDegenerate { excluded: usize, total: usize },
}

/// Per-metric weights of the composite score.
///
/// Validated at construction: every weight non-negative and finite, and
/// the eight weights summing to 1.0. Alternate schemes substitute here
/// without touching the aggregation arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub treynor_ratio: f64,
    pub calmar_ratio: f64,
    pub value_at_risk: f64,
    pub downside_deviation: f64,
    pub trend: f64,
}

impl Weights {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        volatility: f64,
        sharpe_ratio: f64,
        max_drawdown: f64,
        treynor_ratio: f64,
        calmar_ratio: f64,
        value_at_risk: f64,
        downside_deviation: f64,
        trend: f64,
    ) -> Result<Self, ValidationError> {
        let weights = Self {
            volatility,
            sharpe_ratio,
            max_drawdown,
            treynor_ratio,
            calmar_ratio,
            value_at_risk,
            downside_deviation,
            trend,
        };

        for (metric, value) in weights.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidWeight { metric });
            }
        }

        let sum = weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ValidationError::WeightSumNotOne { sum });
        }

        Ok(weights)
    }

    pub fn sum(&self) -> f64 {
        self.entries().iter().map(|(_, value)| value).sum()
    }

    fn entries(&self) -> [(&'static str, f64); 8] {
        [
            ("volatility", self.volatility),
            ("sharpe_ratio", self.sharpe_ratio),
            ("max_drawdown", self.max_drawdown),
            ("treynor_ratio", self.treynor_ratio),
            ("calmar_ratio", self.calmar_ratio),
            ("value_at_risk", self.value_at_risk),
            ("downside_deviation", self.downside_deviation),
            ("trend", self.trend),
        ]
    }
}

impl Default for Weights {
    /// The standard weighting: volatility carries the most weight,
    /// trend second, the ratio metrics share the rest.
    fn default() -> Self {
        Self {
            volatility: 0.35,
            sharpe_ratio: 0.10,
            max_drawdown: 0.10,
            treynor_ratio: 0.10,
            calmar_ratio: 0.10,
            value_at_risk: 0.05,
            downside_deviation: 0.05,
            trend: 0.15,
        }
    }
}

/// Parameters of one assessment run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Subtracted from each daily return as-is, without annualization.
    pub risk_free_rate: f64,
    /// Tail probability of the value-at-risk quantile.
    pub var_tail: f64,
    /// Returns below this value count as downside.
    pub downside_threshold: f64,
    pub weights: Weights,
}

impl AssessmentConfig {
    pub fn new(
        risk_free_rate: f64,
        var_tail: f64,
        downside_threshold: f64,
        weights: Weights,
    ) -> Result<Self, ValidationError> {
        if !risk_free_rate.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                field: "risk_free_rate",
            });
        }
        if !downside_threshold.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                field: "downside_threshold",
            });
        }
        if !var_tail.is_finite() || var_tail <= 0.0 || var_tail >= 1.0 {
            return Err(ValidationError::InvalidTailProbability { value: var_tail });
        }

        Ok(Self {
            risk_free_rate,
            var_tail,
            downside_threshold,
            weights,
        })
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.02,
            var_tail: 0.05,
            downside_threshold: 0.0,
            weights: Weights::default(),
        }
    }
}

/// One market index's return series, keyed by its symbol for attribution.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketReturns {
    pub index: Symbol,
    pub returns: ReturnSeries,
}

/// Regression and dispersion statistics against one market index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketStats {
    pub index: Symbol,
    pub alpha: f64,
    pub beta: f64,
    pub treynor_ratio: f64,
    pub tracking_error: f64,
}

/// A market index dropped from the Treynor average, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcludedIndex {
    pub index: Symbol,
    pub reason: String,
}

/// Every individual metric plus the final clamped score.
///
/// Metric values are exposed untouched; normalization happens only inside
/// the score arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskReport {
    pub symbol: Symbol,
    pub volatility: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub value_at_risk: f64,
    pub downside_deviation: f64,
    pub trend: f64,
    pub calmar_ratio: f64,
    pub markets: Vec<MarketStats>,
    pub excluded_indices: Vec<ExcludedIndex>,
    pub safety_score: f64,
}

/// Compute every metric over one shared return series and blend eight of
/// them into the clamped 1..=100 safety score.
///
/// A market index whose beta is degenerate (flat market, or a beta of
/// exactly zero) is dropped from the Treynor average and surfaced in
/// `excluded_indices`; any other metric failure aborts the assessment.
pub fn assess(
    symbol: &Symbol,
    asset: &ReturnSeries,
    markets: &[MarketReturns],
    config: &AssessmentConfig,
) -> Result<RiskReport, AssessmentError> {
    let attribute = |metric: &'static str| {
        let symbol = symbol.clone();
        move |source: MetricError| AssessmentError::Metric {
            symbol,
            metric,
            source,
        }
    };

    let volatility = metrics::volatility(asset).map_err(attribute("volatility"))?;
    let sharpe_ratio =
        metrics::sharpe_ratio(asset, config.risk_free_rate).map_err(attribute("sharpe ratio"))?;
    let max_drawdown = metrics::max_drawdown(asset).map_err(attribute("max drawdown"))?;
    let value_at_risk =
        metrics::value_at_risk(asset, config.var_tail).map_err(attribute("value at risk"))?;
    let downside_deviation = metrics::downside_deviation(asset, config.downside_threshold)
        .map_err(attribute("downside deviation"))?;
    let trend = metrics::trend(asset).map_err(attribute("trend"))?;
    let calmar_ratio = metrics::calmar_ratio(asset).map_err(attribute("calmar ratio"))?;

    let mut market_stats = Vec::with_capacity(markets.len());
    let mut excluded = Vec::new();
    for market in markets {
        let pair =
            AlignedPair::align(asset, &market.returns).map_err(attribute("series alignment"))?;

        let coefficients = match metrics::alpha_beta(&pair, config.risk_free_rate) {
            Ok(coefficients) => coefficients,
            Err(source @ MetricError::DegenerateVariance { .. }) => {
                excluded.push(ExcludedIndex {
                    index: market.index.clone(),
                    reason: source.to_string(),
                });
                continue;
            }
            Err(source) => return Err(attribute("beta")(source)),
        };

        let treynor = match metrics::treynor_ratio(&pair, config.risk_free_rate) {
            Ok(treynor) => treynor,
            Err(source @ MetricError::DivisionByZero { .. }) => {
                excluded.push(ExcludedIndex {
                    index: market.index.clone(),
                    reason: source.to_string(),
                });
                continue;
            }
            Err(source) => return Err(attribute("treynor ratio")(source)),
        };

        let tracking_error =
            metrics::tracking_error(&pair).map_err(attribute("tracking error"))?;

        market_stats.push(MarketStats {
            index: market.index.clone(),
            alpha: coefficients.alpha,
            beta: coefficients.beta,
            treynor_ratio: treynor,
            tracking_error,
        });
    }

    if market_stats.is_empty() {
        return Err(AssessmentError::AllMarketsDegenerate {
            excluded: excluded.len(),
            total: markets.len(),
        });
    }

    let treynor_mean = market_stats
        .iter()
        .map(|stats| stats.treynor_ratio)
        .sum::<f64>()
        / market_stats.len() as f64;

    let safety_score = composite_score(
        &config.weights,
        volatility,
        sharpe_ratio,
        max_drawdown,
        treynor_mean,
        calmar_ratio,
        value_at_risk,
        downside_deviation,
        trend,
    );

    Ok(RiskReport {
        symbol: symbol.clone(),
        volatility,
        sharpe_ratio,
        max_drawdown,
        value_at_risk,
        downside_deviation,
        trend,
        calmar_ratio,
        markets: market_stats,
        excluded_indices: excluded,
        safety_score,
    })
}

/// Weighted blend of the normalized metrics, scaled to 1..=100.
///
/// The `/ 100.0` terms treat fractional metrics as if they were already on
/// a percentage scale, so those normalized values stay close to 1 and the
/// ratio metrics enter unnormalized. Any change to this arithmetic shifts
/// every score, so the scale is load-bearing and stays fixed.
#[allow(clippy::too_many_arguments)]
fn composite_score(
    weights: &Weights,
    volatility: f64,
    sharpe_ratio: f64,
    max_drawdown: f64,
    treynor_mean: f64,
    calmar_ratio: f64,
    value_at_risk: f64,
    downside_deviation: f64,
    trend: f64,
) -> f64 {
    let raw = weights.volatility * (1.0 - volatility / 100.0)
        + weights.sharpe_ratio * sharpe_ratio
        + weights.max_drawdown * (1.0 - max_drawdown)
        + weights.treynor_ratio * treynor_mean
        + weights.calmar_ratio * calmar_ratio
        + weights.value_at_risk * (1.0 - value_at_risk / 100.0)
        + weights.downside_deviation * (1.0 - downside_deviation / 100.0)
        + weights.trend * (1.0 - trend.abs() / 100.0);

    (raw * 100.0).clamp(MIN_SCORE, MAX_SCORE)
}

//! Risk and return statistics over a daily return series.
//!
//! Every function is pure and fails fast with a [`MetricError`] instead of
//! producing NaN or infinity. The risk-free rate parameters are subtracted
//! from each daily observation as-is; callers holding an annual rate must
//! convert it to a per-day figure themselves if that precision matters.

use crate::returns::{AlignedPair, ReturnSeries};
use crate::stats;
use crate::MetricError;

/// Annualization base for daily observations.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Betas below this magnitude are treated as zero denominators.
const BETA_EPSILON: f64 = 1e-12;

/// Regression coefficients of an asset against one market index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaBeta {
    pub alpha: f64,
    pub beta: f64,
}

/// Annualized standard deviation of daily returns, as a fraction.
pub fn volatility(returns: &ReturnSeries) -> Result<f64, MetricError> {
    let std = stats::sample_std_dev(returns.values()).ok_or(MetricError::InsufficientData {
        metric: "volatility",
        required: 2,
        actual: returns.len(),
    })?;
    Ok(std * TRADING_DAYS_PER_YEAR.sqrt())
}

/// Alpha and beta of the asset leg against the market leg.
///
/// Beta divides the sample covariance of the excess returns by the
/// population variance of the market excess returns; alpha is the excess
/// mean not explained by beta.
pub fn alpha_beta(pair: &AlignedPair, risk_free_rate: f64) -> Result<AlphaBeta, MetricError> {
    let excess: Vec<f64> = pair.asset().iter().map(|r| r - risk_free_rate).collect();
    let excess_market: Vec<f64> = pair.market().iter().map(|r| r - risk_free_rate).collect();

    let covariance =
        stats::sample_covariance(&excess, &excess_market).ok_or(MetricError::InsufficientData {
            metric: "beta",
            required: 2,
            actual: pair.len(),
        })?;
    let market_variance =
        stats::population_variance(&excess_market).ok_or(MetricError::InsufficientData {
            metric: "beta",
            required: 1,
            actual: pair.len(),
        })?;

    if market_variance == 0.0 {
        return Err(MetricError::DegenerateVariance { metric: "beta" });
    }

    let beta = covariance / market_variance;
    let mean_excess = stats::mean(&excess).unwrap_or_default();
    let mean_excess_market = stats::mean(&excess_market).unwrap_or_default();
    let alpha = mean_excess - beta * mean_excess_market;

    Ok(AlphaBeta { alpha, beta })
}

/// Mean excess return per unit of excess-return standard deviation.
pub fn sharpe_ratio(returns: &ReturnSeries, risk_free_rate: f64) -> Result<f64, MetricError> {
    let excess: Vec<f64> = returns.values().iter().map(|r| r - risk_free_rate).collect();

    let std = stats::sample_std_dev(&excess).ok_or(MetricError::InsufficientData {
        metric: "sharpe ratio",
        required: 2,
        actual: returns.len(),
    })?;
    if std == 0.0 {
        return Err(MetricError::DegenerateVariance {
            metric: "sharpe ratio",
        });
    }

    let mean = stats::mean(&excess).unwrap_or_default();
    Ok(mean / std)
}

/// Largest peak-to-trough decline of the cumulative-return curve.
///
/// The curve starts at 1.0 before the first return, so a lone negative
/// return reports that loss rather than zero. The result is never
/// positive; 0 means the curve never fell below a previous peak.
pub fn max_drawdown(returns: &ReturnSeries) -> Result<f64, MetricError> {
    if returns.is_empty() {
        return Err(MetricError::InsufficientData {
            metric: "max drawdown",
            required: 1,
            actual: 0,
        });
    }

    let mut cumulative = 1.0_f64;
    let mut peak = 1.0_f64;
    let mut worst = 0.0_f64;
    for r in returns.values() {
        cumulative *= 1.0 + r;
        if cumulative > peak {
            peak = cumulative;
        }
        let drawdown = cumulative / peak - 1.0;
        if drawdown < worst {
            worst = drawdown;
        }
    }

    Ok(worst)
}

/// Mean excess return per unit of beta against one market index.
pub fn treynor_ratio(pair: &AlignedPair, risk_free_rate: f64) -> Result<f64, MetricError> {
    let coefficients = alpha_beta(pair, risk_free_rate)?;
    if coefficients.beta.abs() < BETA_EPSILON {
        return Err(MetricError::DivisionByZero {
            metric: "treynor ratio",
        });
    }

    let excess: Vec<f64> = pair.asset().iter().map(|r| r - risk_free_rate).collect();
    let mean_excess = stats::mean(&excess).ok_or(MetricError::InsufficientData {
        metric: "treynor ratio",
        required: 1,
        actual: pair.len(),
    })?;

    Ok(mean_excess / coefficients.beta)
}

/// Empirical value at risk: the `tail` quantile of the return distribution.
///
/// Uses the linear-interpolation percentile, so `tail = 0.5` is exactly the
/// median. Typically negative; the caller-supplied tail probability is
/// validated at configuration time.
pub fn value_at_risk(returns: &ReturnSeries, tail: f64) -> Result<f64, MetricError> {
    stats::percentile_linear(returns.values(), tail * 100.0).ok_or(MetricError::InsufficientData {
        metric: "value at risk",
        required: 1,
        actual: returns.len(),
    })
}

/// Population standard deviation of the returns below `threshold`.
///
/// A window with no below-threshold return has no downside dispersion and
/// reports 0.0 rather than an error.
pub fn downside_deviation(returns: &ReturnSeries, threshold: f64) -> Result<f64, MetricError> {
    if returns.is_empty() {
        return Err(MetricError::InsufficientData {
            metric: "downside deviation",
            required: 1,
            actual: 0,
        });
    }

    let downside: Vec<f64> = returns
        .values()
        .iter()
        .copied()
        .filter(|r| *r < threshold)
        .collect();

    Ok(stats::population_std_dev(&downside).unwrap_or(0.0))
}

/// Population standard deviation of the per-day return differences.
pub fn tracking_error(pair: &AlignedPair) -> Result<f64, MetricError> {
    let differences: Vec<f64> = pair
        .asset()
        .iter()
        .zip(pair.market())
        .map(|(a, m)| a - m)
        .collect();

    stats::population_std_dev(&differences).ok_or(MetricError::InsufficientData {
        metric: "tracking error",
        required: 1,
        actual: pair.len(),
    })
}

/// Least-squares slope of return against observation index, scaled by 1e6
/// for legibility at daily-return magnitudes.
pub fn trend(returns: &ReturnSeries) -> Result<f64, MetricError> {
    let slope = stats::ols_slope(returns.values()).ok_or(MetricError::InsufficientData {
        metric: "trend",
        required: 2,
        actual: returns.len(),
    })?;
    Ok(slope * 1e6)
}

/// Annualized mean return over the magnitude of the max drawdown.
pub fn calmar_ratio(returns: &ReturnSeries) -> Result<f64, MetricError> {
    let mean = stats::mean(returns.values()).ok_or(MetricError::InsufficientData {
        metric: "calmar ratio",
        required: 1,
        actual: 0,
    })?;
    let annualized = (1.0 + mean).powf(TRADING_DAYS_PER_YEAR) - 1.0;

    let drawdown = max_drawdown(returns)?;
    if drawdown == 0.0 {
        return Err(MetricError::DivisionByZero {
            metric: "calmar ratio",
        });
    }

    Ok(annualized / drawdown.abs())
}

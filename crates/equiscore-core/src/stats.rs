//! Scalar statistics shared by the metric functions.
//!
//! Each helper returns `None` when the sample is too small for the
//! statistic; the metric layer converts that into a typed error. The
//! normalization conventions are deliberate and must not be "unified":
//! volatility and Sharpe use the sample (n-1) standard deviation, downside
//! deviation and tracking error use the population (n) form, and beta
//! divides the sample covariance by the population variance of the market
//! leg. Scores are only comparable across runs if these stay fixed.

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Unbiased sample variance (n-1 denominator). Needs at least 2 values.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let sum_sq = values.iter().map(|v| (v - m).powi(2)).sum::<f64>();
    Some(sum_sq / (values.len() - 1) as f64)
}

pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Population variance (n denominator). Needs at least 1 value.
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let sum_sq = values.iter().map(|v| (v - m).powi(2)).sum::<f64>();
    Some(sum_sq / values.len() as f64)
}

pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    population_variance(values).map(f64::sqrt)
}

/// Unbiased sample covariance (n-1 denominator) of two equal-length slices.
pub fn sample_covariance(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;
    let sum = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (x - mx) * (y - my))
        .sum::<f64>();
    Some(sum / (xs.len() - 1) as f64)
}

/// Percentile with linear interpolation between closest ranks.
///
/// `pct` is on the 0..=100 scale. The rank is `pct/100 * (n-1)` and the
/// result interpolates between the two bracketing order statistics, so
/// `percentile_linear(v, 50.0)` is the median for any sample size.
pub fn percentile_linear(values: &[f64], pct: f64) -> Option<f64> {
    if values.is_empty() || !(0.0..=100.0).contains(&pct) {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = pct / 100.0 * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }

    let fraction = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * fraction)
}

/// Least-squares slope of `values` against their index 0..n-1.
pub fn ols_slope(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let n = values.len() as f64;
    let x_mean = (n - 1.0) / 2.0;
    let y_mean = mean(values)?;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (index, y) in values.iter().enumerate() {
        let dx = index as f64 - x_mean;
        sxy += dx * (y - y_mean);
        sxx += dx * dx;
    }

    Some(sxy / sxx)
}

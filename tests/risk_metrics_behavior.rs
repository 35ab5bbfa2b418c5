//! Behavior-driven tests for the risk metric functions.
//!
//! These tests verify HOW the statistics behave on realistic inputs:
//! series construction, sign and degeneracy properties, and the worked
//! five-observation example used as the reproducibility anchor.

use equiscore_tests::{price_series, returns_of};

use equiscore_core::{metrics, AlignedPair, MetricError, ReturnSeries};

const EPS: f64 = 1e-12;

// The reproducibility anchor: five observations, four returns.
const ANCHOR: [f64; 5] = [100.0, 102.0, 101.0, 105.0, 103.0];

// =============================================================================
// Return Series: Construction
// =============================================================================

#[test]
fn when_prices_have_n_observations_returns_have_n_minus_one() {
    // Given: a five-observation price history
    let prices = price_series("AAPL", &ANCHOR);

    // When: the return series is built
    let returns = ReturnSeries::from_prices(&prices).expect("valid return series");

    // Then: it is one shorter and reconstructs each price ratio exactly
    assert_eq!(returns.len(), prices.len() - 1);
    for (index, r) in returns.values().iter().enumerate() {
        let ratio = ANCHOR[index + 1] / ANCHOR[index];
        assert!((1.0 + r - ratio).abs() < EPS, "return {index} must invert to the price ratio");
    }
}

#[test]
fn when_anchor_series_is_built_returns_match_the_worked_values() {
    let returns = returns_of("AAPL", &ANCHOR);

    let expected = [
        0.02,
        101.0 / 102.0 - 1.0, // -0.009803921...
        105.0 / 101.0 - 1.0, // 0.039603960...
        103.0 / 105.0 - 1.0, // -0.019047619...
    ];
    for (value, expected) in returns.values().iter().zip(expected) {
        assert!((value - expected).abs() < EPS);
    }
}

#[test]
fn when_history_has_one_observation_return_building_fails() {
    let prices = price_series("AAPL", &[100.0]);

    let error = ReturnSeries::from_prices(&prices).expect_err("too short");
    assert!(matches!(
        error,
        MetricError::InsufficientData {
            required: 2,
            actual: 1,
            ..
        }
    ));
}

// =============================================================================
// Volatility
// =============================================================================

#[test]
fn when_returns_vary_volatility_is_positive() {
    let returns = returns_of("AAPL", &ANCHOR);
    assert!(metrics::volatility(&returns).expect("volatility") > 0.0);
}

#[test]
fn when_all_returns_are_identical_volatility_is_exactly_zero() {
    let returns = returns_of("FLAT", &[100.0, 100.0, 100.0, 100.0]);
    assert_eq!(metrics::volatility(&returns).expect("volatility"), 0.0);
}

// =============================================================================
// Max Drawdown
// =============================================================================

#[test]
fn when_curve_is_non_decreasing_drawdown_is_zero() {
    let returns = returns_of("UP", &[100.0, 101.0, 103.0, 107.0]);
    assert_eq!(metrics::max_drawdown(&returns).expect("drawdown"), 0.0);
}

#[test]
fn when_curve_declines_drawdown_is_negative_and_bounded() {
    let returns = returns_of("AAPL", &ANCHOR);

    let drawdown = metrics::max_drawdown(&returns).expect("drawdown");
    // The deepest trough: 103 against the running peak of 105.
    assert!((drawdown - (103.0 / 105.0 - 1.0)).abs() < EPS);
    assert!(drawdown <= 0.0);
}

// =============================================================================
// Value at Risk
// =============================================================================

#[test]
fn when_tail_is_one_half_var_equals_the_median() {
    let returns = returns_of("AAPL", &ANCHOR);

    let var = metrics::value_at_risk(&returns, 0.5).expect("var");
    // Four returns: the median interpolates between the middle pair.
    let mut sorted = returns.values().to_vec();
    sorted.sort_by(f64::total_cmp);
    let median = (sorted[1] + sorted[2]) / 2.0;
    assert!((var - median).abs() < EPS);
}

#[test]
fn when_tail_is_five_percent_var_interpolates_between_the_two_worst_returns() {
    let returns = returns_of("AAPL", &ANCHOR);

    let var = metrics::value_at_risk(&returns, 0.05).expect("var");
    let mut sorted = returns.values().to_vec();
    sorted.sort_by(f64::total_cmp);
    // rank = 0.05 * (4 - 1) = 0.15 into the sorted tail.
    let expected = sorted[0] + 0.15 * (sorted[1] - sorted[0]);
    assert!((var - expected).abs() < EPS);
    assert!(var < 0.0, "the tail of this series is a loss");
}

// =============================================================================
// Sharpe and Treynor
// =============================================================================

#[test]
fn when_risk_free_rate_rises_sharpe_strictly_falls() {
    let returns = returns_of("AAPL", &ANCHOR);

    let mut previous = f64::INFINITY;
    for rate in [0.0, 0.01, 0.02, 0.05] {
        let sharpe = metrics::sharpe_ratio(&returns, rate).expect("sharpe");
        assert!(sharpe < previous, "sharpe must fall as the rate rises");
        previous = sharpe;
    }
}

#[test]
fn when_prices_never_move_sharpe_fails_with_degenerate_variance() {
    let returns = returns_of("FLAT", &[100.0, 100.0, 100.0, 100.0]);

    let error = metrics::sharpe_ratio(&returns, 0.02).expect_err("must fail");
    assert!(matches!(error, MetricError::DegenerateVariance { .. }));
}

#[test]
fn when_asset_is_orthogonal_to_the_market_treynor_fails_with_zero_beta() {
    // Given: an asset whose covariance with the market is exactly zero
    let pair = AlignedPair::from_slices(
        &[0.01, -0.01, 0.01, -0.01],
        &[0.01, 0.01, -0.01, -0.01],
    )
    .expect("aligned");

    // When/Then: the ratio refuses to divide by the zero beta
    let error = metrics::treynor_ratio(&pair, 0.0).expect_err("must fail");
    assert!(matches!(error, MetricError::DivisionByZero { .. }));
}

// =============================================================================
// Downside Deviation and Tracking Error
// =============================================================================

#[test]
fn when_no_return_is_below_threshold_downside_deviation_is_zero() {
    let returns = returns_of("UP", &[100.0, 101.0, 103.0, 107.0]);
    assert_eq!(
        metrics::downside_deviation(&returns, 0.0).expect("downside"),
        0.0
    );
}

#[test]
fn when_paired_series_lengths_differ_tracking_error_is_rejected() {
    let error = AlignedPair::from_slices(&[0.01, 0.02, 0.03], &[0.01]).expect_err("must fail");
    assert!(matches!(
        error,
        MetricError::MisalignedSeries { left: 3, right: 1 }
    ));
}

#[test]
fn when_asset_tracks_the_benchmark_exactly_tracking_error_is_zero() {
    let values = [0.01, -0.02, 0.015, 0.005];
    let pair = AlignedPair::from_slices(&values, &values).expect("aligned");
    assert_eq!(metrics::tracking_error(&pair).expect("tracking error"), 0.0);
}

// =============================================================================
// Trend and Calmar
// =============================================================================

#[test]
fn when_returns_climb_linearly_trend_is_positive() {
    // Returns grow with the index, so the regression slope is positive.
    let prices = [100.0, 99.0, 99.0, 100.0, 102.5, 106.5];
    let returns = returns_of("TREND", &prices);
    assert!(metrics::trend(&returns).expect("trend") > 0.0);
}

#[test]
fn when_curve_never_draws_down_calmar_fails_with_division_by_zero() {
    let returns = returns_of("UP", &[100.0, 101.0, 103.0, 107.0]);

    let error = metrics::calmar_ratio(&returns).expect_err("must fail");
    assert!(matches!(error, MetricError::DivisionByZero { .. }));
}

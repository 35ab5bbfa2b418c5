//! Daily simple-return series and date alignment of paired series.

use crate::{MetricError, PriceSeries, TradingDate};

/// Daily simple returns derived from an adjusted-close history.
///
/// `r[i] = p[i+1]/p[i] - 1`; the first observation has no return and is
/// dropped, so the series is one shorter than its price history. Each
/// return is keyed by the date of the later observation, which is what
/// pair-wise alignment joins on. Built once per symbol and shared by
/// reference into every metric.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    dates: Vec<TradingDate>,
    values: Vec<f64>,
}

impl ReturnSeries {
    pub fn from_prices(prices: &PriceSeries) -> Result<Self, MetricError> {
        if prices.len() < 2 {
            return Err(MetricError::InsufficientData {
                metric: "daily returns",
                required: 2,
                actual: prices.len(),
            });
        }

        let points = prices.points();
        let mut dates = Vec::with_capacity(points.len() - 1);
        let mut values = Vec::with_capacity(points.len() - 1);
        for pair in points.windows(2) {
            dates.push(pair[1].date);
            values.push(pair[1].adj_close / pair[0].adj_close - 1.0);
        }

        Ok(Self { dates, values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn dates(&self) -> &[TradingDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Two return series restricted to their common dates.
///
/// Alignment is an inner join on observation date, no interpolation:
/// returns on dates only one side observed are discarded. Equal length is
/// a construction invariant, so the pair-wise metrics never see ragged
/// input.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    asset: Vec<f64>,
    market: Vec<f64>,
}

impl AlignedPair {
    /// Join two series on their common dates.
    pub fn align(asset: &ReturnSeries, market: &ReturnSeries) -> Result<Self, MetricError> {
        let mut asset_values = Vec::new();
        let mut market_values = Vec::new();

        let mut a = 0;
        let mut m = 0;
        while a < asset.len() && m < market.len() {
            match asset.dates[a].cmp(&market.dates[m]) {
                std::cmp::Ordering::Less => a += 1,
                std::cmp::Ordering::Greater => m += 1,
                std::cmp::Ordering::Equal => {
                    asset_values.push(asset.values[a]);
                    market_values.push(market.values[m]);
                    a += 1;
                    m += 1;
                }
            }
        }

        if asset_values.len() < 2 {
            return Err(MetricError::InsufficientData {
                metric: "series alignment",
                required: 2,
                actual: asset_values.len(),
            });
        }

        Ok(Self {
            asset: asset_values,
            market: market_values,
        })
    }

    /// Build from raw slices the caller claims are already aligned.
    pub fn from_slices(asset: &[f64], market: &[f64]) -> Result<Self, MetricError> {
        if asset.len() != market.len() {
            return Err(MetricError::MisalignedSeries {
                left: asset.len(),
                right: market.len(),
            });
        }
        Ok(Self {
            asset: asset.to_vec(),
            market: market.to_vec(),
        })
    }

    pub fn asset(&self) -> &[f64] {
        &self.asset
    }

    pub fn market(&self) -> &[f64] {
        &self.market
    }

    pub fn len(&self) -> usize {
        self.asset.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asset.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PricePoint, Symbol};

    fn series(symbol: &str, observations: &[(&str, f64)]) -> PriceSeries {
        let points = observations
            .iter()
            .map(|(date, price)| PricePoint {
                date: TradingDate::parse(date).expect("date"),
                adj_close: *price,
            })
            .collect();
        PriceSeries::new(Symbol::parse(symbol).expect("symbol"), points).expect("series")
    }

    #[test]
    fn return_series_is_one_shorter_than_prices() {
        let prices = series(
            "AAPL",
            &[
                ("2024-01-02", 100.0),
                ("2024-01-03", 102.0),
                ("2024-01-04", 101.0),
            ],
        );
        let returns = ReturnSeries::from_prices(&prices).expect("returns");
        assert_eq!(returns.len(), prices.len() - 1);
        assert!((returns.values()[0] - 0.02).abs() < 1e-12);
        assert!((returns.values()[1] - (101.0 / 102.0 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn reconstructs_price_ratio_from_return() {
        let prices = series("AAPL", &[("2024-01-02", 97.0), ("2024-01-03", 103.5)]);
        let returns = ReturnSeries::from_prices(&prices).expect("returns");
        assert!((1.0 + returns.values()[0] - 103.5 / 97.0).abs() < 1e-12);
    }

    #[test]
    fn single_price_cannot_build_returns() {
        let prices = series("AAPL", &[("2024-01-02", 100.0)]);
        let err = ReturnSeries::from_prices(&prices).expect_err("must fail");
        assert!(matches!(
            err,
            MetricError::InsufficientData {
                required: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn align_keeps_only_common_dates() {
        let asset = ReturnSeries::from_prices(&series(
            "AAPL",
            &[
                ("2024-01-02", 100.0),
                ("2024-01-03", 101.0),
                ("2024-01-04", 102.0),
                ("2024-01-05", 103.0),
            ],
        ))
        .expect("asset returns");
        // The market is missing 2024-01-04.
        let market = ReturnSeries::from_prices(&series(
            "^GSPC",
            &[
                ("2024-01-02", 5000.0),
                ("2024-01-03", 5010.0),
                ("2024-01-05", 5020.0),
            ],
        ))
        .expect("market returns");

        let pair = AlignedPair::align(&asset, &market).expect("aligned");
        assert_eq!(pair.len(), 2);
        assert!((pair.asset()[0] - 0.01).abs() < 1e-12);
        assert!((pair.market()[0] - 0.002).abs() < 1e-12);
    }

    #[test]
    fn align_fails_without_overlap() {
        let asset = ReturnSeries::from_prices(&series(
            "AAPL",
            &[("2024-01-02", 100.0), ("2024-01-03", 101.0)],
        ))
        .expect("asset returns");
        let market = ReturnSeries::from_prices(&series(
            "^GSPC",
            &[("2024-02-02", 5000.0), ("2024-02-03", 5010.0)],
        ))
        .expect("market returns");

        let err = AlignedPair::align(&asset, &market).expect_err("must fail");
        assert!(matches!(err, MetricError::InsufficientData { .. }));
    }

    #[test]
    fn from_slices_rejects_length_mismatch() {
        let err = AlignedPair::from_slices(&[0.01, 0.02], &[0.01]).expect_err("must fail");
        assert!(matches!(
            err,
            MetricError::MisalignedSeries { left: 2, right: 1 }
        ));
    }
}

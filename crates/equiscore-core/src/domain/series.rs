use serde::{Deserialize, Serialize};

use crate::{Symbol, TradingDate, ValidationError};

/// One daily observation: calendar date and adjusted close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: TradingDate,
    pub adj_close: f64,
}

impl PricePoint {
    pub fn new(date: TradingDate, adj_close: f64) -> Result<Self, ValidationError> {
        if !adj_close.is_finite() {
            return Err(ValidationError::NonFiniteValue { field: "adj_close" });
        }
        if adj_close <= 0.0 {
            return Err(ValidationError::NonPositivePrice { value: adj_close });
        }
        Ok(Self { date, adj_close })
    }
}

/// Ordered adjusted-close history for one symbol.
///
/// Invariants enforced at construction: dates strictly increasing, every
/// price positive and finite. Immutable once built; every metric in an
/// assessment observes this one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: Symbol,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: Symbol, points: Vec<PricePoint>) -> Result<Self, ValidationError> {
        for (index, point) in points.iter().enumerate() {
            if !point.adj_close.is_finite() {
                return Err(ValidationError::NonFiniteValue { field: "adj_close" });
            }
            if point.adj_close <= 0.0 {
                return Err(ValidationError::NonPositivePrice {
                    value: point.adj_close,
                });
            }
            if index > 0 && points[index - 1].date >= point.date {
                return Err(ValidationError::DatesNotIncreasing { index });
            }
        }

        Ok(Self { symbol, points })
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<TradingDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<TradingDate> {
        self.points.last().map(|p| p.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(date: &str, price: f64) -> PricePoint {
        PricePoint {
            date: TradingDate::parse(date).expect("date"),
            adj_close: price,
        }
    }

    #[test]
    fn accepts_strictly_increasing_series() {
        let symbol = Symbol::parse("AAPL").expect("symbol");
        let series = PriceSeries::new(
            symbol,
            vec![point("2024-01-02", 100.0), point("2024-01-03", 101.5)],
        )
        .expect("series should validate");
        assert_eq!(series.len(), 2);
        assert_eq!(series.first_date(), Some(TradingDate::parse("2024-01-02").expect("date")));
    }

    #[test]
    fn rejects_duplicate_dates() {
        let symbol = Symbol::parse("AAPL").expect("symbol");
        let err = PriceSeries::new(
            symbol,
            vec![point("2024-01-02", 100.0), point("2024-01-02", 101.5)],
        )
        .expect_err("must fail");
        assert!(matches!(err, ValidationError::DatesNotIncreasing { index: 1 }));
    }

    #[test]
    fn rejects_non_positive_price() {
        let symbol = Symbol::parse("AAPL").expect("symbol");
        let err = PriceSeries::new(symbol, vec![point("2024-01-02", 0.0)]).expect_err("must fail");
        assert!(matches!(err, ValidationError::NonPositivePrice { .. }));
    }

    #[test]
    fn rejects_non_finite_price() {
        let err = PricePoint::new(
            TradingDate::parse("2024-01-02").expect("date"),
            f64::NAN,
        )
        .expect_err("must fail");
        assert!(matches!(err, ValidationError::NonFiniteValue { .. }));
    }
}

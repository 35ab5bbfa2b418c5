use std::future::Future;
use std::pin::Pin;

use time::Duration;

use crate::data_source::{PriceHistoryRequest, PriceHistorySource, ProviderId, SourceError};
use crate::{PricePoint, PriceSeries, TradingDate};

/// Deterministic offline price source.
///
/// Generates a symbol-seeded daily price walk over the requested window,
/// so tests and the `--offline` mode get stable, non-degenerate data
/// without touching the network. Steps stay within ±2%, which keeps every
/// series positive and gives each window both gains and losses.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSource;

impl FixtureSource {
    fn walk(request: &PriceHistoryRequest) -> Vec<PricePoint> {
        let seed = symbol_seed(request.symbol.as_str());
        let mut price = 40.0 + (seed % 4_000) as f64 / 100.0;
        let mut points = Vec::new();

        let mut date = request.start;
        let mut tick = 0_u64;
        while date <= request.end {
            let noise = seed.wrapping_add(tick.wrapping_mul(2_654_435_761)) % 2_001;
            let step = (noise as f64 - 1_000.0) / 50_000.0;
            price *= 1.0 + step;
            points.push(PricePoint {
                date,
                adj_close: price,
            });

            date = TradingDate::from_date(date.into_inner() + Duration::days(1));
            tick += 1;
        }

        points
    }
}

impl PriceHistorySource for FixtureSource {
    fn id(&self) -> ProviderId {
        ProviderId::Fixture
    }

    fn price_history<'a>(
        &'a self,
        request: &'a PriceHistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let points = Self::walk(request);
            PriceSeries::new(request.symbol.clone(), points)
                .map_err(|error| SourceError::internal(error.to_string()))
        })
    }
}

fn symbol_seed(symbol: &str) -> u64 {
    symbol.bytes().fold(0_u64, |acc, byte| {
        acc.wrapping_mul(33).wrapping_add(byte as u64)
    })
}

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use crate::data_source::{PriceHistoryRequest, PriceHistorySource, ProviderId, SourceError};
use crate::http_client::{HttpClient, HttpRequest};
use crate::{PricePoint, PriceSeries, TradingDate};

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const SECONDS_PER_DAY: i64 = 86_400;

/// Yahoo Finance chart-API adapter.
///
/// Fetches one symbol's daily adjusted-close history and normalizes it
/// into a validated [`PriceSeries`]. Null or non-positive observations in
/// the payload are dropped rather than propagated.
#[derive(Clone)]
pub struct YahooSource {
    client: Arc<dyn HttpClient>,
    timeout_ms: u64,
}

impl YahooSource {
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            timeout_ms: 3_000,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn chart_url(request: &PriceHistoryRequest) -> String {
        // period2 is exclusive, so push it one day past the requested end.
        format!(
            "{CHART_BASE_URL}/{}?period1={}&period2={}&interval=1d&events=history",
            urlencoding::encode(request.symbol.as_str()),
            request.start.unix_timestamp(),
            request.end.unix_timestamp() + SECONDS_PER_DAY,
        )
    }
}

impl PriceHistorySource for YahooSource {
    fn id(&self) -> ProviderId {
        ProviderId::Yahoo
    }

    fn price_history<'a>(
        &'a self,
        request: &'a PriceHistoryRequest,
    ) -> Pin<Box<dyn Future<Output = Result<PriceSeries, SourceError>> + Send + 'a>> {
        Box::pin(async move {
            let http_request =
                HttpRequest::get(Self::chart_url(request)).with_timeout_ms(self.timeout_ms);

            let response = self
                .client
                .execute(http_request)
                .await
                .map_err(|error| SourceError::unavailable(error.message().to_owned()))?;

            if response.status == 404 {
                return Err(SourceError::unknown_symbol(&request.symbol));
            }
            if !response.is_success() {
                return Err(SourceError::unavailable(format!(
                    "provider returned HTTP {}",
                    response.status
                )));
            }

            parse_chart(request, &response.body)
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    adjclose: Option<Vec<AdjCloseBlock>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseBlock {
    adjclose: Vec<Option<f64>>,
}

/// Normalize one chart payload into a validated price series.
fn parse_chart(request: &PriceHistoryRequest, body: &str) -> Result<PriceSeries, SourceError> {
    let response: ChartResponse = serde_json::from_str(body)
        .map_err(|error| SourceError::internal(format!("malformed chart payload: {error}")))?;

    if let Some(error) = response.chart.error {
        if error.code.eq_ignore_ascii_case("not found") {
            return Err(SourceError::unknown_symbol(&request.symbol));
        }
        return Err(SourceError::unavailable(format!(
            "provider error {}: {}",
            error.code, error.description
        )));
    }

    let result = response
        .chart
        .result
        .and_then(|mut results| (!results.is_empty()).then(|| results.remove(0)))
        .ok_or_else(|| SourceError::unknown_symbol(&request.symbol))?;

    let timestamps = result.timestamp.unwrap_or_default();
    if timestamps.is_empty() {
        return Err(SourceError::empty_range(
            &request.symbol,
            request.start,
            request.end,
        ));
    }

    let closes = result
        .indicators
        .adjclose
        .and_then(|mut blocks| (!blocks.is_empty()).then(|| blocks.remove(0)))
        .map(|block| block.adjclose)
        .ok_or_else(|| SourceError::internal("chart payload is missing adjclose"))?;

    let mut points: Vec<PricePoint> = Vec::with_capacity(timestamps.len());
    for (seconds, close) in timestamps.iter().zip(closes) {
        let Some(price) = close else { continue };
        if !price.is_finite() || price <= 0.0 {
            continue;
        }
        let Ok(date) = TradingDate::from_unix_timestamp(*seconds) else {
            continue;
        };
        // Intraday duplicates collapse onto one UTC date; keep the first.
        if points.last().is_some_and(|last| last.date >= date) {
            continue;
        }
        points.push(PricePoint {
            date,
            adj_close: price,
        });
    }

    if points.is_empty() {
        return Err(SourceError::empty_range(
            &request.symbol,
            request.start,
            request.end,
        ));
    }

    PriceSeries::new(request.symbol.clone(), points)
        .map_err(|error| SourceError::internal(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::SourceErrorKind;
    use crate::Symbol;

    fn request(symbol: &str) -> PriceHistoryRequest {
        PriceHistoryRequest::new(
            Symbol::parse(symbol).expect("symbol"),
            TradingDate::parse("2024-01-01").expect("date"),
            TradingDate::parse("2024-01-31").expect("date"),
        )
        .expect("request")
    }

    #[test]
    fn encodes_index_symbols_in_chart_url() {
        let url = YahooSource::chart_url(&request("^GSPC"));
        assert!(url.contains("/v8/finance/chart/%5EGSPC?"));
        assert!(url.contains("interval=1d"));
    }

    #[test]
    fn parses_valid_chart_payload() {
        // Three trading days; 2024-01-02T14:30:00Z onward, one day apart.
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704205800, 1704292200, 1704378600],
                    "indicators": {"adjclose": [{"adjclose": [185.2, 184.1, 186.9]}]}
                }],
                "error": null
            }
        }"#;

        let series = parse_chart(&request("AAPL"), body).expect("series");
        assert_eq!(series.len(), 3);
        assert_eq!(series.points()[0].adj_close, 185.2);
        assert_eq!(series.points()[0].date.format_iso(), "2024-01-02");
    }

    #[test]
    fn drops_null_and_non_positive_observations() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [1704205800, 1704292200, 1704378600, 1704465000],
                    "indicators": {"adjclose": [{"adjclose": [185.2, null, -1.0, 186.9]}]}
                }],
                "error": null
            }
        }"#;

        let series = parse_chart(&request("AAPL"), body).expect("series");
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[1].adj_close, 186.9);
    }

    #[test]
    fn maps_not_found_payload_to_unknown_symbol() {
        let body = r#"{
            "chart": {
                "result": null,
                "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
            }
        }"#;

        let err = parse_chart(&request("NOPE"), body).expect_err("must fail");
        assert_eq!(err.kind(), SourceErrorKind::DataUnavailable);
        assert!(!err.retryable());
    }

    #[test]
    fn maps_empty_timestamps_to_empty_range() {
        let body = r#"{
            "chart": {
                "result": [{
                    "timestamp": [],
                    "indicators": {"adjclose": [{"adjclose": []}]}
                }],
                "error": null
            }
        }"#;

        let err = parse_chart(&request("AAPL"), body).expect_err("must fail");
        assert_eq!(err.kind(), SourceErrorKind::EmptyRange);
    }

    #[test]
    fn malformed_payload_is_an_internal_error() {
        let err = parse_chart(&request("AAPL"), "not json").expect_err("must fail");
        assert_eq!(err.kind(), SourceErrorKind::Internal);
    }
}

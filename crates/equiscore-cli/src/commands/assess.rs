use std::io::{self, BufRead, Write};
use std::sync::Arc;

use equiscore_core::{
    assess, AssessmentConfig, FixtureSource, MarketReturns, PriceHistoryRequest,
    PriceHistorySource, PriceSeries, ReqwestHttpClient, ReturnSeries, RiskReport, Symbol,
    TradingDate, Weights, YahooSource,
};
use tokio::task::JoinSet;

use crate::cli::AssessArgs;
use crate::error::CliError;

pub async fn run(args: &AssessArgs) -> Result<RiskReport, CliError> {
    let raw_symbol = match &args.symbol {
        Some(symbol) => symbol.clone(),
        None => prompt_for_symbol()?,
    };
    let symbol = Symbol::parse(&raw_symbol)?;

    let indices = args
        .indices
        .iter()
        .map(|raw| Symbol::parse(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let config = AssessmentConfig::new(
        args.risk_free_rate,
        args.var_tail,
        args.downside_threshold,
        Weights::default(),
    )?;

    // Trailing window ending yesterday; the provider has no bar for today
    // until the session closes.
    let today = TradingDate::today_utc();
    let end = today.saturating_sub_days(1);
    let start = today.saturating_sub_days(args.window_days);

    let source: Arc<dyn PriceHistorySource> = if args.offline {
        Arc::new(FixtureSource)
    } else {
        Arc::new(
            YahooSource::new(Arc::new(ReqwestHttpClient::new()))
                .with_timeout_ms(args.timeout_ms),
        )
    };

    let series = fetch_all(&source, &symbol, &indices, start, end).await?;
    let (asset_series, index_series) = series.split_first().expect("fetch returns every symbol");

    let asset_returns =
        ReturnSeries::from_prices(asset_series).map_err(|source| CliError::Returns {
            symbol: symbol.clone(),
            source,
        })?;

    let markets = indices
        .iter()
        .zip(index_series)
        .map(|(index, prices)| {
            let returns =
                ReturnSeries::from_prices(prices).map_err(|source| CliError::Returns {
                    symbol: index.clone(),
                    source,
                })?;
            Ok(MarketReturns {
                index: index.clone(),
                returns,
            })
        })
        .collect::<Result<Vec<_>, CliError>>()?;

    Ok(assess(&symbol, &asset_returns, &markets, &config)?)
}

/// Fetch the asset and every index concurrently, joining before any
/// metric work starts. Results come back in argument order, asset first.
async fn fetch_all(
    source: &Arc<dyn PriceHistorySource>,
    symbol: &Symbol,
    indices: &[Symbol],
    start: TradingDate,
    end: TradingDate,
) -> Result<Vec<PriceSeries>, CliError> {
    let mut join_set = JoinSet::new();
    let symbols: Vec<Symbol> = std::iter::once(symbol.clone())
        .chain(indices.iter().cloned())
        .collect();

    for (position, fetch_symbol) in symbols.iter().cloned().enumerate() {
        let request = PriceHistoryRequest::new(fetch_symbol, start, end)
            .map_err(|error| CliError::Command(error.to_string()))?;
        let source = Arc::clone(source);
        join_set.spawn(async move {
            let result = source.price_history(&request).await;
            (position, request.symbol, result)
        });
    }

    let mut fetched: Vec<Option<PriceSeries>> = vec![None; symbols.len()];
    while let Some(joined) = join_set.join_next().await {
        let (position, fetch_symbol, result) =
            joined.map_err(|error| CliError::Command(error.to_string()))?;
        let series = result.map_err(|source| CliError::Source {
            symbol: fetch_symbol,
            source,
        })?;
        fetched[position] = Some(series);
    }

    Ok(fetched
        .into_iter()
        .map(|series| series.expect("every fetch position is filled"))
        .collect())
}

fn prompt_for_symbol() -> Result<String, CliError> {
    print!("Enter the stock symbol (for instance, AAPL): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_owned())
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::traits::QuoteProvider;
use crate::errors::CoreError;
use crate::models::quote::SeriesPoint;

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance provider.
///
/// - **Free**: No API key required.
/// - **Coverage**: Global equities, ETFs, indices, mutual funds.
/// - **Data**: Historical OHLCV at many range/interval granularities,
///   plus a lightweight current-price snapshot.
///
/// History queries go through the `yahoo_finance_api` crate
/// (`get_quote_range` maps directly onto the fetch tiers). The snapshot
/// reads the chart endpoint's `regularMarketPrice` metadata with a plain
/// HTTP request — it answers for symbols whose historical series come
/// back empty (halted or freshly listed instruments).
pub struct YahooFinanceProvider {
    connector: yahoo_finance_api::YahooConnector,
    client: Client,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new().map_err(|e| CoreError::Api {
            provider: "Yahoo Finance".into(),
            message: format!("Failed to create connector: {e}"),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("portfolio-watch/0.1")
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self { connector, client })
    }

    /// Convert a unix timestamp (seconds) to a UTC datetime.
    fn timestamp_to_utc(ts: i64) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(ts, 0)
    }
}

// ── Chart endpoint response types (snapshot) ────────────────────────

#[derive(Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
}

#[derive(Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[async_trait]
impl QuoteProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    async fn fetch_history(
        &self,
        ticker: &str,
        range: &str,
        interval: &str,
    ) -> Result<Vec<SeriesPoint>, CoreError> {
        let resp = self
            .connector
            .get_quote_range(ticker, interval, range)
            .await
            .map_err(|e| CoreError::Api {
                provider: "Yahoo Finance".into(),
                message: format!("Failed to fetch {range}/{interval} history for {ticker}: {e}"),
            })?;

        // An empty series is a valid answer for this tier; only a
        // malformed response is an error.
        let quotes = match resp.quotes() {
            Ok(quotes) => quotes,
            Err(yahoo_finance_api::YahooError::NoQuotes) => return Ok(Vec::new()),
            Err(e) => {
                return Err(CoreError::Api {
                    provider: "Yahoo Finance".into(),
                    message: format!("Failed to parse quotes for {ticker}: {e}"),
                })
            }
        };

        let points: Vec<SeriesPoint> = quotes
            .iter()
            .filter_map(|q| {
                let observed_at = Self::timestamp_to_utc(q.timestamp)?;
                if q.close.is_finite() {
                    Some(SeriesPoint {
                        observed_at,
                        close: q.close,
                    })
                } else {
                    None
                }
            })
            .collect();

        Ok(points)
    }

    async fn fetch_snapshot(&self, ticker: &str) -> Result<f64, CoreError> {
        let url = format!("{CHART_BASE_URL}/{ticker}?range=1d&interval=1d");

        let resp: ChartResponse = self
            .client
            .get(&url)
            .send()
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                provider: "Yahoo Finance".into(),
                message: format!("Failed to parse snapshot for {ticker}: {e}"),
            })?;

        resp.chart
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    results.swap_remove(0).meta.regular_market_price
                }
            })
            .ok_or_else(|| CoreError::Api {
                provider: "Yahoo Finance".into(),
                message: format!("No snapshot price for {ticker}"),
            })
    }
}

use chrono::Utc;
use tracing::{debug, warn};

use crate::models::quote::Quote;
use crate::providers::traits::QuoteProvider;

/// Source label attached to prices resolved through the snapshot
/// endpoint rather than a historical series.
pub const SNAPSHOT_SOURCE: &str = "fast_info";

/// One candidate (lookback range, sampling interval) pair in the
/// fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTier {
    pub range: &'static str,
    pub interval: &'static str,
}

/// The default ladder, most to least granular. Intraday minute bars
/// answer for liquid symbols; the coarser tiers pick up instruments the
/// upstream has no fine-grained series for.
pub const DEFAULT_TIERS: [FetchTier; 3] = [
    FetchTier {
        range: "1d",
        interval: "1m",
    },
    FetchTier {
        range: "5d",
        interval: "1h",
    },
    FetchTier {
        range: "1mo",
        interval: "1d",
    },
];

/// Resolves a ticker to a quote by walking an ordered list of query
/// granularities against the upstream, then a terminal snapshot tier.
///
/// First success wins: the moment a tier yields a non-empty series, its
/// most recent observation is returned and no later tier is queried.
/// Individual tier failures — transient network errors, malformed
/// responses, empty series — are logged and absorbed; only total
/// exhaustion of every tier surfaces, and then as a no-data quote, never
/// as an error. Worst case is one upstream round-trip per tier, traded
/// for resilience against an upstream that silently returns nothing for
/// just-listed or thinly-traded symbols.
///
/// The tier list is fixed at construction and never mutated.
pub struct TieredFetcher {
    provider: Box<dyn QuoteProvider>,
    tiers: Vec<FetchTier>,
}

impl TieredFetcher {
    /// Fetcher over `provider` with the default tier ladder.
    pub fn new(provider: Box<dyn QuoteProvider>) -> Self {
        Self::with_tiers(provider, DEFAULT_TIERS.to_vec())
    }

    /// Fetcher with a custom ladder. `tiers` are tried in the given
    /// order; the snapshot tier is always appended implicitly.
    pub fn with_tiers(provider: Box<dyn QuoteProvider>, tiers: Vec<FetchTier>) -> Self {
        Self { provider, tiers }
    }

    #[must_use]
    pub fn tiers(&self) -> &[FetchTier] {
        &self.tiers
    }

    #[must_use]
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Resolve `ticker`, falling through the tier ladder. Infallible.
    pub async fn fetch(&self, ticker: &str) -> Quote {
        for tier in &self.tiers {
            match self
                .provider
                .fetch_history(ticker, tier.range, tier.interval)
                .await
            {
                Ok(series) => {
                    // Last observation is the most recent.
                    if let Some(point) = series.last() {
                        if Self::usable(point.close) {
                            debug!(
                                ticker,
                                interval = tier.interval,
                                price = point.close,
                                "resolved from historical tier"
                            );
                            return Quote::new(
                                ticker,
                                point.close,
                                tier.interval,
                                point.observed_at,
                            );
                        }
                        warn!(
                            ticker,
                            interval = tier.interval,
                            close = point.close,
                            "tier returned unusable price, trying next"
                        );
                    } else {
                        debug!(
                            ticker,
                            range = tier.range,
                            interval = tier.interval,
                            "tier returned empty series, trying next"
                        );
                    }
                }
                Err(e) => {
                    warn!(
                        ticker,
                        range = tier.range,
                        interval = tier.interval,
                        error = %e,
                        "tier failed, trying next"
                    );
                }
            }
        }

        // Every historical tier came back empty or failed; last resort is
        // the latest-known-price snapshot. It carries no observation
        // timestamp, so the current time stands in.
        match self.provider.fetch_snapshot(ticker).await {
            Ok(price) if Self::usable(price) => {
                debug!(ticker, price, "resolved from snapshot");
                Quote::new(ticker, price, SNAPSHOT_SOURCE, Utc::now())
            }
            Ok(price) => {
                warn!(ticker, price, "snapshot returned unusable price");
                Quote::no_data(ticker)
            }
            Err(e) => {
                warn!(ticker, error = %e, "snapshot failed, no data for ticker");
                Quote::no_data(ticker)
            }
        }
    }

    /// A price must be finite and positive to be served.
    fn usable(price: f64) -> bool {
        price.is_finite() && price > 0.0
    }
}

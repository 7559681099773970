use std::time::Instant;

use tracing::debug;

use crate::models::quote::{Quote, QuoteCache};
use crate::services::fetch_service::TieredFetcher;

/// Orchestrates cache lookup → tiered fetch → cache write-back.
///
/// The cache is owned by the caller and passed in mutably; the exclusive
/// borrow is what makes the read-check-then-write sequence atomic per
/// owner, matching the single-threaded request model. A no-data result is
/// cached like any other, so a symbol the upstream cannot resolve is
/// retried at most once per TTL window — the TTL doubles as the rate
/// limiter against a flaky upstream and against client polling.
pub struct QuoteService {
    fetcher: TieredFetcher,
}

impl QuoteService {
    pub fn new(fetcher: TieredFetcher) -> Self {
        Self { fetcher }
    }

    /// Resolve one ticker. Never fails; total upstream exhaustion comes
    /// back as a no-data quote.
    pub async fn get_price(&self, cache: &mut QuoteCache, ticker: &str) -> Quote {
        if let Some(cached) = cache.get(ticker, Instant::now()) {
            debug!(ticker, "serving quote from cache");
            return cached.clone();
        }

        let quote = self.fetcher.fetch(ticker).await;
        cache.put(quote.clone(), Instant::now());
        quote
    }

    /// Resolve a batch, one ticker at a time, in order. The response
    /// order matches `tickers`; observation timestamps across tickers are
    /// independent.
    pub async fn get_quotes(&self, cache: &mut QuoteCache, tickers: &[String]) -> Vec<Quote> {
        let mut quotes = Vec::with_capacity(tickers.len());
        for ticker in tickers {
            quotes.push(self.get_price(cache, ticker).await);
        }
        quotes
    }
}

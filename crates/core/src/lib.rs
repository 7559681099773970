pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use chrono::Utc;

use errors::CoreError;
use models::portfolio::PortfolioSet;
use models::quote::{Quote, QuoteCache};
use models::report::PortfolioReport;
use providers::traits::QuoteProvider;
use providers::yahoo_finance::YahooFinanceProvider;
use services::fetch_service::TieredFetcher;
use services::quote_service::QuoteService;
use services::valuation_service::ValuationService;
use storage::config_file::ConfigFile;

/// Main entry point for the Portfolio Watch core library.
///
/// Owns the portfolio configuration, the quote cache, and the services
/// that operate on them. The cache is constructed here and threaded
/// through the services explicitly — there is no ambient global state, so
/// two instances never share quotes and tests can inject a fake upstream.
#[must_use]
pub struct PortfolioWatch {
    portfolios: PortfolioSet,
    cache: QuoteCache,
    quote_service: QuoteService,
    valuation_service: ValuationService,
}

impl std::fmt::Debug for PortfolioWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioWatch")
            .field("portfolios", &self.portfolios.portfolios.len())
            .field("cached_quotes", &self.cache.entry_count())
            .field("cache_ttl", &self.cache.ttl())
            .finish()
    }
}

impl PortfolioWatch {
    /// Watch `portfolios` against the real Yahoo Finance upstream.
    pub fn new(portfolios: PortfolioSet) -> Result<Self, CoreError> {
        let provider = YahooFinanceProvider::new()?;
        Ok(Self::with_provider(portfolios, Box::new(provider)))
    }

    /// Watch `portfolios` against an injected upstream (testing seam).
    pub fn with_provider(portfolios: PortfolioSet, provider: Box<dyn QuoteProvider>) -> Self {
        Self::build(portfolios, provider, QuoteCache::new())
    }

    /// Same as `with_provider`, with a deployment-specific cache TTL.
    pub fn with_provider_and_ttl(
        portfolios: PortfolioSet,
        provider: Box<dyn QuoteProvider>,
        ttl: Duration,
    ) -> Self {
        Self::build(portfolios, provider, QuoteCache::with_ttl(ttl))
    }

    /// Watch the built-in demo portfolios.
    pub fn demo() -> Result<Self, CoreError> {
        Self::new(PortfolioSet::demo())
    }

    /// Load `portfolios.json` from `path` (demo fallback applies) and
    /// watch it against the real upstream.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        Self::new(ConfigFile::load_or_demo(path))
    }

    // ── Quotes ──────────────────────────────────────────────────────

    /// One quote per configured ticker, in configuration order. An empty
    /// configuration yields an empty Vec, not an error. Quotes are served
    /// from the cache within its TTL; unresolvable tickers come back as
    /// no-data quotes.
    pub async fn quotes(&mut self) -> Vec<Quote> {
        let tickers = self.portfolios.tickers();
        self.quote_service
            .get_quotes(&mut self.cache, &tickers)
            .await
    }

    /// Quotes for an explicit ticker list, bypassing the configuration.
    /// Response order matches `tickers`.
    pub async fn quotes_for(&mut self, tickers: &[String]) -> Vec<Quote> {
        self.quote_service
            .get_quotes(&mut self.cache, tickers)
            .await
    }

    // ── Reports ─────────────────────────────────────────────────────

    /// Value every configured portfolio. Each distinct ticker is fetched
    /// once up front (cache-backed), then reports are assembled in
    /// configuration order. Empty configuration yields an empty Vec.
    pub async fn portfolio_reports(&mut self) -> Vec<PortfolioReport> {
        let tickers = self.portfolios.tickers();
        let quotes = self
            .quote_service
            .get_quotes(&mut self.cache, &tickers)
            .await;

        let by_ticker: HashMap<String, Quote> = quotes
            .into_iter()
            .map(|q| (q.ticker.clone(), q))
            .collect();

        let as_of = Utc::now();
        self.portfolios
            .portfolios
            .iter()
            .map(|p| self.valuation_service.build_report(p, &by_ticker, as_of))
            .collect()
    }

    // ── Configuration ───────────────────────────────────────────────

    #[must_use]
    pub fn portfolios(&self) -> &PortfolioSet {
        &self.portfolios
    }

    /// The flattened, de-duplicated ticker list derived from the
    /// configuration.
    #[must_use]
    pub fn watched_tickers(&self) -> Vec<String> {
        self.portfolios.tickers()
    }

    /// Replace the watched portfolios. Cached quotes stay valid — they
    /// are keyed by ticker, not by portfolio.
    pub fn set_portfolios(&mut self, portfolios: PortfolioSet) {
        self.portfolios = portfolios;
    }

    // ── Cache Management ────────────────────────────────────────────

    /// Number of cached quotes, fresh or stale.
    #[must_use]
    pub fn cache_entry_count(&self) -> usize {
        self.cache.entry_count()
    }

    #[must_use]
    pub fn cache_ttl(&self) -> Duration {
        self.cache.ttl()
    }

    /// Drop all cached quotes; the next lookup refetches.
    pub fn cache_clear(&mut self) {
        self.cache.clear();
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(
        portfolios: PortfolioSet,
        provider: Box<dyn QuoteProvider>,
        cache: QuoteCache,
    ) -> Self {
        let fetcher = TieredFetcher::new(provider);
        let quote_service = QuoteService::new(fetcher);
        let valuation_service = ValuationService::new();

        Self {
            portfolios,
            cache,
            quote_service,
            valuation_service,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Provider Tests — YahooFinanceProvider, QuoteProvider trait compliance
// ═══════════════════════════════════════════════════════════════════

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use portfolio_watch_core::errors::CoreError;
use portfolio_watch_core::models::quote::SeriesPoint;
use portfolio_watch_core::providers::traits::QuoteProvider;
use portfolio_watch_core::providers::yahoo_finance::YahooFinanceProvider;
use portfolio_watch_core::services::fetch_service::TieredFetcher;

/// Minimal in-memory provider used for trait-object checks.
struct FixedProvider {
    price: f64,
}

#[async_trait]
impl QuoteProvider for FixedProvider {
    fn name(&self) -> &str {
        "Fixed"
    }

    async fn fetch_history(
        &self,
        _ticker: &str,
        _range: &str,
        _interval: &str,
    ) -> Result<Vec<SeriesPoint>, CoreError> {
        Ok(vec![SeriesPoint {
            observed_at: Utc.with_ymd_and_hms(2025, 6, 2, 14, 30, 0).unwrap(),
            close: self.price,
        }])
    }

    async fn fetch_snapshot(&self, _ticker: &str) -> Result<f64, CoreError> {
        Ok(self.price)
    }
}

// ═══════════════════════════════════════════════════════════════════
// YahooFinanceProvider
// ═══════════════════════════════════════════════════════════════════

mod yahoo_finance {
    use super::*;

    #[test]
    fn name() {
        let provider = YahooFinanceProvider::new().unwrap();
        assert_eq!(provider.name(), "Yahoo Finance");
    }

    #[test]
    fn constructs_without_network() {
        // Building the connector and HTTP client must not touch the wire.
        assert!(YahooFinanceProvider::new().is_ok());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Trait compliance
// ═══════════════════════════════════════════════════════════════════

mod trait_compliance {
    use super::*;

    /// Providers must be Send + Sync to sit behind the async trait object.
    #[test]
    fn providers_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}

        assert_send_sync::<YahooFinanceProvider>();
        assert_send_sync::<FixedProvider>();
    }

    #[test]
    fn providers_as_trait_objects() {
        let fetcher = TieredFetcher::new(Box::new(FixedProvider { price: 10.0 }));
        assert_eq!(fetcher.provider_name(), "Fixed");

        let yahoo = YahooFinanceProvider::new().unwrap();
        let fetcher = TieredFetcher::new(Box::new(yahoo));
        assert_eq!(fetcher.provider_name(), "Yahoo Finance");
    }

    #[tokio::test]
    async fn trait_object_dispatch_works() {
        let provider: Box<dyn QuoteProvider> = Box::new(FixedProvider { price: 12.5 });
        let series = provider.fetch_history("QQQ", "1d", "1m").await.unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].close, 12.5);

        let snap = provider.fetch_snapshot("QQQ").await.unwrap();
        assert_eq!(snap, 12.5);
    }
}

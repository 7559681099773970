use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::quote::SeriesPoint;

/// Trait abstraction over the upstream quote source.
///
/// The upstream is unreliable by contract: any call may fail transiently
/// (network, rate limit, invalid symbol) and a history query may
/// legitimately return an empty series (just-listed, thinly traded or
/// delisted instruments). Callers must treat both as non-fatal. Swapping
/// the data source, or injecting a scripted fake in tests, replaces only
/// this trait's implementation.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch a historical series for one (lookback range, sampling
    /// interval) pair, e.g. ("1d", "1m"). Observations are returned
    /// oldest-first with UTC timestamps. An empty Vec is a valid answer.
    async fn fetch_history(
        &self,
        ticker: &str,
        range: &str,
        interval: &str,
    ) -> Result<Vec<SeriesPoint>, CoreError>;

    /// Fetch the latest known price from the snapshot endpoint.
    /// Carries no historical timestamp.
    async fn fetch_snapshot(&self, ticker: &str) -> Result<f64, CoreError>;
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// How long a cached quote is served before it is refetched.
pub const DEFAULT_QUOTE_TTL: Duration = Duration::from_secs(10);

/// A single historical observation as returned by a provider,
/// already normalized to UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub observed_at: DateTime<Utc>,
    pub close: f64,
}

/// The resolved price of one ticker.
///
/// `price = None` is a confirmed "no data available" outcome, not an
/// error — the upstream had nothing for this symbol at any granularity.
/// No-data quotes are cacheable, which keeps a persistently failing
/// symbol from being retried on every lookup.
///
/// Absence is always modeled with `Option`, never with a sentinel float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Ticker symbol exactly as requested (case-sensitive).
    pub ticker: String,

    /// Last known price, if the upstream produced one.
    pub price: Option<f64>,

    /// Which tier produced the value: a sampling interval name
    /// ("1m", "1h", "1d") or "fast_info" for the snapshot endpoint.
    pub source: Option<String>,

    /// When the price was observed, UTC.
    pub observed_at: Option<DateTime<Utc>>,
}

impl Quote {
    pub fn new(
        ticker: impl Into<String>,
        price: f64,
        source: impl Into<String>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            price: Some(price),
            source: Some(source.into()),
            observed_at: Some(observed_at),
        }
    }

    /// A confirmed absence of pricing information for `ticker`.
    pub fn no_data(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            price: None,
            source: None,
            observed_at: None,
        }
    }

    #[must_use]
    pub fn has_price(&self) -> bool {
        self.price.is_some()
    }
}

/// A cache entry: the quote plus the monotonic instant it was stored.
#[derive(Debug, Clone)]
struct CachedQuote {
    quote: Quote,
    fetched_at: Instant,
}

/// In-memory quote cache with a fixed time-to-live.
///
/// At most one entry per ticker. Staleness is lazy: an entry older than
/// the TTL is treated as absent on lookup but is not removed — the next
/// `put` for that ticker overwrites it. There is no eviction sweep, so
/// memory grows with the number of distinct tickers ever queried; fine
/// for personal portfolio sizes.
///
/// The current time is supplied by the caller, so expiry is testable
/// against a fabricated clock.
#[derive(Debug, Clone)]
pub struct QuoteCache {
    ttl: Duration,
    entries: HashMap<String, CachedQuote>,
}

impl QuoteCache {
    /// Cache with the default 10-second TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_QUOTE_TTL)
    }

    /// Cache with a deployment-specific TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Return the cached quote for `ticker` if it is still fresh at `now`.
    ///
    /// A stale entry behaves exactly like a missing one; it stays in the
    /// map until the next `put` overwrites it.
    pub fn get(&self, ticker: &str, now: Instant) -> Option<&Quote> {
        let entry = self.entries.get(ticker)?;
        if now.duration_since(entry.fetched_at) < self.ttl {
            Some(&entry.quote)
        } else {
            None
        }
    }

    /// Store `quote`, stamped `fetched_at = now`, unconditionally
    /// overwriting any existing entry for the same ticker.
    pub fn put(&mut self, quote: Quote, now: Instant) {
        self.entries.insert(
            quote.ticker.clone(),
            CachedQuote {
                quote,
                fetched_at: now,
            },
        );
    }

    /// Number of entries held, fresh or stale.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for QuoteCache {
    fn default() -> Self {
        Self::new()
    }
}

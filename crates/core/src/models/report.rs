use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::portfolio::Holding;
use super::quote::Quote;

/// One valued position. Fields derived from the market price are `None`
/// when the price could not be resolved; such holdings are excluded from
/// the portfolio totals rather than failing the whole report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingReport {
    pub ticker: String,
    pub shares: f64,
    pub avg_cost: f64,

    /// Last resolved price per share, instrument's native currency.
    pub price: Option<f64>,

    /// shares × price
    pub market_value: Option<f64>,

    /// market_value − (shares × avg_cost)
    pub pl: Option<f64>,

    /// pl / cost × 100, only when the position cost is positive.
    pub pl_pct: Option<f64>,

    /// Which fetch tier the price came from ("1m", "1h", "1d", "fast_info").
    pub source: Option<String>,

    /// Observation timestamp of the price, UTC.
    pub observed_at: Option<DateTime<Utc>>,
}

impl HoldingReport {
    /// Value `holding` against `quote` (a no-data quote leaves all
    /// price-derived fields `None`).
    pub fn from_quote(holding: &Holding, quote: &Quote) -> Self {
        let cost = holding.shares * holding.avg_cost;
        let market_value = quote.price.map(|p| holding.shares * p);
        let pl = market_value.map(|v| v - cost);
        let pl_pct = pl.and_then(|pl| {
            if cost > 0.0 {
                Some(pl / cost * 100.0)
            } else {
                None
            }
        });

        Self {
            ticker: holding.ticker.clone(),
            shares: holding.shares,
            avg_cost: holding.avg_cost,
            price: quote.price,
            market_value,
            pl,
            pl_pct,
            source: quote.source.clone(),
            observed_at: quote.observed_at,
        }
    }
}

/// Portfolio-level aggregates, computed only from holdings whose price
/// resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    pub cost: f64,
    pub value: f64,
    pub pl: f64,
    pub pl_pct: Option<f64>,
}

/// A fully valued portfolio, ready for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub name: String,
    pub currency: String,
    pub holdings: Vec<HoldingReport>,
    pub totals: PortfolioTotals,

    /// When this report was assembled, UTC.
    pub last_updated: DateTime<Utc>,
}

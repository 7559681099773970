use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::portfolio::Portfolio;
use crate::models::quote::Quote;
use crate::models::report::{HoldingReport, PortfolioReport, PortfolioTotals};

/// Computes per-holding and per-portfolio cost, market value and P/L.
///
/// Pure arithmetic — no I/O, no API calls. Holdings whose price did not
/// resolve keep `None` in every derived field and are left out of the
/// totals, so one dead symbol degrades the report instead of failing it.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Value one portfolio against `quotes` (keyed by ticker).
    ///
    /// Tickers missing from `quotes` are treated the same as no-data
    /// quotes.
    pub fn build_report(
        &self,
        portfolio: &Portfolio,
        quotes: &HashMap<String, Quote>,
        as_of: DateTime<Utc>,
    ) -> PortfolioReport {
        let mut holdings = Vec::with_capacity(portfolio.holdings.len());
        let mut total_cost = 0.0;
        let mut total_value = 0.0;

        for holding in &portfolio.holdings {
            let missing = Quote::no_data(&holding.ticker);
            let quote = quotes.get(&holding.ticker).unwrap_or(&missing);
            let report = HoldingReport::from_quote(holding, quote);

            // Only priced holdings contribute to the totals.
            if let Some(value) = report.market_value {
                total_cost += holding.shares * holding.avg_cost;
                total_value += value;
            }

            holdings.push(report);
        }

        let totals = Self::totals(total_cost, total_value);

        PortfolioReport {
            name: portfolio.name.clone(),
            currency: portfolio.currency.clone(),
            holdings,
            totals,
            last_updated: as_of,
        }
    }

    fn totals(cost: f64, value: f64) -> PortfolioTotals {
        // Nothing priced at all: report a flat zero P/L with no
        // percentage rather than a spurious loss.
        let (pl, pl_pct) = if cost == 0.0 && value == 0.0 {
            (0.0, None)
        } else {
            let pl = value - cost;
            let pl_pct = if cost > 0.0 {
                Some(pl / cost * 100.0)
            } else {
                None
            };
            (pl, pl_pct)
        };

        PortfolioTotals {
            cost,
            value,
            pl,
            pl_pct,
        }
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}

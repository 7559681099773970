use serde::{Deserialize, Serialize};

/// One position inside a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol as the upstream knows it (e.g., "QQQ", "HHIS.TO").
    /// Case-sensitive; suffixed symbols identify non-US listings.
    pub ticker: String,

    /// Number of shares held. Fractional shares are allowed.
    #[serde(default)]
    pub shares: f64,

    /// Average acquisition cost per share, in the portfolio currency.
    #[serde(default)]
    pub avg_cost: f64,
}

/// A named group of holdings valued in a single currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default = "default_name")]
    pub name: String,

    /// Display currency code (e.g., "USD", "CAD"). Prices are reported in
    /// each instrument's native currency; no conversion is performed.
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub holdings: Vec<Holding>,
}

fn default_name() -> String {
    "Portfolio".to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}

/// The full user configuration: `{ "portfolios": [ ... ] }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioSet {
    #[serde(default)]
    pub portfolios: Vec<Portfolio>,
}

impl PortfolioSet {
    /// Built-in demo data, used when no configuration file is present.
    pub fn demo() -> Self {
        Self {
            portfolios: vec![
                Portfolio {
                    name: "Long-Term (USD)".into(),
                    currency: "USD".into(),
                    holdings: vec![
                        Holding {
                            ticker: "QQQ".into(),
                            shares: 10.0,
                            avg_cost: 420.0,
                        },
                        Holding {
                            ticker: "NVDA".into(),
                            shares: 2.0,
                            avg_cost: 950.0,
                        },
                    ],
                },
                Portfolio {
                    name: "TFSA (CAD)".into(),
                    currency: "CAD".into(),
                    holdings: vec![Holding {
                        ticker: "HHIS.TO".into(),
                        shares: 100.0,
                        avg_cost: 22.10,
                    }],
                },
            ],
        }
    }

    /// Every distinct ticker across all portfolios, first-occurrence order
    /// preserved, blank tickers skipped. This is the list handed to the
    /// quote layer.
    #[must_use]
    pub fn tickers(&self) -> Vec<String> {
        let mut tickers: Vec<String> = Vec::new();
        for portfolio in &self.portfolios {
            for holding in &portfolio.holdings {
                let t = holding.ticker.trim();
                if !t.is_empty() && !tickers.iter().any(|seen| seen == t) {
                    tickers.push(t.to_string());
                }
            }
        }
        tickers
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.portfolios.is_empty()
    }
}

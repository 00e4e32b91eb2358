//! Portfolio holdings supplied for reconciliation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A position in the caller's current model portfolio.
///
/// The reconciler only needs the ticker; weight and category are carried for
/// weighted coverage and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol.
    pub ticker: String,

    /// Portfolio weight (any consistent unit, e.g. percent).
    #[serde(default)]
    pub weight: Option<Decimal>,

    /// Category as recorded in the portfolio file.
    #[serde(default)]
    pub category: Option<String>,
}

impl Holding {
    /// Creates a holding with only a ticker.
    #[must_use]
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            weight: None,
            category: None,
        }
    }

    /// Sets the weight.
    #[must_use]
    pub fn with_weight(mut self, weight: Decimal) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Builds the distinct, trimmed ticker set of a holdings list.
///
/// Blank tickers are dropped.
#[must_use]
pub fn ticker_set(holdings: &[Holding]) -> BTreeSet<String> {
    holdings
        .iter()
        .map(|h| h.ticker.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

//! Portfolio reconciliation against the scored universe.
//!
//! Holdings are always passed explicitly; nothing about a portfolio is cached
//! between calls.

use crate::types::{ticker_set, Holding, ScoredFund, Tier, TierScheme};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Number of funds in one tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierCount {
    /// The tier.
    pub tier: Tier,
    /// Funds in the tier.
    pub count: usize,
    /// Share of the counted funds in the tier (0-100%).
    pub share_pct: f64,
}

/// Counts funds per tier, ordered best first.
///
/// Only tiers that occur are listed. Use [`tier_counts_for_scheme`] to list
/// every tier of a scheme.
#[must_use]
pub fn tier_counts<'a>(funds: impl IntoIterator<Item = &'a ScoredFund>) -> Vec<TierCount> {
    let mut counts: BTreeMap<Tier, usize> = BTreeMap::new();
    for fund in funds {
        *counts.entry(fund.tier.clone()).or_insert(0) += 1;
    }
    let total: usize = counts.values().sum();
    counts
        .into_iter()
        .map(|(tier, count)| TierCount {
            tier,
            count,
            share_pct: share_pct(count, total),
        })
        .collect()
}

/// Counts funds per tier for every tier of `scheme`, zeros included.
#[must_use]
pub fn tier_counts_for_scheme<'a>(
    funds: impl IntoIterator<Item = &'a ScoredFund>,
    scheme: &TierScheme,
) -> Vec<TierCount> {
    let mut counts = vec![0usize; scheme.len()];
    for fund in funds {
        if let Some(slot) = counts.get_mut(fund.tier.ordinal) {
            *slot += 1;
        }
    }
    let total: usize = counts.iter().sum();
    scheme
        .tiers()
        .into_iter()
        .zip(counts)
        .map(|(tier, count)| TierCount {
            tier,
            count,
            share_pct: share_pct(count, total),
        })
        .collect()
}

fn share_pct(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Result of matching holdings against the scored universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationResult {
    /// Held funds found in the universe, best percentile first.
    pub matched: Vec<ScoredFund>,

    /// Held tickers not found in the universe.
    pub unmatched_tickers: BTreeSet<String>,

    /// `|holdings ∩ universe| / |holdings|`; 1.0 for an empty holdings set.
    pub coverage_ratio: f64,

    /// Tier counts over the matched funds, best tier first.
    pub tier_counts: Vec<TierCount>,

    /// Matched weight / total weight, when holdings carry weights.
    pub weighted_coverage: Option<Decimal>,
}

impl ReconciliationResult {
    /// Number of matched holdings in a named tier.
    #[must_use]
    pub fn count_for(&self, tier_name: &str) -> usize {
        self.tier_counts
            .iter()
            .find(|c| c.tier.name == tier_name)
            .map_or(0, |c| c.count)
    }

    /// Matched holdings outside the best tier, worst first.
    #[must_use]
    pub fn needs_review(&self) -> Vec<&ScoredFund> {
        let mut out: Vec<&ScoredFund> =
            self.matched.iter().filter(|f| !f.tier.is_best()).collect();
        out.reverse();
        out
    }
}

/// Matches a set of held tickers against the scored universe.
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use esgscreen_core::{reconcile, score_universe, FundRecord, TierScheme};
///
/// let universe = score_universe(
///     &[FundRecord::new("A", Some("X"), 0.9), FundRecord::new("B", Some("X"), 0.1)],
///     &TierScheme::elite_review_replace(),
/// );
/// let holdings: BTreeSet<String> = ["B", "Z"].iter().map(|s| s.to_string()).collect();
///
/// let result = reconcile(&holdings, &universe.funds);
/// assert_eq!(result.matched.len(), 1);
/// assert_eq!(result.coverage_ratio, 0.5);
/// assert!(result.unmatched_tickers.contains("Z"));
/// ```
#[must_use]
pub fn reconcile(holdings: &BTreeSet<String>, universe: &[ScoredFund]) -> ReconciliationResult {
    if holdings.is_empty() {
        return ReconciliationResult {
            matched: Vec::new(),
            unmatched_tickers: BTreeSet::new(),
            coverage_ratio: 1.0,
            tier_counts: Vec::new(),
            weighted_coverage: None,
        };
    }

    let mut matched: Vec<ScoredFund> = universe
        .iter()
        .filter(|f| holdings.contains(f.symbol()))
        .cloned()
        .collect();
    matched.sort_by(|a, b| {
        a.category_percentile
            .total_cmp(&b.category_percentile)
            .then_with(|| a.symbol().cmp(b.symbol()))
    });

    let universe_symbols: BTreeSet<&str> = universe.iter().map(ScoredFund::symbol).collect();
    let unmatched_tickers: BTreeSet<String> = holdings
        .iter()
        .filter(|t| !universe_symbols.contains(t.as_str()))
        .cloned()
        .collect();

    let found = holdings.len() - unmatched_tickers.len();
    let coverage_ratio = found as f64 / holdings.len() as f64;
    let tier_counts = tier_counts(&matched);

    debug!(
        holdings = holdings.len(),
        matched = matched.len(),
        unmatched = unmatched_tickers.len(),
        "reconciled holdings"
    );

    ReconciliationResult {
        matched,
        unmatched_tickers,
        coverage_ratio,
        tier_counts,
        weighted_coverage: None,
    }
}

/// Reconciles a holdings list, adding weighted coverage when weights exist.
///
/// Tickers are trimmed and blank tickers dropped before matching.
#[must_use]
pub fn reconcile_holdings(holdings: &[Holding], universe: &[ScoredFund]) -> ReconciliationResult {
    let tickers = ticker_set(holdings);
    let mut result = reconcile(&tickers, universe);

    let universe_symbols: BTreeSet<&str> = universe.iter().map(ScoredFund::symbol).collect();
    let (matched_weight, total_weight) = holdings
        .iter()
        .filter_map(|h| h.weight.map(|w| (h.ticker.trim(), w)))
        .fold((Decimal::ZERO, Decimal::ZERO), |(m, t), (ticker, w)| {
            if universe_symbols.contains(ticker) {
                (m + w, t + w)
            } else {
                (m, t + w)
            }
        });

    if !total_weight.is_zero() {
        result.weighted_coverage = Some(matched_weight / total_weight);
    }
    result
}

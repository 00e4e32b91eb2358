//! Period-over-period comparison of scored universes.

use super::{AlertLevel, DriftBands};
use crate::types::{ScoredFund, Tier};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Percentile change of one fund between two scoring runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftRecord {
    /// Ticker symbol.
    pub symbol: String,

    /// Fund name from the current run.
    pub name: String,

    /// Percentile in the previous run.
    pub percentile_previous: f64,

    /// Percentile in the current run.
    pub percentile_current: f64,

    /// `percentile_current - percentile_previous`.
    ///
    /// Lower percentiles are better, so a positive delta is a deterioration.
    pub delta: f64,

    /// Alert level for the delta.
    pub alert: AlertLevel,

    /// Tier in the previous run.
    pub tier_previous: Tier,

    /// Tier in the current run.
    pub tier_current: Tier,
}

impl DriftRecord {
    /// Returns true if the fund got worse.
    #[must_use]
    pub fn is_deterioration(&self) -> bool {
        self.delta > 0.0
    }

    /// Returns true if the fund moved to a different tier.
    #[must_use]
    pub fn changed_tier(&self) -> bool {
        self.tier_previous.ordinal != self.tier_current.ordinal
    }
}

/// Number of drift records at one alert level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCount {
    /// The alert level.
    pub alert: AlertLevel,
    /// Records at that level.
    pub count: usize,
}

/// Result of comparing two scored universes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    /// Drift records ordered by delta descending (worst first), then symbol.
    pub records: Vec<DriftRecord>,

    /// Symbols scored only in the current run, sorted.
    pub current_only: Vec<String>,

    /// Symbols scored only in the previous run, sorted.
    pub previous_only: Vec<String>,

    /// Repeated symbols ignored on either side (first occurrence wins).
    pub duplicates_ignored: usize,
}

impl DriftReport {
    /// Number of symbols excluded because they are absent from the previous run.
    #[must_use]
    pub fn current_only_count(&self) -> usize {
        self.current_only.len()
    }

    /// Number of symbols excluded because they are absent from the current run.
    #[must_use]
    pub fn previous_only_count(&self) -> usize {
        self.previous_only.len()
    }

    /// Records at or above `min_severity`, worst first.
    #[must_use]
    pub fn flagged(&self, min_severity: usize) -> Vec<&DriftRecord> {
        self.records
            .iter()
            .filter(|r| r.alert.severity >= min_severity)
            .collect()
    }

    /// Count of records at every level of `bands`, baseline first.
    #[must_use]
    pub fn alert_counts(&self, bands: &DriftBands) -> Vec<AlertCount> {
        bands
            .levels()
            .into_iter()
            .map(|alert| {
                let count = self
                    .records
                    .iter()
                    .filter(|r| r.alert.severity == alert.severity)
                    .count();
                AlertCount { alert, count }
            })
            .collect()
    }
}

/// Compares current and previous scored universes.
///
/// Funds are inner-joined on symbol. Symbols present on only one side are not
/// compared but are listed in the report. Alert levels come from `bands`.
///
/// # Example
///
/// ```
/// use esgscreen_core::{compare, score_universe, DriftBands, FundRecord, TierScheme};
///
/// let scheme = TierScheme::elite_review_replace();
/// let previous = score_universe(
///     &[FundRecord::new("A", Some("X"), 0.9), FundRecord::new("B", Some("X"), 0.1)],
///     &scheme,
/// );
/// let current = score_universe(
///     &[FundRecord::new("A", Some("X"), 0.1), FundRecord::new("B", Some("X"), 0.9)],
///     &scheme,
/// );
///
/// let report = compare(&current.funds, &previous.funds, &DriftBands::standard());
/// assert_eq!(report.records[0].symbol, "A");
/// assert_eq!(report.records[0].delta, 50.0);
/// assert_eq!(report.records[0].alert.label, "severe");
/// ```
#[must_use]
pub fn compare(
    current: &[ScoredFund],
    previous: &[ScoredFund],
    bands: &DriftBands,
) -> DriftReport {
    let mut duplicates_ignored = 0;
    let current_by_symbol = index_by_symbol(current, &mut duplicates_ignored);
    let previous_by_symbol = index_by_symbol(previous, &mut duplicates_ignored);

    let mut records = Vec::new();
    let mut current_only = Vec::new();
    for (symbol, now) in &current_by_symbol {
        match previous_by_symbol.get(symbol) {
            Some(before) => {
                let delta = now.category_percentile - before.category_percentile;
                records.push(DriftRecord {
                    symbol: (*symbol).to_string(),
                    name: now.name().to_string(),
                    percentile_previous: before.category_percentile,
                    percentile_current: now.category_percentile,
                    delta,
                    alert: bands.level(delta),
                    tier_previous: before.tier.clone(),
                    tier_current: now.tier.clone(),
                });
            }
            None => current_only.push((*symbol).to_string()),
        }
    }

    let previous_only: Vec<String> = previous_by_symbol
        .keys()
        .filter(|s| !current_by_symbol.contains_key(*s))
        .map(|s| (*s).to_string())
        .collect();

    records.sort_by(|a, b| {
        b.delta
            .total_cmp(&a.delta)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    if !current_only.is_empty() || !previous_only.is_empty() {
        warn!(
            current_only = current_only.len(),
            previous_only = previous_only.len(),
            "symbols excluded from drift comparison"
        );
    }
    debug!(compared = records.len(), "drift comparison complete");

    DriftReport {
        records,
        current_only,
        previous_only,
        duplicates_ignored,
    }
}

fn index_by_symbol<'a>(
    funds: &'a [ScoredFund],
    duplicates: &mut usize,
) -> BTreeMap<&'a str, &'a ScoredFund> {
    let mut seen = BTreeSet::new();
    let mut index = BTreeMap::new();
    for fund in funds {
        let symbol = fund.symbol().trim();
        if seen.insert(symbol) {
            index.insert(symbol, fund);
        } else {
            warn!(symbol, "duplicate symbol ignored in drift comparison");
            *duplicates += 1;
        }
    }
    index
}

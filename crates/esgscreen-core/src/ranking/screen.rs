//! Ranking plus tier assignment: the engine's output table.

use super::rank_within_category;
use crate::types::{FundRecord, ScoredFund, TierScheme, UnscoredFund};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// The tagged, sorted result table of a screening run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    /// Scored funds, ordered by category, then percentile, then symbol.
    pub funds: Vec<ScoredFund>,

    /// Records left out of ranking, with reasons.
    pub unscored: Vec<UnscoredFund>,
}

impl ScreeningOutcome {
    /// Looks up a scored fund by symbol.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&ScoredFund> {
        self.funds.iter().find(|f| f.symbol() == symbol)
    }

    /// Symbol → percentile mapping.
    #[must_use]
    pub fn percentiles(&self) -> BTreeMap<String, f64> {
        self.funds
            .iter()
            .map(|f| (f.record.symbol.clone(), f.category_percentile))
            .collect()
    }

    /// Funds of one category, best first. `None` selects the funds without a category.
    #[must_use]
    pub fn in_category(&self, category: Option<&str>) -> Vec<&ScoredFund> {
        self.funds
            .iter()
            .filter(|f| f.category() == category)
            .collect()
    }

    /// Number of records left out of ranking.
    #[must_use]
    pub fn unscored_count(&self) -> usize {
        self.unscored.len()
    }
}

/// Ranks a universe and assigns each fund its tier.
///
/// # Example
///
/// ```
/// use esgscreen_core::{score_universe, FundRecord, TierScheme};
///
/// let scheme = TierScheme::elite_review_replace();
/// let outcome = score_universe(
///     &[
///         FundRecord::new("A", Some("X"), 0.9),
///         FundRecord::new("B", Some("X"), 0.7),
///         FundRecord::new("C", Some("X"), 0.5),
///         FundRecord::new("D", Some("X"), 0.1),
///     ],
///     &scheme,
/// );
///
/// assert_eq!(outcome.get("A").unwrap().tier.name, "Elite");
/// assert_eq!(outcome.get("B").unwrap().tier.name, "Review");
/// assert_eq!(outcome.get("D").unwrap().tier.name, "Replace");
/// ```
#[must_use]
pub fn score_universe(funds: &[FundRecord], scheme: &TierScheme) -> ScreeningOutcome {
    let ranked = rank_within_category(funds);

    let scored: Vec<ScoredFund> = ranked
        .funds
        .into_iter()
        .map(|fund| {
            let tier = scheme.classify(fund.category_percentile);
            ScoredFund::from_ranked(fund, tier)
        })
        .collect();

    info!(
        scored = scored.len(),
        unscored = ranked.unscored.len(),
        tiers = scheme.len(),
        "screened universe"
    );

    ScreeningOutcome {
        funds: scored,
        unscored: ranked.unscored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TierBand;
    use approx::assert_relative_eq;

    #[test]
    fn test_boundaries_are_inclusive() {
        let scheme = TierScheme::elite_review_replace();
        let outcome = score_universe(
            &[
                FundRecord::new("A", Some("X"), 4.0),
                FundRecord::new("B", Some("X"), 3.0),
                FundRecord::new("C", Some("X"), 2.0),
                FundRecord::new("D", Some("X"), 1.0),
            ],
            &scheme,
        );

        let a = outcome.get("A").unwrap();
        assert_relative_eq!(a.category_percentile, 25.0);
        assert_eq!(a.tier.name, "Elite");

        let b = outcome.get("B").unwrap();
        assert_relative_eq!(b.category_percentile, 50.0);
        assert_eq!(b.tier.name, "Review");

        let d = outcome.get("D").unwrap();
        assert_relative_eq!(d.category_percentile, 100.0);
        assert_eq!(d.tier.name, "Replace");
    }

    #[test]
    fn test_singleton_is_worst_tier() {
        let scheme = TierScheme::elite_review_replace();
        let outcome = score_universe(&[FundRecord::new("D", Some("Y"), 0.4)], &scheme);
        let d = outcome.get("D").unwrap();
        assert_relative_eq!(d.category_percentile, 100.0);
        assert_eq!(d.tier.name, "Replace");
    }

    #[test]
    fn test_custom_scheme() {
        let scheme = TierScheme::new(vec![
            TierBand::new("Leadership", 30.0),
            TierBand::new("Core", 60.0),
            TierBand::new("Evaluation", 100.0),
        ])
        .unwrap();
        let outcome = score_universe(
            &[
                FundRecord::new("A", Some("X"), 0.9),
                FundRecord::new("B", Some("X"), 0.6),
                FundRecord::new("C", Some("X"), 0.3),
            ],
            &scheme,
        );
        assert_eq!(outcome.get("A").unwrap().tier.name, "Core");
        assert_eq!(outcome.get("C").unwrap().tier.name, "Evaluation");
    }

    #[test]
    fn test_in_category_and_unscored() {
        let scheme = TierScheme::elite_review_replace();
        let outcome = score_universe(
            &[
                FundRecord::new("A", Some("X"), 0.9),
                FundRecord::new("B", Some("Y"), 0.6),
                FundRecord::without_score("C", Some("X")),
            ],
            &scheme,
        );
        assert_eq!(outcome.in_category(Some("X")).len(), 1);
        assert_eq!(outcome.in_category(Some("Y")).len(), 1);
        assert!(outcome.in_category(None).is_empty());
        assert_eq!(outcome.unscored_count(), 1);
        assert!(outcome.get("C").is_none());
    }
}

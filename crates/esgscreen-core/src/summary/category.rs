//! Per-category tier summaries.

use crate::ranking::compare_categories;
use crate::reconcile::{tier_counts_for_scheme, TierCount};
use crate::types::{ScoredFund, TierScheme};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Distinct categories present in a scored universe, sorted.
///
/// Funds without a category are not listed.
#[must_use]
pub fn categories(funds: &[ScoredFund]) -> Vec<String> {
    funds
        .iter()
        .filter_map(ScoredFund::category)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Tier breakdown and leaders of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// The category (`None` for funds without one).
    pub category: Option<String>,

    /// Number of scored funds in the category.
    pub total: usize,

    /// Count and share of every tier of the scheme, best first.
    pub tiers: Vec<TierCount>,

    /// Best funds by percentile.
    pub top: Vec<ScoredFund>,
}

impl CategorySummary {
    /// Number of funds in a named tier.
    #[must_use]
    pub fn count_for(&self, tier_name: &str) -> usize {
        self.tiers
            .iter()
            .find(|c| c.tier.name == tier_name)
            .map_or(0, |c| c.count)
    }

    /// Share of funds in a named tier (0-100%).
    #[must_use]
    pub fn share_for(&self, tier_name: &str) -> f64 {
        self.tiers
            .iter()
            .find(|c| c.tier.name == tier_name)
            .map_or(0.0, |c| c.share_pct)
    }

    /// Display label of the category.
    #[must_use]
    pub fn label(&self) -> &str {
        self.category.as_deref().unwrap_or("Uncategorized")
    }
}

/// Summarizes one category: tier counts for the whole scheme and the top funds.
#[must_use]
pub fn summarize_category(
    funds: &[ScoredFund],
    category: Option<&str>,
    scheme: &TierScheme,
    top_n: usize,
) -> CategorySummary {
    let mut members: Vec<&ScoredFund> = funds
        .iter()
        .filter(|f| compare_categories(f.category(), category).is_eq())
        .collect();
    members.sort_by(|a, b| {
        a.category_percentile
            .total_cmp(&b.category_percentile)
            .then_with(|| a.symbol().cmp(b.symbol()))
    });

    CategorySummary {
        category: category.map(str::to_string),
        total: members.len(),
        tiers: tier_counts_for_scheme(members.iter().copied(), scheme),
        top: members.iter().take(top_n).map(|f| (*f).clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::score_universe;
    use crate::types::FundRecord;
    use approx::assert_relative_eq;

    fn funds() -> Vec<ScoredFund> {
        let mut records: Vec<FundRecord> = (0..8)
            .map(|i| FundRecord::new(format!("LB{i}"), Some("Large Blend"), f64::from(i)))
            .collect();
        records.push(FundRecord::new("INF", Some("Infrastructure"), 0.5));
        records.push(FundRecord::new("ORPH", None, 0.5));
        score_universe(&records, &TierScheme::elite_review_replace()).funds
    }

    #[test]
    fn test_categories_sorted_without_none() {
        assert_eq!(
            categories(&funds()),
            vec!["Infrastructure".to_string(), "Large Blend".to_string()]
        );
    }

    #[test]
    fn test_summary_counts() {
        let scheme = TierScheme::elite_review_replace();
        let summary = summarize_category(&funds(), Some("Large Blend"), &scheme, 3);
        assert_eq!(summary.total, 8);
        assert_eq!(summary.count_for("Elite"), 2);
        assert_eq!(summary.count_for("Review"), 2);
        assert_eq!(summary.count_for("Replace"), 4);
        assert_relative_eq!(summary.share_for("Elite"), 25.0);

        let top: Vec<&str> = summary.top.iter().map(ScoredFund::symbol).collect();
        assert_eq!(top, vec!["LB7", "LB6", "LB5"]);
    }

    #[test]
    fn test_summary_uncategorized_and_unknown() {
        let scheme = TierScheme::elite_review_replace();
        let summary = summarize_category(&funds(), None, &scheme, 10);
        assert_eq!(summary.total, 1);
        assert_eq!(summary.label(), "Uncategorized");

        let empty = summarize_category(&funds(), Some("Nope"), &scheme, 10);
        assert_eq!(empty.total, 0);
        assert_eq!(empty.tiers.len(), 3);
        assert!(empty.tiers.iter().all(|t| t.count == 0 && t.share_pct == 0.0));
    }
}

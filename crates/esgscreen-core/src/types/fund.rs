//! Fund records as they enter and leave the engine.

use super::Tier;
use crate::error::{InputIssue, ScreenError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A fund in the screening universe, before ranking.
///
/// The composite score is produced by an upstream scorer. `None` means the
/// score is missing; `Some(f64::NAN)` is the caller's explicit "unscored" flag.
///
/// # Examples
///
/// ```
/// use esgscreen_core::FundRecord;
///
/// let fund = FundRecord::new("ESGV", Some("Large Blend"), 0.82)
///     .with_name("Vanguard ESG U.S. Stock ETF")
///     .with_metric("MSCI ESG Score", 7.4);
///
/// assert_eq!(fund.category_key(), Some("Large Blend"));
/// assert_eq!(fund.metrics.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundRecord {
    /// Ticker symbol, unique within a scoring run.
    pub symbol: String,

    /// Fund name.
    #[serde(default)]
    pub name: String,

    /// Peer category. `None` (or blank) forms its own partition.
    pub category: Option<String>,

    /// Weighted ESG composite score (higher is better).
    pub composite_score: Option<f64>,

    /// Raw metric values consumed by the upstream scorer.
    #[serde(default)]
    pub metrics: BTreeMap<String, f64>,
}

impl FundRecord {
    /// Creates a scored record.
    #[must_use]
    pub fn new(symbol: impl Into<String>, category: Option<&str>, composite_score: f64) -> Self {
        Self {
            symbol: symbol.into(),
            name: String::new(),
            category: category.map(str::to_string),
            composite_score: Some(composite_score),
            metrics: BTreeMap::new(),
        }
    }

    /// Creates a record with no composite score.
    #[must_use]
    pub fn without_score(symbol: impl Into<String>, category: Option<&str>) -> Self {
        Self {
            composite_score: None,
            ..Self::new(symbol, category, 0.0)
        }
    }

    /// Creates a record explicitly flagged as unscored.
    #[must_use]
    pub fn excluded(symbol: impl Into<String>, category: Option<&str>) -> Self {
        Self::new(symbol, category, f64::NAN)
    }

    /// Sets the fund name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a metric value.
    #[must_use]
    pub fn with_metric(mut self, metric: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(metric.into(), value);
        self
    }

    /// Returns the partition key: the trimmed category, or `None` when blank.
    #[must_use]
    pub fn category_key(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Checks the score, returning the usable value or the reason it is unusable.
    pub(crate) fn usable_score(&self) -> Result<f64, InputIssue> {
        if self.symbol.trim().is_empty() {
            return Err(InputIssue::MissingSymbol);
        }
        match self.composite_score {
            None => Err(InputIssue::MissingScore),
            Some(s) if s.is_nan() => Err(InputIssue::Excluded),
            Some(s) if s.is_infinite() => Err(InputIssue::NonFiniteScore),
            Some(s) => Ok(s),
        }
    }
}

/// A fund with its within-category rank, before tier assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFund {
    /// The input record.
    #[serde(flatten)]
    pub record: FundRecord,

    /// Percentile within the category, in (0, 100]; lower is better.
    pub category_percentile: f64,

    /// Descending rank within the category, ties averaged (1 = best).
    pub category_rank: f64,

    /// Number of ranked funds in the category.
    pub category_size: usize,
}

/// A fund with its percentile and qualification tier.
///
/// This is the row type of the engine's output table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredFund {
    /// The input record.
    #[serde(flatten)]
    pub record: FundRecord,

    /// Percentile within the category, in (0, 100]; lower is better.
    pub category_percentile: f64,

    /// Descending rank within the category, ties averaged (1 = best).
    pub category_rank: f64,

    /// Number of ranked funds in the category.
    pub category_size: usize,

    /// Qualification tier derived from the percentile.
    pub tier: Tier,
}

impl ScoredFund {
    /// Attaches a tier to a ranked fund.
    #[must_use]
    pub fn from_ranked(ranked: RankedFund, tier: Tier) -> Self {
        Self {
            record: ranked.record,
            category_percentile: ranked.category_percentile,
            category_rank: ranked.category_rank,
            category_size: ranked.category_size,
            tier,
        }
    }

    /// Ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.record.symbol
    }

    /// Fund name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Partition key of the fund's category.
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.record.category_key()
    }

    /// Composite score. Always finite for a scored fund.
    #[must_use]
    pub fn composite_score(&self) -> f64 {
        self.record.composite_score.unwrap_or(f64::NAN)
    }
}

/// A record that was left out of ranking, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnscoredFund {
    /// Ticker symbol as supplied (may be blank).
    pub symbol: String,

    /// Fund name.
    pub name: String,

    /// Category as supplied.
    pub category: Option<String>,

    /// Why the record was not ranked.
    pub issue: InputIssue,
}

impl UnscoredFund {
    /// Creates an unscored entry from the offending record.
    #[must_use]
    pub fn new(record: &FundRecord, issue: InputIssue) -> Self {
        Self {
            symbol: record.symbol.clone(),
            name: record.name.clone(),
            category: record.category.clone(),
            issue,
        }
    }

    /// Converts the entry to the equivalent error value.
    #[must_use]
    pub fn to_error(&self) -> ScreenError {
        ScreenError::invalid_input(self.symbol.clone(), self.issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_key_normalizes_blank() {
        let fund = FundRecord::new("A", Some("  "), 1.0);
        assert_eq!(fund.category_key(), None);

        let fund = FundRecord::new("A", Some(" Large Blend "), 1.0);
        assert_eq!(fund.category_key(), Some("Large Blend"));

        let fund = FundRecord::new("A", None, 1.0);
        assert_eq!(fund.category_key(), None);
    }

    #[test]
    fn test_usable_score() {
        assert_eq!(FundRecord::new("A", None, 0.5).usable_score(), Ok(0.5));
        assert_eq!(
            FundRecord::without_score("A", None).usable_score(),
            Err(InputIssue::MissingScore)
        );
        assert_eq!(
            FundRecord::excluded("A", None).usable_score(),
            Err(InputIssue::Excluded)
        );
        assert_eq!(
            FundRecord::new("A", None, f64::INFINITY).usable_score(),
            Err(InputIssue::NonFiniteScore)
        );
        assert_eq!(
            FundRecord::new(" ", None, 0.5).usable_score(),
            Err(InputIssue::MissingSymbol)
        );
    }

    #[test]
    fn test_unscored_to_error() {
        let record = FundRecord::without_score("ESGU", Some("Large Blend"));
        let unscored = UnscoredFund::new(&record, InputIssue::MissingScore);
        assert_eq!(
            unscored.to_error(),
            ScreenError::invalid_input("ESGU", InputIssue::MissingScore)
        );
    }
}

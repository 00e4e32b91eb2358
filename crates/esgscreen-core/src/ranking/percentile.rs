//! Within-category percentile ranking.

use crate::types::{FundRecord, RankedFund, UnscoredFund};
use crate::error::InputIssue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Result of ranking a universe.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedUniverse {
    /// Ranked funds, ordered by category, then percentile, then symbol.
    pub funds: Vec<RankedFund>,

    /// Records left out of ranking, in input order.
    pub unscored: Vec<UnscoredFund>,
}

impl RankedUniverse {
    /// Symbol → percentile mapping.
    #[must_use]
    pub fn percentiles(&self) -> BTreeMap<String, f64> {
        self.funds
            .iter()
            .map(|f| (f.record.symbol.clone(), f.category_percentile))
            .collect()
    }
}

/// Ranks funds by composite score within their category.
///
/// Within each category of N ranked funds, funds are ordered by composite
/// score descending and given the percentile `rank / N × 100`, where tied
/// scores share the average of the ranks they span. A category with a single
/// fund therefore gets percentile 100. Funds without a category form their own
/// partition.
///
/// Records with a missing, NaN or infinite score, a blank symbol, or a symbol
/// that appears more than once are not ranked; they are returned in
/// [`RankedUniverse::unscored`] and do not count towards N. Ranked records
/// carry the trimmed symbol, the key every join matches on.
///
/// # Example
///
/// ```
/// use esgscreen_core::{rank_within_category, FundRecord};
///
/// let ranked = rank_within_category(&[
///     FundRecord::new("A", Some("X"), 0.9),
///     FundRecord::new("B", Some("X"), 0.5),
///     FundRecord::new("C", Some("X"), 0.5),
///     FundRecord::new("D", Some("X"), 0.1),
/// ]);
///
/// let p = ranked.percentiles();
/// assert_eq!(p["A"], 25.0);
/// assert_eq!(p["B"], 62.5);
/// assert_eq!(p["C"], 62.5);
/// assert_eq!(p["D"], 100.0);
/// ```
#[must_use]
pub fn rank_within_category(funds: &[FundRecord]) -> RankedUniverse {
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    for fund in funds {
        *occurrences.entry(fund.symbol.trim()).or_insert(0) += 1;
    }

    // Group scored records by category (using indices to keep input order irrelevant)
    let mut partitions: BTreeMap<Option<&str>, Vec<(usize, f64)>> = BTreeMap::new();
    let mut unscored = Vec::new();

    for (i, fund) in funds.iter().enumerate() {
        let checked = fund.usable_score().and_then(|score| {
            if occurrences.get(fund.symbol.trim()).copied().unwrap_or(0) > 1 {
                Err(InputIssue::DuplicateSymbol)
            } else {
                Ok(score)
            }
        });

        match checked {
            Ok(score) => partitions
                .entry(fund.category_key())
                .or_default()
                .push((i, score)),
            Err(issue) => {
                warn!(symbol = %fund.symbol, %issue, "fund left out of ranking");
                unscored.push(UnscoredFund::new(fund, issue));
            }
        }
    }

    let mut ranked = Vec::with_capacity(funds.len() - unscored.len());
    for (category, members) in &partitions {
        let scores: Vec<f64> = members.iter().map(|(_, s)| *s).collect();
        let ranks = average_ranks_descending(&scores);
        let size = members.len();

        debug!(
            category = category.unwrap_or("<none>"),
            size, "ranked category"
        );

        for ((idx, _), rank) in members.iter().zip(ranks) {
            let mut record = funds[*idx].clone();
            record.symbol = record.symbol.trim().to_string();
            ranked.push(RankedFund {
                record,
                category_percentile: rank / size as f64 * 100.0,
                category_rank: rank,
                category_size: size,
            });
        }
    }

    ranked.sort_by(|a, b| {
        compare_categories(a.record.category_key(), b.record.category_key())
            .then(a.category_percentile.total_cmp(&b.category_percentile))
            .then_with(|| a.record.symbol.cmp(&b.record.symbol))
    });

    RankedUniverse {
        funds: ranked,
        unscored,
    }
}

/// Average ranks of `scores` in descending order (1 = highest score).
///
/// Equal scores receive the mean of the rank positions they occupy, so the
/// ranks always sum to `n(n+1)/2`.
#[must_use]
pub fn average_ranks_descending(scores: &[f64]) -> Vec<f64> {
    let n = scores.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && scores[order[end]] == scores[order[start]] {
            end += 1;
        }
        // Positions start+1 ..= end share their mean
        let rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }
    ranks
}

/// Orders categories alphabetically with the missing category last.
pub(crate) fn compare_categories(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

//! CLI command implementations.

pub mod config;
pub mod drift;
pub mod reconcile;
pub mod report;
pub mod screen;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use drift::DriftArgs;
pub use reconcile::ReconcileArgs;
pub use report::ReportArgs;
pub use screen::ScreenArgs;

use std::path::Path;

use anyhow::{Context, Result};
use esgscreen_core::{score_universe, ScoredFund, ScreeningOutcome, TierCount, TierScheme};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{colorize_tier, format_percentile};

/// Loads a universe CSV and scores it against `scheme`.
pub fn load_and_score(path: &Path, scheme: &TierScheme) -> Result<ScreeningOutcome> {
    let funds = esgscreen_ext_file::load_funds(path)
        .with_context(|| format!("Failed to read fund universe {}", path.display()))?;
    Ok(score_universe(&funds, scheme))
}

/// One scored fund as displayed.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct FundRow {
    #[tabled(rename = "Symbol")]
    pub symbol: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Score")]
    pub score: String,
    #[tabled(rename = "Percentile")]
    pub percentile: String,
    #[tabled(rename = "Rank")]
    pub rank: String,
    #[tabled(rename = "Tier")]
    pub tier: String,
}

impl FundRow {
    /// Builds a display row; `tier_count` drives tier coloring in tables.
    pub fn new(fund: &ScoredFund, tier_count: Option<usize>) -> Self {
        let tier = match tier_count {
            Some(count) => colorize_tier(&fund.tier.name, fund.tier.ordinal, count),
            None => fund.tier.name.clone(),
        };
        Self {
            symbol: fund.symbol().to_string(),
            name: fund.name().to_string(),
            category: fund.category().unwrap_or("-").to_string(),
            score: format!("{:.4}", fund.composite_score()),
            percentile: format_percentile(fund.category_percentile),
            rank: format!("{} / {}", fund.category_rank, fund.category_size),
            tier,
        }
    }
}

/// Tier distribution row.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct TierCountRow {
    #[tabled(rename = "Tier")]
    pub tier: String,
    #[tabled(rename = "Funds")]
    pub count: usize,
    #[tabled(rename = "Share")]
    pub share: String,
}

impl From<&TierCount> for TierCountRow {
    fn from(count: &TierCount) -> Self {
        Self {
            tier: count.tier.name.clone(),
            count: count.count,
            share: format!("{:.1}%", count.share_pct),
        }
    }
}

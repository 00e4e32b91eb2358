//! # ESG Screen Core
//!
//! Category-relative ESG screening for fund universes.
//!
//! This crate ranks funds against their peer category by composite ESG score,
//! assigns each fund a qualification tier, tracks percentile drift between
//! scoring runs, and reconciles portfolio holdings against the scored universe.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every operation is a function of its explicit inputs
//! - **Lower is better**: percentiles run from near 0 (best) to 100 (worst)
//! - **Configured tiers**: tier names and boundaries always come from a [`TierScheme`]
//! - **Per-record failures**: bad rows are reported as unscored, never abort a batch
//!
//! ## Quick Start
//!
//! ```rust
//! use esgscreen_core::prelude::*;
//!
//! let funds = vec![
//!     FundRecord::new("A", Some("X"), 0.9),
//!     FundRecord::new("B", Some("X"), 0.5),
//!     FundRecord::new("C", Some("X"), 0.1),
//!     FundRecord::new("D", Some("Y"), 0.7),
//! ];
//!
//! let outcome = score_universe(&funds, &TierScheme::elite_review_replace());
//! let a = outcome.get("A").unwrap();
//! assert!((a.category_percentile - 100.0 / 3.0).abs() < 1e-9);
//! assert_eq!(outcome.get("D").unwrap().tier.name, "Replace");
//! ```
//!
//! ## Module Overview
//!
//! - [`types`] - Fund records, tier schemes, metric weights, holdings, periods
//! - [`ranking`] - Category-relative percentiles and tier assignment
//! - [`drift`] - Period-over-period percentile comparison
//! - [`reconcile`] - Holdings coverage against the scored universe
//! - [`summary`] - Per-category summaries and compliance report content
//! - [`error`] - Error types

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod drift;
pub mod error;
pub mod ranking;
pub mod reconcile;
pub mod summary;
pub mod types;

// Re-export error types at crate root
pub use error::{InputIssue, ScreenError, ScreenResult};

// Re-export main types
pub use types::{
    classify, ticker_set, FundRecord, Holding, MetricWeight, MetricWeights, Pillar, RankedFund,
    ReportingPeriod, ScoredFund, Tier, TierBand, TierScheme, UnscoredFund, PERCENTILE_CEILING,
    WEIGHT_SUM_TOLERANCE,
};

// Re-export ranking
pub use ranking::{
    average_ranks_descending, rank_within_category, score_universe, RankedUniverse,
    ScreeningOutcome,
};

// Re-export drift analysis
pub use drift::{compare, AlertCount, AlertLevel, DriftBand, DriftBands, DriftRecord, DriftReport};

// Re-export reconciliation
pub use reconcile::{
    reconcile, reconcile_holdings, tier_counts, tier_counts_for_scheme, ReconciliationResult,
    TierCount,
};

// Re-export summaries
pub use summary::{
    categories, methodology, summarize_category, CategorySummary, ComplianceReport,
    COMPLIANCE_DISCLAIMER, DEFAULT_TOP_N,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use esgscreen_core::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{InputIssue, ScreenError, ScreenResult};

    // Domain types
    pub use crate::types::{
        FundRecord, Holding, MetricWeights, ReportingPeriod, ScoredFund, Tier, TierBand,
        TierScheme, UnscoredFund,
    };

    // Operations
    pub use crate::drift::{compare, DriftBands, DriftReport};
    pub use crate::ranking::{rank_within_category, score_universe, ScreeningOutcome};
    pub use crate::reconcile::{reconcile, reconcile_holdings, ReconciliationResult};
    pub use crate::summary::{summarize_category, CategorySummary, ComplianceReport};

    // Re-export commonly used types from dependencies
    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_compiles() {
        // Basic smoke test
        let err = ScreenError::configuration("tiers", "empty scheme");
        assert!(err.to_string().contains("empty scheme"));
    }
}

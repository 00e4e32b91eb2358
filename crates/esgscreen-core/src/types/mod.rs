//! Domain types for fund screening.
//!
//! - [`FundRecord`]: A fund as supplied by the ingestion layer
//! - [`RankedFund`] / [`ScoredFund`]: Ranked and tiered output rows
//! - [`TierScheme`]: Configurable qualification thresholds
//! - [`MetricWeights`]: Composite score weights, validated once at load
//! - [`Holding`]: A portfolio position to reconcile
//! - [`ReportingPeriod`]: Quarter labels for exports and reports

mod fund;
mod holding;
mod period;
mod tier;
mod weights;

pub use fund::{FundRecord, RankedFund, ScoredFund, UnscoredFund};
pub use holding::{ticker_set, Holding};
pub use period::{ReportingPeriod, MAX_YEAR, MIN_YEAR};
pub use tier::{classify, Tier, TierBand, TierScheme, PERCENTILE_CEILING};
pub use weights::{MetricWeight, MetricWeights, Pillar, WEIGHT_SUM_TOLERANCE};

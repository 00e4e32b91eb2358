//! Category-relative ranking.
//!
//! - [`rank_within_category`]: average-rank percentiles within each peer category
//! - [`score_universe`]: ranking plus tier assignment
//!
//! Both are pure functions of the input multiset: reordering the input rows
//! never changes any fund's percentile.

mod percentile;
mod screen;

pub use percentile::{average_ranks_descending, rank_within_category, RankedUniverse};
pub(crate) use percentile::compare_categories;
pub use screen::{score_universe, ScreeningOutcome};

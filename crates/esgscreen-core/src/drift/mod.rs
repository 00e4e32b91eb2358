//! Drift analysis between two scoring runs.
//!
//! Under the lower-is-better percentile convention, a positive delta is a
//! deterioration. This is the opposite of "score went up is good" and every
//! consumer of [`DriftRecord::delta`] must read it that way.

mod bands;
mod compare;

pub use bands::{AlertLevel, DriftBand, DriftBands};
pub use compare::{compare, AlertCount, DriftRecord, DriftReport};

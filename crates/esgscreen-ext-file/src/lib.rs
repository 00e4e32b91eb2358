//! # ESG Screen Ext File
//!
//! CSV input and output for the screening engine.
//!
//! This crate reads the normalized input tables and writes screening results:
//! - Fund universes (`symbol`, `name`, `category`, `composite_score`, metric columns)
//! - Portfolio holdings (`ticker`, optional `weight` and `category`)
//! - Scored, unscored and drift exports
//!
//! Column names are matched case-insensitively; no other header guessing is done.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod export;
mod header;
mod holdings;
mod universe;

pub use error::{FileError, FileResult};
pub use export::{save_drift, save_scored, write_drift, write_scored, write_unscored};
pub use holdings::{
    load_holdings, read_holdings, HOLDING_CATEGORY_COLUMN, TICKER_COLUMN, WEIGHT_COLUMN,
};
pub use universe::{
    load_funds, read_funds, CATEGORY_COLUMN, DERIVED_COLUMNS, NAME_COLUMN, SCORE_COLUMN,
    SYMBOL_COLUMN,
};

//! CSV portfolio holdings.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, Trim};
use esgscreen_core::Holding;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{FileError, FileResult};
use crate::header::{cell, line_of, Header};

/// Required ticker column.
pub const TICKER_COLUMN: &str = "ticker";
/// Optional portfolio weight column.
pub const WEIGHT_COLUMN: &str = "weight";
/// Optional category column.
pub const HOLDING_CATEGORY_COLUMN: &str = "category";

/// Reads holdings from CSV.
///
/// Rows with a blank ticker are skipped. Weights are optional, but a weight
/// that is present must be a decimal number.
///
/// # Errors
///
/// Returns [`FileError::MissingColumn`] without a `ticker` column,
/// [`FileError::InvalidValue`] for an unparseable weight and
/// [`FileError::Csv`] for malformed CSV.
pub fn read_holdings<R: Read>(reader: R) -> FileResult<Vec<Holding>> {
    let mut csv = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let header = Header::new(csv.headers()?);

    let ticker_idx = header.require(TICKER_COLUMN)?;
    let weight_idx = header.position(WEIGHT_COLUMN);
    let category_idx = header.position(HOLDING_CATEGORY_COLUMN);

    let mut holdings = Vec::new();
    let mut skipped = 0usize;
    for (row, result) in csv.records().enumerate() {
        let record = result?;
        let Some(ticker) = cell(&record, Some(ticker_idx)) else {
            skipped += 1;
            continue;
        };

        let mut holding = Holding::new(ticker);
        if let Some(text) = cell(&record, weight_idx) {
            let weight = Decimal::from_str(text)
                .or_else(|_| Decimal::from_scientific(text))
                .map_err(|_| FileError::invalid_value(line_of(&record, row), WEIGHT_COLUMN, text))?;
            holding = holding.with_weight(weight);
        }
        if let Some(category) = cell(&record, category_idx) {
            holding = holding.with_category(category);
        }
        holdings.push(holding);
    }

    debug!(holdings = holdings.len(), skipped, "read holdings");
    Ok(holdings)
}

/// Loads holdings from a CSV file.
///
/// # Errors
///
/// Returns [`FileError::Io`] if the file cannot be opened, otherwise as
/// [`read_holdings`].
pub fn load_holdings(path: impl AsRef<Path>) -> FileResult<Vec<Holding>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_holdings(file)
}

//! CSV fund universes.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use esgscreen_core::FundRecord;
use tracing::{debug, warn};

use crate::error::{FileError, FileResult};
use crate::header::{cell, line_of, Header};

// =============================================================================
// COLUMNS
// =============================================================================

/// Required ticker column.
pub const SYMBOL_COLUMN: &str = "symbol";
/// Fund name column.
pub const NAME_COLUMN: &str = "name";
/// Peer category column.
pub const CATEGORY_COLUMN: &str = "category";
/// Composite score column.
pub const SCORE_COLUMN: &str = "composite_score";

/// Columns added by a screening export; ignored when read back as input.
pub const DERIVED_COLUMNS: [&str; 4] = [
    "category_percentile",
    "category_rank",
    "category_size",
    "tier",
];

// =============================================================================
// READERS
// =============================================================================

/// Reads a fund universe from CSV.
///
/// Headers are matched case-insensitively. A blank `composite_score` is a
/// missing score, `NaN` marks the fund as explicitly unscored, and any other
/// unparseable score is treated as missing. Columns other than the known ones
/// are kept as numeric metrics where the cell parses.
///
/// # Errors
///
/// Returns [`FileError::MissingColumn`] without a `symbol` column and
/// [`FileError::Csv`] for malformed CSV.
pub fn read_funds<R: Read>(reader: R) -> FileResult<Vec<FundRecord>> {
    let mut csv = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let header = Header::new(csv.headers()?);

    let symbol_idx = header.require(SYMBOL_COLUMN)?;
    let name_idx = header.position(NAME_COLUMN);
    let category_idx = header.position(CATEGORY_COLUMN);
    let score_idx = header.position(SCORE_COLUMN);

    let metric_columns: Vec<usize> = (0..header.len())
        .filter(|i| {
            let name = header.name(*i);
            !name.is_empty()
                && ![SYMBOL_COLUMN, NAME_COLUMN, CATEGORY_COLUMN, SCORE_COLUMN].contains(&name)
                && !DERIVED_COLUMNS.contains(&name)
        })
        .collect();

    let mut funds = Vec::new();
    for (row, result) in csv.records().enumerate() {
        let record = result?;
        let line = line_of(&record, row);
        let symbol = cell(&record, Some(symbol_idx)).unwrap_or_default().to_string();

        let composite_score = cell(&record, score_idx).and_then(|text| match text.parse::<f64>() {
            Ok(score) => Some(score),
            Err(_) => {
                warn!(
                    line,
                    symbol = %symbol,
                    value = text,
                    "non-numeric composite score treated as missing"
                );
                None
            }
        });

        let metrics = metric_columns
            .iter()
            .filter_map(|i| {
                let value = cell(&record, Some(*i))?.parse::<f64>().ok()?;
                Some((header.original(*i).to_string(), value))
            })
            .collect();

        funds.push(FundRecord {
            symbol,
            name: cell(&record, name_idx).unwrap_or_default().to_string(),
            category: cell(&record, category_idx).map(str::to_string),
            composite_score,
            metrics,
        });
    }

    debug!(funds = funds.len(), metrics = metric_columns.len(), "read fund universe");
    Ok(funds)
}

/// Loads a fund universe from a CSV file.
///
/// # Errors
///
/// Returns [`FileError::Io`] if the file cannot be opened, otherwise as
/// [`read_funds`].
pub fn load_funds(path: impl AsRef<Path>) -> FileResult<Vec<FundRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_funds(file)
}

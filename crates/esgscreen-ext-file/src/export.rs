//! CSV exports of screening results.
//!
//! Scored exports keep the input columns (metrics included) and append the
//! derived columns, so an export can be read back as a universe.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::Writer;
use esgscreen_core::{DriftReport, ScoredFund, UnscoredFund};
use tracing::debug;

use crate::error::{FileError, FileResult};
use crate::universe::{CATEGORY_COLUMN, DERIVED_COLUMNS, NAME_COLUMN, SCORE_COLUMN, SYMBOL_COLUMN};

// =============================================================================
// SCORED UNIVERSE
// =============================================================================

/// Writes scored funds as CSV.
///
/// Metric columns are the union of all funds' metrics, sorted by name.
///
/// # Errors
///
/// Returns [`FileError::Csv`] if writing fails.
pub fn write_scored<W: Write>(writer: W, funds: &[ScoredFund]) -> FileResult<()> {
    let metric_names: BTreeSet<&str> = funds
        .iter()
        .flat_map(|f| f.record.metrics.keys().map(String::as_str))
        .collect();

    let mut csv = Writer::from_writer(writer);
    let header: Vec<&str> = [SYMBOL_COLUMN, NAME_COLUMN, CATEGORY_COLUMN, SCORE_COLUMN]
        .into_iter()
        .chain(metric_names.iter().copied())
        .chain(DERIVED_COLUMNS)
        .collect();
    csv.write_record(&header)?;

    for fund in funds {
        let mut row = vec![
            fund.symbol().to_string(),
            fund.name().to_string(),
            fund.category().unwrap_or_default().to_string(),
            fund.composite_score().to_string(),
        ];
        row.extend(metric_names.iter().map(|name| {
            fund.record
                .metrics
                .get(*name)
                .map(ToString::to_string)
                .unwrap_or_default()
        }));
        row.extend([
            format!("{:.4}", fund.category_percentile),
            fund.category_rank.to_string(),
            fund.category_size.to_string(),
            fund.tier.name.clone(),
        ]);
        csv.write_record(&row)?;
    }

    csv.flush().map_err(csv::Error::from)?;
    debug!(rows = funds.len(), metrics = metric_names.len(), "wrote scored export");
    Ok(())
}

/// Writes scored funds to a CSV file.
///
/// # Errors
///
/// Returns [`FileError::Io`] if the file cannot be created, otherwise as
/// [`write_scored`].
pub fn save_scored(path: impl AsRef<Path>, funds: &[ScoredFund]) -> FileResult<()> {
    write_scored(create(path.as_ref())?, funds)
}

// =============================================================================
// UNSCORED RECORDS
// =============================================================================

/// Writes records left out of ranking, with the reason.
///
/// # Errors
///
/// Returns [`FileError::Csv`] if writing fails.
pub fn write_unscored<W: Write>(writer: W, unscored: &[UnscoredFund]) -> FileResult<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record([SYMBOL_COLUMN, NAME_COLUMN, CATEGORY_COLUMN, "issue"])?;
    for fund in unscored {
        csv.write_record([
            fund.symbol.as_str(),
            fund.name.as_str(),
            fund.category.as_deref().unwrap_or_default(),
            fund.issue.as_str(),
        ])?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

// =============================================================================
// DRIFT
// =============================================================================

/// Writes drift records, worst first.
///
/// # Errors
///
/// Returns [`FileError::Csv`] if writing fails.
pub fn write_drift<W: Write>(writer: W, report: &DriftReport) -> FileResult<()> {
    let mut csv = Writer::from_writer(writer);
    csv.write_record([
        SYMBOL_COLUMN,
        NAME_COLUMN,
        "percentile_previous",
        "percentile_current",
        "delta",
        "alert",
        "tier_previous",
        "tier_current",
    ])?;
    for record in &report.records {
        csv.write_record([
            record.symbol.clone(),
            record.name.clone(),
            format!("{:.4}", record.percentile_previous),
            format!("{:.4}", record.percentile_current),
            format!("{:.4}", record.delta),
            record.alert.label.clone(),
            record.tier_previous.name.clone(),
            record.tier_current.name.clone(),
        ])?;
    }
    csv.flush().map_err(csv::Error::from)?;
    debug!(rows = report.records.len(), "wrote drift export");
    Ok(())
}

/// Writes drift records to a CSV file.
///
/// # Errors
///
/// Returns [`FileError::Io`] if the file cannot be created, otherwise as
/// [`write_drift`].
pub fn save_drift(path: impl AsRef<Path>, report: &DriftReport) -> FileResult<()> {
    write_drift(create(path.as_ref())?, report)
}

fn create(path: &Path) -> FileResult<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| FileError::Io {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use esgscreen_core::{compare, score_universe, DriftBands, FundRecord, TierScheme};

    fn scored() -> Vec<ScoredFund> {
        score_universe(
            &[
                FundRecord::new("A", Some("Large Blend"), 0.9)
                    .with_name("Alpha, Inc. Fund")
                    .with_metric("MSCI ESG Score", 7.5),
                FundRecord::new("B", Some("Large Blend"), 0.1).with_metric("WACI", 120.0),
            ],
            &TierScheme::elite_review_replace(),
        )
        .funds
    }

    #[test]
    fn test_scored_export_layout() {
        let mut out = Vec::new();
        write_scored(&mut out, &scored()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "symbol,name,category,composite_score,MSCI ESG Score,WACI,\
             category_percentile,category_rank,category_size,tier"
        );
        assert_eq!(
            lines.next().unwrap(),
            "A,\"Alpha, Inc. Fund\",Large Blend,0.9,7.5,,50.0000,1,2,Review"
        );
        assert_eq!(
            lines.next().unwrap(),
            "B,,Large Blend,0.1,,120,100.0000,2,2,Replace"
        );
    }

    #[test]
    fn test_unscored_export() {
        let outcome = score_universe(
            &[FundRecord::excluded("X", None)],
            &TierScheme::elite_review_replace(),
        );
        let mut out = Vec::new();
        write_unscored(&mut out, &outcome.unscored).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "symbol,name,category,issue\nX,,,excluded\n"
        );
    }

    #[test]
    fn test_drift_export() {
        let funds = scored();
        let mut previous = funds.clone();
        previous.swap(0, 1);
        previous[0].category_percentile = 50.0;
        previous[1].category_percentile = 100.0;
        let report = compare(&funds, &previous, &DriftBands::standard());

        let mut out = Vec::new();
        write_drift(&mut out, &report).unwrap();
        let text = String::from_utf8(out).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].starts_with("B,,50.0000,100.0000,50.0000,severe"));
    }
}

//! File round trips through the screening engine.

use approx::assert_relative_eq;
use esgscreen_core::{reconcile_holdings, score_universe, TierScheme};
use esgscreen_ext_file::{load_funds, load_holdings, save_scored, FileError};
use rust_decimal_macros::dec;
use std::fs;

const UNIVERSE: &str = "\
symbol,name,category,composite_score,Fossil Fuels Reserve (%)
ESGV,Vanguard ESG US Stock,Large Blend,0.82,0.4
SUSA,iShares MSCI USA ESG Select,Large Blend,0.74,1.2
DSI,iShares MSCI KLD 400 Social,Large Blend,0.61,
CATH,Global X S&P 500 Catholic,Large Blend,0.40,3.5
EAGG,iShares ESG Aggregate Bond,Intermediate Core Bond,0.55,
";

#[test]
fn test_export_reads_back_as_universe() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("universe.csv");
    fs::write(&input, UNIVERSE).unwrap();

    let scheme = TierScheme::elite_review_replace();
    let funds = load_funds(&input).unwrap();
    let first = score_universe(&funds, &scheme);
    assert_eq!(first.funds.len(), 5);

    let export = dir.path().join("scored.csv");
    save_scored(&export, &first.funds).unwrap();

    // Derived columns are ignored on the way back in, so re-ranking is stable
    let reloaded = load_funds(&export).unwrap();
    let second = score_universe(&reloaded, &scheme);
    assert_eq!(first.percentiles(), second.percentiles());

    let esgv = second.get("ESGV").unwrap();
    assert_eq!(
        esgv.record.metrics.get("Fossil Fuels Reserve (%)"),
        Some(&0.4)
    );
    assert!(!esgv.record.metrics.contains_key("tier"));
}

#[test]
fn test_holdings_file_reconciles() {
    let dir = tempfile::tempdir().unwrap();
    let universe = dir.path().join("universe.csv");
    let holdings = dir.path().join("holdings.csv");
    fs::write(&universe, UNIVERSE).unwrap();
    fs::write(&holdings, "ticker,weight\nESGV,60\nCATH,30\nQQQ,10\n").unwrap();

    let outcome = score_universe(
        &load_funds(&universe).unwrap(),
        &TierScheme::elite_review_replace(),
    );
    let result = reconcile_holdings(&load_holdings(&holdings).unwrap(), &outcome.funds);

    assert_eq!(result.matched.len(), 2);
    assert_relative_eq!(result.coverage_ratio, 2.0 / 3.0, epsilon = 1e-12);
    assert_eq!(result.weighted_coverage, Some(dec!(0.9)));
}

#[test]
fn test_unwritable_export_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("scored.csv");
    assert!(matches!(
        save_scored(&path, &[]),
        Err(FileError::Io { .. })
    ));
}

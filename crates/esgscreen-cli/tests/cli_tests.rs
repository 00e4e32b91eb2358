//! End-to-end tests for the `esgscreen` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CURRENT: &str = "\
symbol,name,category,composite_score
A,Alpha,X,0.9
B,Beta,X,0.5
C,Gamma,X,0.1
D,Delta,Y,0.7
E,Echo,X,
";

const PREVIOUS: &str = "\
symbol,name,category,composite_score
A,Alpha,X,0.1
B,Beta,X,0.5
C,Gamma,X,0.9
D,Delta,Y,0.7
";

const HOLDINGS: &str = "\
ticker,weight
A,0.50
B,0.25
Z,0.25
";

fn esgscreen() -> Command {
    let mut cmd = Command::cargo_bin("esgscreen").unwrap();
    cmd.env_remove("ESGSCREEN_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

// =============================================================================
// SCREEN
// =============================================================================

#[test]
fn test_screen_requires_tier_scheme() {
    let dir = TempDir::new().unwrap();
    let universe = write(&dir, "universe.csv", CURRENT);

    esgscreen()
        .args(["screen", arg(&universe)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--preset"));
}

#[test]
fn test_screen_minimal_output() {
    let dir = TempDir::new().unwrap();
    let universe = write(&dir, "universe.csv", CURRENT);

    esgscreen()
        .args(["--preset", "elite-review-replace", "-f", "minimal", "screen", arg(&universe)])
        .assert()
        .success()
        .stdout(predicate::str::contains("A\tReview"))
        .stdout(predicate::str::contains("C\tReplace"))
        .stdout(predicate::str::contains("D\tReplace"))
        .stdout(predicate::str::contains("E\t").not());
}

#[test]
fn test_screen_json_lists_unscored() {
    let dir = TempDir::new().unwrap();
    let universe = write(&dir, "universe.csv", CURRENT);

    let output = esgscreen()
        .args(["--preset", "elite-review-replace", "-f", "json", "screen", arg(&universe)])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["funds"].as_array().unwrap().len(), 4);
    assert_eq!(json["unscored"][0]["symbol"], "E");
    assert_eq!(json["unscored"][0]["issue"], "missing_score");
}

#[test]
fn test_screen_category_and_tier_filters() {
    let dir = TempDir::new().unwrap();
    let universe = write(&dir, "universe.csv", CURRENT);

    esgscreen()
        .args([
            "--preset",
            "elite-review-replace",
            "-f",
            "minimal",
            "screen",
            arg(&universe),
            "--category",
            "X",
            "--tier",
            "replace",
        ])
        .assert()
        .success()
        .stdout("B\tReplace\nC\tReplace\n");
}

#[test]
fn test_screen_writes_exports() {
    let dir = TempDir::new().unwrap();
    let universe = write(&dir, "universe.csv", CURRENT);
    let scored = dir.path().join("scored.csv");
    let unscored = dir.path().join("unscored.csv");

    esgscreen()
        .args([
            "--preset",
            "four-tier",
            "-q",
            "screen",
            arg(&universe),
            "--output",
            arg(&scored),
            "--unscored",
            arg(&unscored),
        ])
        .assert()
        .success();

    let scored = fs::read_to_string(scored).unwrap();
    assert!(scored.starts_with(
        "symbol,name,category,composite_score,category_percentile,category_rank,category_size,tier\n"
    ));
    assert_eq!(scored.lines().count(), 5);

    let unscored = fs::read_to_string(unscored).unwrap();
    assert!(unscored.contains("E,Echo,X,missing_score"));
}

#[test]
fn test_screen_missing_file() {
    esgscreen()
        .args(["--preset", "four-tier", "screen", "/no/such/universe.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read fund universe"));
}

// =============================================================================
// DRIFT
// =============================================================================

#[test]
fn test_drift_flags_deterioration() {
    let dir = TempDir::new().unwrap();
    let current = write(&dir, "current.csv", CURRENT);
    let previous = write(&dir, "previous.csv", PREVIOUS);

    esgscreen()
        .args([
            "--preset",
            "elite-review-replace",
            "-f",
            "minimal",
            "drift",
            arg(&current),
            arg(&previous),
        ])
        .assert()
        .success()
        .stdout("C\t+66.7\tsevere\n");
}

#[test]
fn test_drift_all_and_csv_export() {
    let dir = TempDir::new().unwrap();
    let current = write(&dir, "current.csv", CURRENT);
    let previous = write(&dir, "previous.csv", PREVIOUS);
    let export = dir.path().join("drift.csv");

    esgscreen()
        .args([
            "--preset",
            "elite-review-replace",
            "-f",
            "csv",
            "drift",
            arg(&current),
            arg(&previous),
            "--all",
            "--output",
            arg(&export),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("A,Alpha,100.0000,33.3333,-66.6667,stable"));

    let export = fs::read_to_string(export).unwrap();
    assert_eq!(export.lines().count(), 5);
}

// =============================================================================
// RECONCILE
// =============================================================================

#[test]
fn test_reconcile_coverage() {
    let dir = TempDir::new().unwrap();
    let universe = write(&dir, "universe.csv", CURRENT);
    let holdings = write(&dir, "holdings.csv", HOLDINGS);

    esgscreen()
        .args([
            "--preset",
            "elite-review-replace",
            "-f",
            "minimal",
            "reconcile",
            arg(&universe),
            arg(&holdings),
        ])
        .assert()
        .success()
        .stdout("66.7%\n");
}

#[test]
fn test_reconcile_json_weighted_coverage() {
    let dir = TempDir::new().unwrap();
    let universe = write(&dir, "universe.csv", CURRENT);
    let holdings = write(&dir, "holdings.csv", HOLDINGS);

    let output = esgscreen()
        .args([
            "--preset",
            "elite-review-replace",
            "-f",
            "json",
            "reconcile",
            arg(&universe),
            arg(&holdings),
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["matched"].as_array().unwrap().len(), 2);
    assert_eq!(json["unmatched_tickers"], serde_json::json!(["Z"]));
    assert_eq!(json["weighted_coverage"].as_f64(), Some(0.75));
}

// =============================================================================
// REPORT
// =============================================================================

#[test]
fn test_report_text() {
    let dir = TempDir::new().unwrap();
    let universe = write(&dir, "universe.csv", CURRENT);

    esgscreen()
        .args([
            "--preset",
            "elite-review-replace",
            "report",
            arg(&universe),
            "--category",
            "X",
            "--period",
            "2025Q4",
            "--date",
            "2026-01-15",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("ESG Quantitative Screening Report"))
        .stdout(predicate::str::contains("Category:    X"))
        .stdout(predicate::str::contains("Report Date: January 15, 2026"))
        .stdout(predicate::str::contains("Total funds screened: 3"));
}

#[test]
fn test_report_out_dir_uses_standard_name() {
    let dir = TempDir::new().unwrap();
    let universe = write(&dir, "universe.csv", CURRENT);

    esgscreen()
        .args([
            "--preset",
            "elite-review-replace",
            "-q",
            "report",
            arg(&universe),
            "--category",
            "X",
            "--period",
            "2025Q4",
            "--date",
            "2026-01-15",
            "--out-dir",
            arg(dir.path()),
        ])
        .assert()
        .success();

    let report = fs::read_to_string(dir.path().join("X_2025Q4.txt")).unwrap();
    assert!(report.contains("Quarter:     2025Q4"));
}

#[test]
fn test_report_rejects_bad_period() {
    let dir = TempDir::new().unwrap();
    let universe = write(&dir, "universe.csv", CURRENT);

    esgscreen()
        .args(["--preset", "four-tier", "report", arg(&universe), "--period", "2025Q5"])
        .assert()
        .failure();
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn test_template_validates_and_drives_screen() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("screening.toml");
    let universe = write(&dir, "universe.csv", CURRENT);

    esgscreen()
        .args(["config", "template", "--output", arg(&config)])
        .assert()
        .success();
    assert!(fs::read_to_string(&config).unwrap().contains("[[tiers]]"));

    esgscreen()
        .args(["config", "validate", arg(&config)])
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));

    esgscreen()
        .args(["-f", "minimal", "screen", arg(&universe)])
        .env("ESGSCREEN_CONFIG", arg(&config))
        .assert()
        .success()
        .stdout(predicate::str::contains("A\tReview"));
}

#[test]
fn test_validate_reports_every_problem() {
    let dir = TempDir::new().unwrap();
    let config = write(
        &dir,
        "bad.toml",
        r#"
version = 7

[[tiers]]
name = "Elite"
upper_bound = 50.0

[[tiers]]
name = "Replace"
upper_bound = 25.0
"#,
    );

    esgscreen()
        .args(["config", "validate", arg(&config)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("version"))
        .stderr(predicate::str::contains("tiers"))
        .stderr(predicate::str::contains("is not a valid screening configuration"));
}

#[test]
fn test_config_show_preset_json() {
    let output = esgscreen()
        .args(["--preset", "four-tier", "-f", "json", "config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["tiers"].as_array().unwrap().len(), 4);
    assert_eq!(json["tiers"][0]["name"], "Elite");
}

#[test]
fn test_preset_and_config_conflict() {
    esgscreen()
        .args(["--preset", "four-tier", "--config", "a.toml", "config", "show"])
        .assert()
        .failure();
}

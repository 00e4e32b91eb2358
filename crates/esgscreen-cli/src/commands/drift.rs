//! Drift command implementation.
//!
//! Re-ranks two universes with the same tier scheme and compares each fund's
//! category percentile between them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use esgscreen_core::{compare, DriftBands, DriftRecord, DriftReport, ReportingPeriod};
use esgscreen_ext_file::{save_drift, write_drift};
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use crate::cli::{ConfigSource, OutputFormat};
use crate::commands::load_and_score;
use crate::output::{
    colorize_alert, format_delta, format_percentile, print_header, print_info, print_json_value,
    print_output, print_success, print_warning,
};

/// Arguments for the drift command.
#[derive(Args, Debug)]
pub struct DriftArgs {
    /// Current fund universe CSV
    pub current: PathBuf,

    /// Previous fund universe CSV
    pub previous: PathBuf,

    /// Lowest alert severity to list (0 is the baseline level)
    #[arg(long, default_value = "2")]
    pub min_severity: usize,

    /// List every compared fund regardless of severity
    #[arg(long)]
    pub all: bool,

    /// Write every drift record to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Quarter of the current universe, e.g. 2025Q4; labels the comparison
    #[arg(long)]
    pub period: Option<ReportingPeriod>,
}

/// One drift record as displayed.
#[derive(Debug, Clone, Serialize, Tabled)]
struct DriftRow {
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Previous")]
    previous: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Change")]
    delta: String,
    #[tabled(rename = "Alert")]
    alert: String,
    #[tabled(rename = "Tier")]
    tier: String,
}

impl DriftRow {
    fn new(record: &DriftRecord, bands: &DriftBands) -> Self {
        let tier = if record.changed_tier() {
            format!("{} → {}", record.tier_previous, record.tier_current)
        } else {
            record.tier_current.name.clone()
        };
        Self {
            symbol: record.symbol.clone(),
            name: record.name.clone(),
            previous: format_percentile(record.percentile_previous),
            current: format_percentile(record.percentile_current),
            delta: format_delta(record.delta),
            alert: colorize_alert(
                &record.alert.label,
                record.alert.severity,
                bands.max_severity(),
            ),
            tier,
        }
    }
}

/// Alert count row.
#[derive(Debug, Clone, Serialize, Tabled)]
struct AlertRow {
    #[tabled(rename = "Alert")]
    alert: String,
    #[tabled(rename = "Funds")]
    count: usize,
}

/// Execute the drift command.
pub fn execute(args: DriftArgs, source: &ConfigSource, format: OutputFormat) -> Result<()> {
    let config = source.load()?;
    let current = load_and_score(&args.current, &config.tiers)?;
    let previous = load_and_score(&args.previous, &config.tiers)?;
    let report = compare(&current.funds, &previous.funds, &config.drift);
    info!(compared = report.records.len(), "drift comparison complete");

    if let Some(path) = &args.output {
        save_drift(path, &report).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let min_severity = if args.all { 0 } else { args.min_severity };
    let listed = report.flagged(min_severity);

    match format {
        OutputFormat::Table => {
            print_header(&title(args.period));
            let rows: Vec<DriftRow> = listed
                .iter()
                .map(|r| DriftRow::new(r, &config.drift))
                .collect();
            print_output(&rows, format)?;

            print_header("Alert Summary");
            let counts: Vec<AlertRow> = report
                .alert_counts(&config.drift)
                .into_iter()
                .map(|c| AlertRow {
                    alert: c.alert.label,
                    count: c.count,
                })
                .collect();
            print_output(&counts, format)?;

            if !source.quiet {
                report_exclusions(&report);
                if let Some(path) = &args.output {
                    print_success(&format!("Drift records written to {}", path.display()));
                }
            }
        }
        OutputFormat::Json => {
            print_json_value(&report)?;
        }
        OutputFormat::Csv => {
            write_drift(std::io::stdout(), &filtered(&report, min_severity))?;
        }
        OutputFormat::Minimal => {
            for record in listed {
                println!("{}\t{}\t{}", record.symbol, format_delta(record.delta), record.alert);
            }
        }
    }

    Ok(())
}

fn title(period: Option<ReportingPeriod>) -> String {
    match period {
        Some(current) => match current.previous() {
            Some(previous) => format!("Percentile Drift ({previous} → {current})"),
            None => format!("Percentile Drift ({current})"),
        },
        None => "Percentile Drift".to_string(),
    }
}

fn filtered(report: &DriftReport, min_severity: usize) -> DriftReport {
    DriftReport {
        records: report.flagged(min_severity).into_iter().cloned().collect(),
        ..report.clone()
    }
}

fn report_exclusions(report: &DriftReport) {
    if !report.current_only.is_empty() {
        print_warning(&format!(
            "{} fund(s) new this period, not compared: {}",
            report.current_only_count(),
            report.current_only.join(", ")
        ));
    }
    if !report.previous_only.is_empty() {
        print_warning(&format!(
            "{} fund(s) dropped since last period, not compared: {}",
            report.previous_only_count(),
            report.previous_only.join(", ")
        ));
    }
    if report.duplicates_ignored > 0 {
        print_info(&format!(
            "{} repeated symbol(s) ignored",
            report.duplicates_ignored
        ));
    }
}

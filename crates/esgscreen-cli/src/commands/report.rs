//! Report command implementation.
//!
//! Builds the quarterly compliance report for one category and renders it as
//! plain text (or JSON).

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use esgscreen_core::{ComplianceReport, ReportingPeriod};
use tabled::{settings::Style, Table};
use tracing::info;

use crate::cli::{ConfigSource, OutputFormat};
use crate::commands::{load_and_score, FundRow, TierCountRow};
use crate::output::print_success;

/// Arguments for the report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Fund universe CSV
    pub universe: PathBuf,

    /// Category to report on (omit for funds without a category)
    #[arg(long)]
    pub category: Option<String>,

    /// Reporting quarter, e.g. 2025Q4
    #[arg(long)]
    pub period: ReportingPeriod,

    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Write the report to this file
    #[arg(short, long, conflicts_with = "out_dir")]
    pub output: Option<PathBuf>,

    /// Write the report into this directory under its standard file name
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

/// Execute the report command.
pub fn execute(args: ReportArgs, source: &ConfigSource, format: OutputFormat) -> Result<()> {
    let config = source.load()?;
    let outcome = load_and_score(&args.universe, &config.tiers)?;
    let generated_on = args
        .date
        .unwrap_or_else(|| chrono::Utc::now().date_naive());

    let report = ComplianceReport::build(
        &outcome.funds,
        args.category.as_deref(),
        args.period,
        generated_on,
        &config.tiers,
        &config.weights,
    );
    info!(
        category = report.summary.label(),
        funds = report.summary.total,
        period = %report.period,
        "built compliance report"
    );

    let (body, extension) = match format {
        OutputFormat::Json => (serde_json::to_string_pretty(&report)?, "json"),
        _ => (render_text(&report), "txt"),
    };

    let destination = match (&args.output, &args.out_dir) {
        (Some(path), _) => Some(path.clone()),
        (None, Some(dir)) => Some(dir.join(report.file_name(extension))),
        (None, None) => None,
    };

    match destination {
        Some(path) => {
            fs::write(&path, &body)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if !source.quiet {
                print_success(&format!("Report written to {}", path.display()));
            }
        }
        None if format == OutputFormat::Json => println!("{body}"),
        None => print!("{body}"),
    }

    Ok(())
}

/// Renders the report as plain text.
pub fn render_text(report: &ComplianceReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    let _ = writeln!(out, "ESG Quantitative Screening Report");
    let _ = writeln!(out, "=================================");
    let _ = writeln!(out, "Category:    {}", summary.label());
    let _ = writeln!(out, "Quarter:     {}", report.period);
    let _ = writeln!(out, "Report Date: {}", report.generated_on.format("%B %d, %Y"));

    section(&mut out, "Summary Statistics");
    let _ = writeln!(out, "Total funds screened: {}", summary.total);
    let tiers: Vec<TierCountRow> = summary.tiers.iter().map(TierCountRow::from).collect();
    let _ = writeln!(out, "{}", Table::new(&tiers).with(Style::ascii()));

    section(&mut out, &format!("Top {} Funds", summary.top.len()));
    if summary.top.is_empty() {
        let _ = writeln!(out, "No scored funds in this category.");
    } else {
        let rows: Vec<FundRow> = summary.top.iter().map(|f| FundRow::new(f, None)).collect();
        let _ = writeln!(out, "{}", Table::new(&rows).with(Style::ascii()));
    }

    section(&mut out, "Tier Definitions");
    let mut lower = 0.0;
    for band in &report.tier_definitions {
        let _ = write!(
            out,
            "{}: percentile {:.0} to {:.0}",
            band.name, lower, band.upper_bound
        );
        if let Some(description) = &band.description {
            let _ = write!(out, " ({description})");
        }
        out.push('\n');
        lower = band.upper_bound;
    }

    section(&mut out, "Screening Methodology");
    let _ = writeln!(out, "{}", report.methodology);

    section(&mut out, "Disclaimer");
    let _ = writeln!(out, "{}", report.disclaimer);
    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{title}\n{}", "-".repeat(title.chars().count()));
}

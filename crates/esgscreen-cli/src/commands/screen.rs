//! Screen command implementation.
//!
//! Ranks a fund universe within its categories and assigns tiers.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use esgscreen_core::{tier_counts_for_scheme, ScoredFund, ScreeningOutcome, UnscoredFund};
use esgscreen_ext_file::{save_scored, write_scored, write_unscored};
use serde::Serialize;
use tracing::info;

use crate::cli::{ConfigSource, OutputFormat};
use crate::commands::{load_and_score, FundRow, TierCountRow};
use crate::output::{print_header, print_json_value, print_output, print_success, print_warning};

/// Arguments for the screen command.
#[derive(Args, Debug)]
pub struct ScreenArgs {
    /// Fund universe CSV
    pub input: PathBuf,

    /// Only show funds of this category
    #[arg(long)]
    pub category: Option<String>,

    /// Only show funds in this tier
    #[arg(long)]
    pub tier: Option<String>,

    /// Write the full scored universe to this CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write records left out of ranking to this CSV file
    #[arg(long)]
    pub unscored: Option<PathBuf>,
}

/// JSON shape of a screening run.
#[derive(Debug, Serialize)]
struct ScreenJson<'a> {
    funds: Vec<&'a ScoredFund>,
    unscored: &'a [UnscoredFund],
}

/// Execute the screen command.
pub fn execute(args: ScreenArgs, source: &ConfigSource, format: OutputFormat) -> Result<()> {
    let config = source.load()?;
    let outcome = load_and_score(&args.input, &config.tiers)?;
    info!(
        scored = outcome.funds.len(),
        unscored = outcome.unscored_count(),
        "screened {}",
        args.input.display()
    );

    if let Some(path) = &args.output {
        save_scored(path, &outcome.funds)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    if let Some(path) = &args.unscored {
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        write_unscored(BufWriter::new(file), &outcome.unscored)?;
    }

    let selected = select(&outcome, args.category.as_deref(), args.tier.as_deref());

    match format {
        OutputFormat::Table => {
            print_header(&format!("Screening Results ({})", source.describe()));
            let rows: Vec<FundRow> = selected
                .iter()
                .map(|f| FundRow::new(f, Some(config.tiers.len())))
                .collect();
            print_output(&rows, format)?;

            print_header("Tier Distribution");
            let counts: Vec<TierCountRow> =
                tier_counts_for_scheme(selected.iter().copied(), &config.tiers)
                    .iter()
                    .map(TierCountRow::from)
                    .collect();
            print_output(&counts, format)?;

            if !source.quiet {
                report_unscored(&outcome.unscored);
                if let Some(path) = &args.output {
                    print_success(&format!("Scored universe written to {}", path.display()));
                }
            }
        }
        OutputFormat::Json => {
            print_json_value(&ScreenJson {
                funds: selected,
                unscored: &outcome.unscored,
            })?;
        }
        OutputFormat::Csv => {
            let funds: Vec<ScoredFund> = selected.into_iter().cloned().collect();
            write_scored(std::io::stdout(), &funds)?;
        }
        OutputFormat::Minimal => {
            for fund in selected {
                println!("{}\t{}", fund.symbol(), fund.tier.name);
            }
        }
    }

    Ok(())
}

fn select<'a>(
    outcome: &'a ScreeningOutcome,
    category: Option<&str>,
    tier: Option<&str>,
) -> Vec<&'a ScoredFund> {
    outcome
        .funds
        .iter()
        .filter(|f| category.map_or(true, |c| f.category() == Some(c)))
        .filter(|f| tier.map_or(true, |t| f.tier.name.eq_ignore_ascii_case(t)))
        .collect()
}

fn report_unscored(unscored: &[UnscoredFund]) {
    if unscored.is_empty() {
        return;
    }
    print_warning(&format!("{} record(s) left out of ranking:", unscored.len()));
    for fund in unscored {
        print_warning(&format!("  {} ({})", fund.symbol, fund.issue));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esgscreen_core::{score_universe, FundRecord, TierScheme};

    #[test]
    fn test_select_filters() {
        let outcome = score_universe(
            &[
                FundRecord::new("A", Some("X"), 0.9),
                FundRecord::new("B", Some("X"), 0.1),
                FundRecord::new("C", Some("Y"), 0.5),
            ],
            &TierScheme::elite_review_replace(),
        );

        assert_eq!(select(&outcome, None, None).len(), 3);
        assert_eq!(select(&outcome, Some("X"), None).len(), 2);

        let replace: Vec<&str> = select(&outcome, None, Some("replace"))
            .iter()
            .map(|f| f.symbol())
            .collect();
        assert_eq!(replace, vec!["B", "C"]);
    }
}

//! Reconcile command implementation.
//!
//! Matches portfolio holdings against a scored universe and reports coverage
//! and the tier mix of what is held.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use esgscreen_core::{reconcile_holdings, ReconciliationResult};
use esgscreen_ext_file::{load_holdings, write_scored};
use tracing::info;

use crate::cli::{ConfigSource, OutputFormat};
use crate::commands::{load_and_score, FundRow, TierCountRow};
use crate::output::{
    format_percent, format_ratio, print_header, print_json_value, print_output, print_warning,
    KeyValue,
};

/// Arguments for the reconcile command.
#[derive(Args, Debug)]
pub struct ReconcileArgs {
    /// Fund universe CSV
    pub universe: PathBuf,

    /// Holdings CSV (`ticker`, optional `weight` and `category`)
    pub holdings: PathBuf,
}

/// Execute the reconcile command.
pub fn execute(args: ReconcileArgs, source: &ConfigSource, format: OutputFormat) -> Result<()> {
    let config = source.load()?;
    let universe = load_and_score(&args.universe, &config.tiers)?;
    let holdings = load_holdings(&args.holdings)
        .with_context(|| format!("Failed to read holdings {}", args.holdings.display()))?;

    let result = reconcile_holdings(&holdings, &universe.funds);
    info!(
        holdings = holdings.len(),
        matched = result.matched.len(),
        "reconciliation complete"
    );

    match format {
        OutputFormat::Table => {
            print_header("Holdings Coverage");
            print_output(&coverage_rows(&result), format)?;

            print_header("Tier Mix");
            let counts: Vec<TierCountRow> =
                result.tier_counts.iter().map(TierCountRow::from).collect();
            print_output(&counts, format)?;

            print_header("Matched Holdings");
            let rows: Vec<FundRow> = result
                .matched
                .iter()
                .map(|f| FundRow::new(f, Some(config.tiers.len())))
                .collect();
            print_output(&rows, format)?;

            if !source.quiet && !result.unmatched_tickers.is_empty() {
                let tickers: Vec<&str> =
                    result.unmatched_tickers.iter().map(String::as_str).collect();
                print_warning(&format!(
                    "{} holding(s) not in the scored universe: {}",
                    tickers.len(),
                    tickers.join(", ")
                ));
            }
        }
        OutputFormat::Json => {
            print_json_value(&result)?;
        }
        OutputFormat::Csv => {
            write_scored(std::io::stdout(), &result.matched)?;
        }
        OutputFormat::Minimal => {
            println!("{}", format_ratio(result.coverage_ratio));
        }
    }

    Ok(())
}

fn coverage_rows(result: &ReconciliationResult) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::new("Matched", result.matched.len().to_string()),
        KeyValue::new("Unmatched", result.unmatched_tickers.len().to_string()),
        KeyValue::new("Coverage", format_ratio(result.coverage_ratio)),
    ];
    if let Some(weighted) = result.weighted_coverage {
        rows.push(KeyValue::new("Weighted Coverage", format_percent(weighted)));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use esgscreen_core::{score_universe, FundRecord, Holding, TierScheme};
    use rust_decimal::Decimal;

    #[test]
    fn test_coverage_rows() {
        let universe = score_universe(
            &[
                FundRecord::new("A", Some("X"), 0.9),
                FundRecord::new("B", Some("X"), 0.1),
            ],
            &TierScheme::elite_review_replace(),
        );
        let holdings = vec![
            Holding::new("A").with_weight(Decimal::new(75, 2)),
            Holding::new("Z").with_weight(Decimal::new(25, 2)),
        ];
        let result = reconcile_holdings(&holdings, &universe.funds);

        let rows = coverage_rows(&result);
        let values: Vec<(&str, &str)> = rows
            .iter()
            .map(|kv| (kv.key.as_str(), kv.value.as_str()))
            .collect();
        assert_eq!(
            values,
            vec![
                ("Matched", "1"),
                ("Unmatched", "1"),
                ("Coverage", "50.0%"),
                ("Weighted Coverage", "75.00%"),
            ]
        );
    }
}

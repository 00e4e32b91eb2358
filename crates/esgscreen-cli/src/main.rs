//! esgscreen - Command-line interface for category-relative ESG fund screening.
//!
//! # Usage
//!
//! ```bash
//! # Rank a universe and assign tiers
//! esgscreen --preset elite-review-replace screen universe.csv
//!
//! # Compare this quarter against last quarter
//! esgscreen --config screening.toml drift current.csv previous.csv
//!
//! # Check portfolio holdings against the scored universe
//! esgscreen --preset four-tier reconcile universe.csv holdings.csv
//!
//! # Produce the quarterly compliance report for one category
//! esgscreen --config screening.toml report universe.csv --category "Large Blend" --period 2025Q4
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let format = cli.format;
    let source = cli.config_source();

    match cli.command {
        Commands::Screen(args) => commands::screen::execute(args, &source, format)?,
        Commands::Drift(args) => commands::drift::execute(args, &source, format)?,
        Commands::Reconcile(args) => commands::reconcile::execute(args, &source, format)?,
        Commands::Report(args) => commands::report::execute(args, &source, format)?,
        Commands::Config(args) => commands::config::execute(args, &source, format)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only command output.
fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "esgscreen_core={default_level},esgscreen_config={default_level},\
             esgscreen_ext_file={default_level},esgscreen_cli={default_level}"
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

//! CLI argument definitions.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use esgscreen_config::{Preset, ScreeningConfig};
use tracing::debug;

use crate::commands::{ConfigArgs, DriftArgs, ReconcileArgs, ReportArgs, ScreenArgs};

/// esgscreen - Category-relative ESG screening for fund universes
#[derive(Parser)]
#[command(name = "esgscreen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Screening configuration file (TOML or JSON)
    #[arg(short, long, env = "ESGSCREEN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Named tier preset to use instead of a configuration file
    #[arg(long, global = true, conflicts_with = "config")]
    pub preset: Option<Preset>,

    /// Increase log detail (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Where the screening configuration for this run comes from.
    pub fn config_source(&self) -> ConfigSource {
        ConfigSource {
            path: self.config.clone(),
            preset: self.preset,
            quiet: self.quiet,
        }
    }
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Rank a fund universe within categories and assign tiers
    Screen(ScreenArgs),

    /// Compare two scoring runs and flag percentile deterioration
    Drift(DriftArgs),

    /// Check portfolio holdings against a scored universe
    Reconcile(ReconcileArgs),

    /// Produce the quarterly compliance report for one category
    Report(ReportArgs),

    /// Show, validate or generate screening configurations
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the values)
    Minimal,
}

/// The configuration selected on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigSource {
    /// Configuration file path.
    pub path: Option<PathBuf>,
    /// Named preset.
    pub preset: Option<Preset>,
    /// Quiet mode, carried for commands that print notes.
    pub quiet: bool,
}

impl ConfigSource {
    /// Loads the configuration.
    ///
    /// There is no implicit tier scheme: one of `--config` or `--preset` must
    /// be given.
    pub fn load(&self) -> Result<ScreeningConfig> {
        match (&self.path, self.preset) {
            (Some(path), _) => {
                debug!(path = %path.display(), "loading screening configuration");
                ScreeningConfig::from_file(path)
                    .with_context(|| format!("Failed to load configuration {}", path.display()))
            }
            (None, Some(preset)) => {
                debug!(%preset, "using tier preset");
                Ok(ScreeningConfig::preset(preset)?)
            }
            (None, None) => bail!(
                "No tier scheme selected. Pass --config <PATH> or --preset <NAME> ({})",
                preset_names()
            ),
        }
    }

    /// Human-readable description of the source.
    pub fn describe(&self) -> String {
        match (&self.path, self.preset) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(preset)) => format!("preset {preset}"),
            (None, None) => "standard".to_string(),
        }
    }
}

fn preset_names() -> String {
    Preset::ALL
        .iter()
        .map(|p| p.name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_load_requires_a_source() {
        let err = ConfigSource::default().load().unwrap_err();
        assert!(err.to_string().contains("--preset"));
    }

    #[test]
    fn test_load_preset() {
        let source = ConfigSource {
            preset: Some(Preset::FourTier),
            ..ConfigSource::default()
        };
        let config = source.load().unwrap();
        assert_eq!(config.tiers.len(), 4);
        assert_eq!(source.describe(), "preset four-tier");
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "esgscreen",
            "--preset",
            "four-tier",
            "-vv",
            "--format",
            "json",
            "screen",
            "universe.csv",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.preset, Some(Preset::FourTier));
    }

    #[test]
    fn test_config_and_preset_conflict() {
        assert!(Cli::try_parse_from([
            "esgscreen",
            "--config",
            "a.toml",
            "--preset",
            "four-tier",
            "screen",
            "universe.csv",
        ])
        .is_err());
    }
}

//! Config command implementation.
//!
//! Shows, validates and generates screening configurations.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use esgscreen_config::ScreeningConfig;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{ConfigSource, OutputFormat};
use crate::output::{
    format_ratio, print_error, print_header, print_info, print_output, print_success, KeyValue,
};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the selected configuration (the standard one if none is selected)
    Show,

    /// Validate a configuration file and list every problem found
    Validate(ValidateArgs),

    /// Print the standard configuration as an editable TOML template
    Template(TemplateArgs),
}

/// Arguments for validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration file (defaults to --config)
    pub path: Option<PathBuf>,
}

/// Arguments for template subcommand.
#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Write the template to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct WeightRow {
    #[tabled(rename = "Metric")]
    name: String,
    #[tabled(rename = "Pillar")]
    pillar: String,
    #[tabled(rename = "Weight")]
    weight: String,
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct TierRow {
    #[tabled(rename = "Tier")]
    name: String,
    #[tabled(rename = "Upper Bound")]
    upper_bound: String,
    #[tabled(rename = "Description")]
    description: String,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, source: &ConfigSource, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(source, format),
        ConfigCommand::Validate(validate_args) => execute_validate(validate_args, source),
        ConfigCommand::Template(template_args) => execute_template(template_args, source),
    }
}

/// Show the selected configuration.
fn execute_show(source: &ConfigSource, format: OutputFormat) -> Result<()> {
    let config = if source.path.is_none() && source.preset.is_none() {
        if !source.quiet && format == OutputFormat::Table {
            print_info("No --config or --preset given; showing the standard configuration");
        }
        ScreeningConfig::standard()
    } else {
        source.load()?
    };

    match format {
        OutputFormat::Table => {
            print_header(&format!("Screening Configuration ({})", source.describe()));
            print_output(&overview(&config), format)?;

            print_header("Metric Weights");
            print_output(&weight_rows(&config), format)?;

            print_header("Tiers");
            print_output(&tier_rows(&config), format)?;

            print_header("Drift Alerts");
            let mut drift = vec![KeyValue::new(config.drift.baseline(), "delta <= first cut")];
            drift.extend(
                config
                    .drift
                    .bands()
                    .iter()
                    .map(|b| KeyValue::new(b.label.clone(), format!("delta > {}", b.above))),
            );
            print_output(&drift, format)?;
        }
        OutputFormat::Json => {
            println!("{}", config.to_json_string()?);
        }
        OutputFormat::Csv => {
            print_output(&tier_rows(&config), format)?;
        }
        OutputFormat::Minimal => {
            print!("{}", config.to_toml_string()?);
        }
    }

    Ok(())
}

/// Validate a configuration file.
fn execute_validate(args: ValidateArgs, source: &ConfigSource) -> Result<()> {
    let Some(path) = args.path.or_else(|| source.path.clone()) else {
        bail!("No configuration file given. Pass a path or --config <PATH>");
    };

    match ScreeningConfig::from_file(&path) {
        Ok(config) => {
            if !source.quiet {
                print_success(&format!(
                    "{} is valid ({} tiers, {} metrics)",
                    path.display(),
                    config.tiers.len(),
                    config.weights.len()
                ));
            }
            Ok(())
        }
        Err(err) => {
            let problems = err.validation_errors();
            if problems.is_empty() {
                print_error(&err.to_string());
            } else {
                for problem in &problems {
                    print_error(&problem.to_string());
                }
            }
            bail!("{} is not a valid screening configuration", path.display())
        }
    }
}

/// Print or write the configuration template.
fn execute_template(args: TemplateArgs, source: &ConfigSource) -> Result<()> {
    let template = ScreeningConfig::template_toml()?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, template)?;
            if !source.quiet {
                print_success(&format!("Template written to {}", path.display()));
            }
        }
        None => print!("{template}"),
    }
    Ok(())
}

fn overview(config: &ScreeningConfig) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Version", config.version.to_string()),
        KeyValue::new("Metrics", config.weights.len().to_string()),
        KeyValue::new("Tiers", config.tiers.len().to_string()),
        KeyValue::new("Drift Levels", (config.drift.max_severity() + 1).to_string()),
    ]
}

fn weight_rows(config: &ScreeningConfig) -> Vec<WeightRow> {
    config
        .weights
        .as_slice()
        .iter()
        .map(|w| WeightRow {
            name: w.name.clone(),
            pillar: w.pillar.map_or_else(|| "-".to_string(), |p| p.to_string()),
            weight: format_ratio(w.weight),
        })
        .collect()
}

fn tier_rows(config: &ScreeningConfig) -> Vec<TierRow> {
    config
        .tiers
        .bands()
        .iter()
        .map(|b| TierRow {
            name: b.name.clone(),
            upper_bound: format!("{:.1}", b.upper_bound),
            description: b.description.clone().unwrap_or_default(),
        })
        .collect()
}

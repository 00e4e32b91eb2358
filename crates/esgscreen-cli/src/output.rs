//! Output formatting utilities.

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

use crate::cli::OutputFormat;

/// Formats and prints output based on the specified format.
pub fn print_output<T: Serialize + Tabled>(data: &[T], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => print_table(data),
        OutputFormat::Json => print_json(data),
        OutputFormat::Csv => print_csv(data),
        OutputFormat::Minimal => print_minimal(data),
    }
}

/// Prints a single value as pretty JSON.
pub fn print_json_value<T: Serialize + ?Sized>(data: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

/// Prints data as a formatted table.
fn print_table<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    if data.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let table = Table::new(data)
        .with(Style::rounded())
        .with(Modify::new(Columns::first()).with(Alignment::left()))
        .to_string();

    println!("{}", table);
    Ok(())
}

/// Prints data as JSON.
fn print_json<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    print_json_value(data)
}

/// Prints data as CSV.
fn print_csv<T: Serialize>(data: &[T]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for item in data {
        wtr.serialize(item)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Prints the first column of each row, one per line.
fn print_minimal<T: Tabled>(data: &[T]) -> anyhow::Result<()> {
    for item in data {
        if let Some(first) = item.fields().first() {
            println!("{}", first);
        }
    }
    Ok(())
}

/// Formats a percentile with one decimal place.
pub fn format_percentile(value: f64) -> String {
    format!("{:.1}", value)
}

/// Formats a signed percentile change.
pub fn format_delta(value: f64) -> String {
    format!("{:+.1}", value)
}

/// Formats a ratio in `[0, 1]` as a percentage.
pub fn format_ratio(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Formats a decimal ratio as a percentage.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2}%", value * Decimal::from(100))
}

/// Prints a success message.
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Prints an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Prints a warning message.
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message);
}

/// Prints an info message.
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// A key-value pair for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct KeyValue {
    #[tabled(rename = "Metric")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl KeyValue {
    /// Creates a new key-value pair.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Prints a header for a section.
pub fn print_header(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Colors a tier name by its position in the scheme.
pub fn colorize_tier(name: &str, ordinal: usize, tier_count: usize) -> String {
    if ordinal == 0 {
        name.green().to_string()
    } else if ordinal + 1 == tier_count {
        name.red().to_string()
    } else {
        name.yellow().to_string()
    }
}

/// Colors a drift alert by severity.
pub fn colorize_alert(label: &str, severity: usize, max_severity: usize) -> String {
    if severity == 0 {
        label.dimmed().to_string()
    } else if severity >= max_severity {
        label.red().bold().to_string()
    } else if severity + 1 >= max_severity {
        label.red().to_string()
    } else {
        label.yellow().to_string()
    }
}

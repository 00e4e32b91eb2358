//! Error types for the screening engine.
//!
//! Configuration errors are fatal and raised before any record is processed.
//! Record-level problems are described by [`InputIssue`] and accumulated
//! alongside successful results instead of aborting the batch.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for screening operations.
pub type ScreenResult<T> = Result<T, ScreenError>;

/// Errors that can occur in the screening engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScreenError {
    /// Malformed weights, tier thresholds or drift bands.
    #[error("Invalid configuration for {field}: {reason}")]
    Configuration {
        /// The configuration section or entry that is invalid.
        field: String,
        /// The reason the configuration is invalid.
        reason: String,
    },

    /// A required field is missing or malformed on a single record.
    #[error("Invalid input for '{symbol}': {issue}")]
    InvalidInput {
        /// The symbol of the offending record (may be blank).
        symbol: String,
        /// What is wrong with the record.
        issue: InputIssue,
    },

    /// A reporting period label could not be parsed.
    #[error("Invalid reporting period '{0}': expected YYYYQn, e.g. 2025Q4")]
    InvalidPeriod(String),
}

impl ScreenError {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(symbol: impl Into<String>, issue: InputIssue) -> Self {
        Self::InvalidInput {
            symbol: symbol.into(),
            issue,
        }
    }

    /// Returns true for errors that must stop a run before any computation.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

/// Why a record was left out of ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputIssue {
    /// The composite score is missing or was not numeric.
    MissingScore,
    /// The composite score was explicitly flagged as unscored (NaN).
    Excluded,
    /// The composite score is infinite.
    NonFiniteScore,
    /// The symbol is blank.
    MissingSymbol,
    /// The symbol appears more than once in the universe.
    DuplicateSymbol,
}

impl InputIssue {
    /// Short machine-friendly label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingScore => "missing_score",
            Self::Excluded => "excluded",
            Self::NonFiniteScore => "non_finite_score",
            Self::MissingSymbol => "missing_symbol",
            Self::DuplicateSymbol => "duplicate_symbol",
        }
    }
}

impl fmt::Display for InputIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MissingScore => "missing or non-numeric composite score",
            Self::Excluded => "explicitly excluded from scoring",
            Self::NonFiniteScore => "composite score is not finite",
            Self::MissingSymbol => "symbol is blank",
            Self::DuplicateSymbol => "symbol is not unique within the universe",
        };
        f.write_str(text)
    }
}

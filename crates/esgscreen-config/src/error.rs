//! Configuration error types.

use esgscreen_core::ScreenError;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("Failed to access {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid TOML or JSON.
    #[error("Failed to parse {format} configuration: {message}")]
    Parse {
        /// Format that was being parsed.
        format: ConfigFormat,
        /// Parser message.
        message: String,
    },

    /// Validation error.
    #[error("Validation error: {field}: {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Multiple validation errors.
    #[error("Multiple validation errors: {}", join_errors(.0))]
    MultipleValidationErrors(Vec<ValidationError>),

    /// The file extension is not a known configuration format.
    #[error("Unsupported configuration format for {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConfigError {
    /// Every individual validation failure carried by this error.
    #[must_use]
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        match self {
            Self::Validation { field, message } => {
                vec![ValidationError::new(field.clone(), message.clone())]
            }
            Self::MultipleValidationErrors(errors) => errors.clone(),
            _ => Vec::new(),
        }
    }
}

impl From<ScreenError> for ConfigError {
    fn from(err: ScreenError) -> Self {
        match err {
            ScreenError::Configuration { field, reason } => ConfigError::Validation {
                field,
                message: reason,
            },
            other => ConfigError::Validation {
                field: "input".to_string(),
                message: other.to_string(),
            },
        }
    }
}

/// Text format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML.
    Toml,
    /// JSON.
    Json,
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Toml => write!(f, "TOML"),
            Self::Json => write!(f, "JSON"),
        }
    }
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }

    /// Converts a configuration failure from the engine, tagging it with a rule.
    pub fn from_screen(err: ScreenError, rule: impl Into<String>) -> Self {
        match err {
            ScreenError::Configuration { field, reason } => Self::with_rule(field, reason, rule),
            other => Self::with_rule("input", other.to_string(), rule),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Validates the configuration.
    ///
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> ConfigResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => {
                let err = errors.remove(0);
                Err(ConfigError::Validation {
                    field: err.field,
                    message: err.message,
                })
            }
            _ => Err(ConfigError::MultipleValidationErrors(errors)),
        }
    }
}

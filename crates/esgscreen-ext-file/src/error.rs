//! File source error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for file operations.
pub type FileResult<T> = Result<T, FileError>;

/// Errors raised while reading or writing screening files.
#[derive(Debug, Error)]
pub enum FileError {
    /// The file could not be opened or created.
    #[error("Failed to access {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("Missing required column '{column}'")]
    MissingColumn {
        /// Column name.
        column: String,
    },

    /// A cell could not be parsed.
    #[error("Invalid value '{value}' in column '{column}' at line {line}")]
    InvalidValue {
        /// 1-based line number, header included.
        line: u64,
        /// Column name.
        column: String,
        /// Raw cell text.
        value: String,
    },
}

impl FileError {
    /// Create a missing column error.
    #[must_use]
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create an invalid value error.
    #[must_use]
    pub fn invalid_value(line: u64, column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            line,
            column: column.into(),
            value: value.into(),
        }
    }
}

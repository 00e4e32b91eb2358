//! Header lookup shared by the CSV readers.

use crate::error::{FileError, FileResult};
use csv::StringRecord;

/// Column positions by case-insensitive, trimmed header name.
pub(crate) struct Header {
    names: Vec<String>,
    original: Vec<String>,
}

impl Header {
    pub(crate) fn new(record: &StringRecord) -> Self {
        Self {
            names: record
                .iter()
                .map(|h| h.trim().to_ascii_lowercase())
                .collect(),
            original: record.iter().map(|h| h.trim().to_string()).collect(),
        }
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub(crate) fn require(&self, name: &str) -> FileResult<usize> {
        self.position(name)
            .ok_or_else(|| FileError::missing_column(name))
    }

    pub(crate) fn name(&self, index: usize) -> &str {
        self.names.get(index).map_or("", String::as_str)
    }

    /// Header text as written, trimmed.
    pub(crate) fn original(&self, index: usize) -> &str {
        self.original.get(index).map_or("", String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }
}

/// Trimmed cell text, `None` when absent or blank.
pub(crate) fn cell(record: &StringRecord, index: Option<usize>) -> Option<&str> {
    index
        .and_then(|i| record.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// 1-based line of a record, header included.
pub(crate) fn line_of(record: &StringRecord, row: usize) -> u64 {
    record
        .position()
        .map_or(row as u64 + 2, csv::Position::line)
}

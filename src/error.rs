//! Error types for euro_rates

use thiserror::Error;

/// Row-level failure raised while cleaning raw records
///
/// `row` is the 1-based position of the offending row in the input handed
/// to the processor, so messages point straight at the bad source line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("row {row}: invalid date label '{label}': {reason}")]
    InvalidDate {
        row: usize,
        label: String,
        reason: String,
    },

    #[error("row {row} ({label}): invalid rate '{value}'")]
    InvalidRate {
        row: usize,
        label: String,
        value: String,
    },
}

impl ParseError {
    /// 1-based row the error was raised for
    pub fn row(&self) -> usize {
        match self {
            ParseError::InvalidDate { row, .. } | ParseError::InvalidRate { row, .. } => *row,
        }
    }

    /// Time-period label of the offending row
    pub fn label(&self) -> &str {
        match self {
            ParseError::InvalidDate { label, .. } | ParseError::InvalidRate { label, .. } => label,
        }
    }
}

/// Main error type for euro_rates
#[derive(Error, Debug)]
pub enum RateError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Column '{column}' not found (available: {available:?})")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Rolling window must be greater than 0, got {0}")]
    InvalidWindow(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for euro_rates operations
pub type Result<T> = std::result::Result<T, RateError>;

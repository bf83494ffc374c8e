//! CSV loading of the euro daily reference-rate history
//!
//! The source table carries one column per currency; only the period label
//! and the US dollar column are kept. Values are passed through untouched as
//! [`RawRecord`]s; cleaning is the processor's job.

use crate::error::{RateError, Result};
use crate::types::RawRecord;
use csv::ReaderBuilder;
use std::io;
use std::path::Path;

/// Header of the period label column in the source file
pub const DEFAULT_DATE_COLUMN: &str = "Period\\Unit:";

/// Header of the US dollar column in the source file
pub const DEFAULT_RATE_COLUMN: &str = "[US dollar ]";

/// Column selection for the source table
#[derive(Debug, Clone)]
pub struct CsvRateLoader {
    /// Time-period label column name
    pub date_column: String,
    /// Price column name
    pub rate_column: String,
    /// Field delimiter
    pub delimiter: u8,
}

impl CsvRateLoader {
    /// Loader for the default source layout
    pub fn new() -> Self {
        Self {
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            rate_column: DEFAULT_RATE_COLUMN.to_string(),
            delimiter: b',',
        }
    }

    /// Loader selecting custom columns
    pub fn with_columns(date_column: impl Into<String>, rate_column: impl Into<String>) -> Self {
        Self {
            date_column: date_column.into(),
            rate_column: rate_column.into(),
            ..Self::new()
        }
    }

    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Load rows from a file on disk
    pub fn load_path(&self, path: &Path) -> Result<Vec<RawRecord>> {
        log::debug!("Loading rates from {}", path.display());
        let rdr = self.builder().from_path(path)?;
        self.read(rdr)
    }

    /// Load rows from any reader (file, buffer, stdin)
    pub fn load_reader<R: io::Read>(&self, reader: R) -> Result<Vec<RawRecord>> {
        self.read(self.builder().from_reader(reader))
    }

    fn builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(true);
        builder
    }

    fn read<R: io::Read>(&self, mut rdr: csv::Reader<R>) -> Result<Vec<RawRecord>> {
        let headers = rdr.headers()?.clone();

        let date_idx = Self::find_column(&headers, &self.date_column)?;
        let rate_idx = Self::find_column(&headers, &self.rate_column)?;

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            // Ragged rows surface as empty cells and are rejected downstream
            let label = record.get(date_idx).unwrap_or_default();
            let price = record.get(rate_idx).unwrap_or_default();
            rows.push(RawRecord::new(label, price));
        }

        log::debug!("Read {} rows", rows.len());
        Ok(rows)
    }

    /// Find column index by name, ignoring surrounding whitespace
    fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
        let wanted = name.trim();
        headers
            .iter()
            .position(|h| h.trim() == wanted)
            .ok_or_else(|| RateError::MissingColumn {
                column: name.to_string(),
                available: headers.iter().map(str::to_string).collect(),
            })
    }
}

impl Default for CsvRateLoader {
    fn default() -> Self {
        Self::new()
    }
}

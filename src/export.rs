//! Hand-off of processed series to external charting tools

use crate::error::{RateError, Result};
use crate::types::{RateRecord, DATE_FORMAT};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

/// Output encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Infer from a file extension (`.csv` / `.json`)
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Ok(ExportFormat::Csv),
            Some("json") => Ok(ExportFormat::Json),
            other => Err(RateError::Config(format!(
                "Unsupported output format: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }
}

/// Write `date,rate,rolling_mean`; undefined means become empty cells
pub fn write_csv<W: io::Write>(series: &[RateRecord], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["date", "rate", "rolling_mean"])?;

    for record in series {
        let rolling_mean = record
            .rolling_mean
            .map(|m| m.to_string())
            .unwrap_or_default();
        wtr.write_record([
            record.timestamp.format(DATE_FORMAT).to_string(),
            record.rate.to_string(),
            rolling_mean,
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the series as a JSON array of records
pub fn write_json<W: io::Write>(series: &[RateRecord], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, series)?;
    Ok(())
}

/// Write to a file, choosing the format from its extension
pub fn write_file(series: &[RateRecord], path: &Path) -> Result<()> {
    let format = ExportFormat::from_path(path)?;
    let writer = BufWriter::new(File::create(path)?);

    match format {
        ExportFormat::Csv => write_csv(series, writer)?,
        ExportFormat::Json => write_json(series, writer)?,
    }

    log::info!("Wrote {} records to {}", series.len(), path.display());
    Ok(())
}

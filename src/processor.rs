//! Rate series processing: clean, order, smooth and slice
//!
//! Turns raw `(label, price)` rows into a chronologically ordered series of
//! [`RateRecord`]s, annotates it with a trailing rolling mean and hands out
//! year-bounded views for downstream consumers.
//!
//! # Example
//!
//! ```rust
//! use euro_rates::prelude::*;
//!
//! let rows = vec![
//!     RawRecord::new("1999-01-06", "1.1790"),
//!     RawRecord::new("1999-01-05", "-"),
//!     RawRecord::new("1999-01-04", "1.1789"),
//! ];
//!
//! let processor = RateSeriesProcessor::new();
//! let series = processor.parse(&rows).unwrap();
//! assert_eq!(series.len(), 2);
//! assert!(series[0].timestamp < series[1].timestamp);
//!
//! let series = RateSeriesProcessor::with_rolling_mean(series, 2).unwrap();
//! assert!(series[1].rolling_mean.is_some());
//! ```

use crate::error::{ParseError, RateError, Result};
use crate::periods::YearRange;
use crate::types::{RateRecord, RawRecord, DATE_FORMAT};
use chrono::{NaiveDate, NaiveDateTime};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What `parse` does with a row it cannot interpret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Fail the whole call on the first bad row
    #[default]
    Strict,
    /// Drop the bad row, log it and record it in the report
    Lenient,
}

/// Outcome of a parse run
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    /// Cleaned records, sorted ascending by date
    pub records: Vec<RateRecord>,
    /// Rows dropped because their price was the sentinel
    pub missing: usize,
    /// Rows skipped in lenient mode
    pub rejected: Vec<ParseError>,
}

/// Converts raw rows into a clean, ordered, smoothed series
#[derive(Debug, Clone, Copy, Default)]
pub struct RateSeriesProcessor {
    mode: ParseMode,
}

impl RateSeriesProcessor {
    /// Strict processor
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: ParseMode) -> Self {
        Self { mode }
    }

    pub fn lenient() -> Self {
        Self::with_mode(ParseMode::Lenient)
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Parse raw rows into a date-sorted series
    ///
    /// Sentinel rows are dropped. Rows whose date or price cannot be read
    /// fail the call in strict mode and are skipped in lenient mode.
    pub fn parse(&self, rows: &[RawRecord]) -> Result<Vec<RateRecord>> {
        self.parse_with_report(rows).map(|report| report.records)
    }

    /// Like [`parse`](Self::parse), also reporting dropped and rejected rows
    pub fn parse_with_report(&self, rows: &[RawRecord]) -> Result<ParseReport> {
        let mut report = ParseReport {
            records: Vec::with_capacity(rows.len()),
            ..ParseReport::default()
        };

        for (idx, raw) in rows.iter().enumerate() {
            match parse_row(idx + 1, raw) {
                Ok(Some(record)) => report.records.push(record),
                Ok(None) => report.missing += 1,
                Err(e) => match self.mode {
                    ParseMode::Strict => return Err(RateError::Parse(e)),
                    ParseMode::Lenient => {
                        log::warn!("Skipping row: {}", e);
                        report.rejected.push(e);
                    }
                },
            }
        }

        // Stable: rows sharing a date keep their input order
        report.records.sort_by_key(|r| r.timestamp);

        log::debug!(
            "Parsed {} rows: {} records, {} missing, {} rejected",
            rows.len(),
            report.records.len(),
            report.missing,
            report.rejected.len()
        );

        Ok(report)
    }

    /// Annotate each record with the mean rate of the trailing `window` records
    ///
    /// The series must already be sorted; it is not re-sorted here. Any
    /// existing annotation is overwritten.
    pub fn with_rolling_mean(
        mut series: Vec<RateRecord>,
        window: usize,
    ) -> Result<Vec<RateRecord>> {
        if window == 0 {
            return Err(RateError::InvalidWindow(window));
        }

        let means = trailing_means(&series, window);
        for record in series.iter_mut().take(window - 1) {
            record.rolling_mean = None;
        }
        for (record, mean) in series.iter_mut().skip(window - 1).zip(means) {
            record.rolling_mean = Some(mean);
        }

        Ok(series)
    }

    /// Records whose year lies in `[start_year, end_year]`
    ///
    /// Returns an empty series when nothing matches or `start_year > end_year`.
    pub fn select_range(series: &[RateRecord], start_year: i32, end_year: i32) -> Vec<RateRecord> {
        Self::select(series, YearRange::new(start_year, end_year))
    }

    /// Records from `start_year` onward
    pub fn select_since(series: &[RateRecord], start_year: i32) -> Vec<RateRecord> {
        Self::select(series, YearRange::since(start_year))
    }

    /// Records inside a [`YearRange`]
    pub fn select(series: &[RateRecord], range: YearRange) -> Vec<RateRecord> {
        if range.is_empty() {
            log::debug!("Empty year range {}", range);
            return Vec::new();
        }

        series
            .iter()
            .filter(|r| range.contains_record(r))
            .cloned()
            .collect()
    }

    /// Parse, then smooth with `window`
    pub fn process(&self, rows: &[RawRecord], window: usize) -> Result<Vec<RateRecord>> {
        let series = self.parse(rows)?;
        Self::with_rolling_mean(series, window)
    }
}

/// Mean rate of every full window, one per record from index `window - 1` on
///
/// Each window is summed on its own, so a record's mean depends only on
/// the rates it covers.
fn trailing_means(series: &[RateRecord], window: usize) -> Vec<f64> {
    series
        .windows(window)
        .map(|w| w.iter().map(|r| r.rate).sum::<f64>() / window as f64)
        .collect()
}

/// Interpret one raw row; `Ok(None)` means a sentinel (missing) price
fn parse_row(row: usize, raw: &RawRecord) -> std::result::Result<Option<RateRecord>, ParseError> {
    let label = raw.label.trim();
    let timestamp = parse_date(label).map_err(|reason| ParseError::InvalidDate {
        row,
        label: label.to_string(),
        reason,
    })?;

    if raw.is_missing() {
        return Ok(None);
    }

    let price = raw.price.trim();
    let rate = parse_rate(price).ok_or_else(|| ParseError::InvalidRate {
        row,
        label: label.to_string(),
        value: price.to_string(),
    })?;

    Ok(Some(RateRecord::new(timestamp, rate)))
}

fn parse_date(label: &str) -> std::result::Result<NaiveDate, String> {
    match NaiveDate::parse_from_str(label, DATE_FORMAT) {
        Ok(date) => Ok(date),
        Err(e) => NaiveDateTime::parse_from_str(label, DATETIME_FORMAT)
            .map(|dt| dt.date())
            .map_err(|_| e.to_string()),
    }
}

/// Finite, nonnegative decimal
fn parse_rate(value: &str) -> Option<f64> {
    value
        .parse::<f64>()
        .ok()
        .filter(|rate| rate.is_finite() && *rate >= 0.0)
}

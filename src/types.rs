//! Core record types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder the source uses for "no observation for this period"
pub const SENTINEL: &str = "-";

/// Trailing window used for the smoothed trend line
pub const DEFAULT_WINDOW: usize = 30;

/// Date layout of the time-period labels
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One row as read from the source table, before any cleaning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Time-period label, e.g. "1999-01-04"
    pub label: String,
    /// Price string; may be the sentinel
    pub price: String,
}

impl RawRecord {
    pub fn new(label: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            price: price.into(),
        }
    }

    /// Whether the price field is the missing-data marker
    pub fn is_missing(&self) -> bool {
        self.price.trim() == SENTINEL
    }
}

/// A cleaned, dated EUR/USD observation
///
/// `rate` is the value of one Euro in US Dollars. `rolling_mean` is derived
/// from the surrounding series and is `None` until a full window of history
/// is available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    pub timestamp: NaiveDate,
    pub rate: f64,
    pub rolling_mean: Option<f64>,
}

impl RateRecord {
    /// Create an observation with no rolling mean yet
    pub fn new(timestamp: NaiveDate, rate: f64) -> Self {
        Self {
            timestamp,
            rate,
            rolling_mean: None,
        }
    }
}

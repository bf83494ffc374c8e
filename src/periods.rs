//! Year-bounded analysis periods

use crate::types::RateRecord;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Inclusive range of calendar years; `end = None` is open-ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub start: i32,
    #[serde(default)]
    pub end: Option<i32>,
}

impl YearRange {
    /// Closed range `[start, end]`
    pub fn new(start: i32, end: i32) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Range from `start` onward
    pub fn since(start: i32) -> Self {
        Self { start, end: None }
    }

    /// Whether a year lies inside the range
    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && self.end.map_or(true, |end| year <= end)
    }

    /// Whether a record's timestamp falls inside the range
    pub fn contains_record(&self, record: &RateRecord) -> bool {
        self.contains(record.timestamp.year())
    }

    /// A closed range whose end precedes its start selects nothing
    pub fn is_empty(&self) -> bool {
        matches!(self.end, Some(end) if end < self.start)
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}-{}", self.start, end),
            None => write!(f, "{}-", self.start),
        }
    }
}

/// 2008 financial crisis window
pub const RECESSION: YearRange = YearRange {
    start: 2006,
    end: Some(2009),
};

/// COVID-19 stimulus window
pub const PANDEMIC: YearRange = YearRange {
    start: 2020,
    end: Some(2021),
};

/// Recent history leading into and out of the pandemic
pub const RECENT: YearRange = YearRange {
    start: 2016,
    end: None,
};

/// Built-in named periods
pub fn default_periods() -> BTreeMap<String, YearRange> {
    let mut periods = BTreeMap::new();
    periods.insert("recession".to_string(), RECESSION);
    periods.insert("pandemic".to_string(), PANDEMIC);
    periods.insert("recent".to_string(), RECENT);
    periods
}

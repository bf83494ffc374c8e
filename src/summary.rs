//! Descriptive statistics for raw and processed series

use crate::periods::YearRange;
use crate::processor::RateSeriesProcessor;
use crate::types::{RateRecord, RawRecord};
use chrono::NaiveDate;
use hashbrown::HashMap;
use serde::Serialize;
use statrs::statistics::Statistics;

/// Frequency of each distinct price string, most frequent first
///
/// Ties are ordered by value so output is deterministic. Useful to spot
/// placeholder values before cleaning.
pub fn value_counts(rows: &[RawRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in rows {
        *counts.entry(row.price.trim()).or_insert(0) += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, n)| (value.to_string(), n))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Summary statistics of a processed series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub count: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub std_dev: Option<f64>,
    /// Most recent defined rolling mean
    pub last_rolling_mean: Option<f64>,
}

impl SeriesSummary {
    /// Summarize a date-sorted series; `None` when empty
    pub fn from_series(series: &[RateRecord]) -> Option<Self> {
        let first = series.first()?;
        let last = series.last()?;
        let rates: Vec<f64> = series.iter().map(|r| r.rate).collect();

        let std_dev = if rates.len() > 1 {
            Some(Statistics::std_dev(&rates))
        } else {
            None
        };

        Some(Self {
            count: rates.len(),
            start: first.timestamp,
            end: last.timestamp,
            min: Statistics::min(&rates),
            max: Statistics::max(&rates),
            mean: Statistics::mean(&rates),
            std_dev,
            last_rolling_mean: series.iter().rev().find_map(|r| r.rolling_mean),
        })
    }
}

/// A named period and the summary of its slice of the series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub name: String,
    pub range: YearRange,
    pub summary: Option<SeriesSummary>,
}

impl PeriodSummary {
    pub fn compute(name: impl Into<String>, range: YearRange, series: &[RateRecord]) -> Self {
        let slice = RateSeriesProcessor::select(series, range);
        Self {
            name: name.into(),
            range,
            summary: SeriesSummary::from_series(&slice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::periods::RECESSION;
    use approx::assert_relative_eq;

    fn record(y: i32, m: u32, d: u32, rate: f64) -> RateRecord {
        RateRecord::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), rate)
    }

    #[test]
    fn test_value_counts() {
        let rows = vec![
            RawRecord::new("1999-01-04", "1.1789"),
            RawRecord::new("1999-01-05", "-"),
            RawRecord::new("1999-01-06", "-"),
            RawRecord::new("1999-01-07", "1.1790"),
            RawRecord::new("1999-01-08", "1.1789"),
            RawRecord::new("1999-01-11", "-"),
        ];

        let counts = value_counts(&rows);
        assert_eq!(
            counts,
            vec![
                ("-".to_string(), 3),
                ("1.1789".to_string(), 2),
                ("1.1790".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_summary() {
        let mut series = vec![
            record(2008, 7, 14, 1.5),
            record(2008, 7, 15, 1.6),
            record(2008, 7, 16, 1.4),
        ];
        series[1].rolling_mean = Some(1.55);

        let summary = SeriesSummary::from_series(&series).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(summary.start, NaiveDate::from_ymd_opt(2008, 7, 14).unwrap());
        assert_eq!(summary.end, NaiveDate::from_ymd_opt(2008, 7, 16).unwrap());
        assert_relative_eq!(summary.min, 1.4);
        assert_relative_eq!(summary.max, 1.6);
        assert_relative_eq!(summary.mean, 1.5, epsilon = 1e-12);
        assert_relative_eq!(summary.std_dev.unwrap(), 0.1, epsilon = 1e-12);
        assert_eq!(summary.last_rolling_mean, Some(1.55));
    }

    #[test]
    fn test_summary_empty_and_single() {
        assert!(SeriesSummary::from_series(&[]).is_none());

        let summary = SeriesSummary::from_series(&[record(1999, 1, 4, 1.1789)]).unwrap();
        assert_eq!(summary.std_dev, None);
        assert_eq!(summary.last_rolling_mean, None);
    }

    #[test]
    fn test_period_summary() {
        let series = vec![
            record(2005, 6, 1, 1.2),
            record(2007, 6, 1, 1.35),
            record(2008, 6, 1, 1.55),
            record(2012, 6, 1, 1.25),
        ];

        let period = PeriodSummary::compute("recession", RECESSION, &series);
        let summary = period.summary.unwrap();
        assert_eq!(summary.count, 2);
        assert_relative_eq!(summary.max, 1.55);

        let empty = PeriodSummary::compute("future", YearRange::since(2030), &series);
        assert!(empty.summary.is_none());
    }
}

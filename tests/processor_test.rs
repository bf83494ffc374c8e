//! Integration tests for the rate series processor
//!
//! Covers the end-to-end cleaning scenarios on realistic EUR/USD rows.

use chrono::{Datelike, Duration, NaiveDate};
use euro_rates::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One observation every 7 days from 1999-01-04 through the end of 2022
fn weekly_series() -> Vec<RateRecord> {
    let mut series = Vec::new();
    let mut day = date(1999, 1, 4);
    let end = date(2022, 12, 31);
    while day <= end {
        series.push(RateRecord::new(day, 1.0 + (day.year() - 1999) as f64 * 0.01));
        day += Duration::days(7);
    }
    series
}

#[test]
fn test_sentinel_row_dropped() {
    let rows = vec![
        RawRecord::new("1999-01-04", "1.1789"),
        RawRecord::new("1999-01-05", "-"),
        RawRecord::new("1999-01-06", "1.1790"),
    ];

    let series = RateSeriesProcessor::new().parse(&rows).unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series[0].timestamp, date(1999, 1, 4));
    assert_eq!(series[1].timestamp, date(1999, 1, 6));
    assert!((series[0].rate - 1.1789).abs() < 1e-12);
    assert!((series[1].rate - 1.1790).abs() < 1e-12);
}

#[test]
fn test_rolling_mean_three_values() {
    let series = vec![
        RateRecord::new(date(1999, 1, 4), 1.0),
        RateRecord::new(date(1999, 1, 5), 2.0),
        RateRecord::new(date(1999, 1, 6), 3.0),
    ];

    let series = RateSeriesProcessor::with_rolling_mean(series, 3).unwrap();
    let means: Vec<_> = series.iter().map(|r| r.rolling_mean).collect();

    assert_eq!(means, vec![None, None, Some(2.0)]);
}

#[test]
fn test_select_recession_years() {
    let series = weekly_series();
    let recession = RateSeriesProcessor::select_range(&series, 2006, 2009);

    assert!(!recession.is_empty());
    assert!(recession
        .iter()
        .all(|r| (2006..=2009).contains(&r.timestamp.year())));

    let years: std::collections::BTreeSet<_> =
        recession.iter().map(|r| r.timestamp.year()).collect();
    assert_eq!(years.into_iter().collect::<Vec<_>>(), vec![2006, 2007, 2008, 2009]);

    // Contiguous, ordered slice of the base series
    assert!(recession.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
}

#[test]
fn test_non_sentinel_placeholder_is_error() {
    let rows = vec![RawRecord::new("1999-01-05", "N/A")];

    let err = RateSeriesProcessor::new().parse(&rows).unwrap_err();

    assert!(matches!(err, RateError::Parse(ParseError::InvalidRate { .. })));
    let msg = err.to_string();
    assert!(msg.contains("row 1"));
    assert!(msg.contains("1999-01-05"));
    assert!(msg.contains("N/A"));
}

#[test]
fn test_strict_and_lenient_policies() {
    let rows = vec![
        RawRecord::new("2020-03-09", "1.1456"),
        RawRecord::new("2020-03-10", "n.a."),
        RawRecord::new("2020-03-11", "1.1336"),
    ];

    assert!(RateSeriesProcessor::with_mode(ParseMode::Strict)
        .parse(&rows)
        .is_err());

    let report = RateSeriesProcessor::with_mode(ParseMode::Lenient)
        .parse_with_report(&rows)
        .unwrap();
    assert_eq!(report.records.len(), 2);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].row(), 2);
}

#[test]
fn test_full_pipeline_with_default_window() {
    let series = weekly_series();
    let n = series.len();

    let smoothed = RateSeriesProcessor::with_rolling_mean(series, DEFAULT_WINDOW).unwrap();

    assert_eq!(smoothed.len(), n);
    assert!(smoothed[..DEFAULT_WINDOW - 1]
        .iter()
        .all(|r| r.rolling_mean.is_none()));
    assert!(smoothed[DEFAULT_WINDOW - 1..]
        .iter()
        .all(|r| r.rolling_mean.is_some()));

    let pandemic = RateSeriesProcessor::select(&smoothed, YearRange::new(2020, 2021));
    let recent = RateSeriesProcessor::select_since(&smoothed, 2016);
    assert!(pandemic.len() < recent.len());
    assert!(pandemic.iter().all(|r| recent.contains(r)));
}

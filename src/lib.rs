//! # euro_rates
//!
//! Cleaning and smoothing of the historical Euro/US Dollar reference rate
//! series (1999 onward).
//!
//! The pipeline reads the raw daily table, drops the `-` placeholder rows,
//! orders the observations by date, annotates them with a 30-day trailing
//! mean and hands out year-bounded views (e.g. the 2006-2009 recession) to
//! whatever renders the charts.
//!
//! ## Example
//!
//! ```rust,no_run
//! use euro_rates::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> euro_rates::error::Result<()> {
//!     let rows = CsvRateLoader::new().load_path(Path::new("euro-daily-hist_1999_2022.csv"))?;
//!     let series = RateSeriesProcessor::new().process(&rows, DEFAULT_WINDOW)?;
//!     let recession = RateSeriesProcessor::select_range(&series, 2006, 2009);
//!     println!("{} observations during the recession", recession.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod periods;
pub mod processor;
pub mod summary;
pub mod types;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::config::AnalysisConfig;
    pub use crate::error::{ParseError, RateError, Result};
    pub use crate::loader::CsvRateLoader;
    pub use crate::periods::YearRange;
    pub use crate::processor::{ParseMode, ParseReport, RateSeriesProcessor};
    pub use crate::summary::{value_counts, PeriodSummary, SeriesSummary};
    pub use crate::types::{RateRecord, RawRecord, DEFAULT_WINDOW, SENTINEL};
}

//! Analysis configuration loaded from TOML
//!
//! ```toml
//! data_path = "data/euro-daily-hist_1999_2022.csv"
//! window = 30
//! strict = true
//!
//! [periods.recession]
//! start = 2006
//! end = 2009
//!
//! [periods.recent]
//! start = 2016
//! ```

use crate::error::{RateError, Result};
use crate::loader::{CsvRateLoader, DEFAULT_DATE_COLUMN, DEFAULT_RATE_COLUMN};
use crate::periods::{default_periods, YearRange};
use crate::processor::{ParseMode, RateSeriesProcessor};
use crate::types::DEFAULT_WINDOW;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub data_path: Option<PathBuf>,
    #[serde(default = "default_date_column")]
    pub date_column: String,
    #[serde(default = "default_rate_column")]
    pub rate_column: String,
    #[serde(default = "default_window")]
    pub window: usize,
    #[serde(default = "default_strict")]
    pub strict: bool,
    #[serde(default = "default_periods")]
    pub periods: BTreeMap<String, YearRange>,
}

fn default_date_column() -> String {
    DEFAULT_DATE_COLUMN.to_string()
}

fn default_rate_column() -> String {
    DEFAULT_RATE_COLUMN.to_string()
}

fn default_window() -> usize {
    DEFAULT_WINDOW
}

fn default_strict() -> bool {
    true
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_path: None,
            date_column: default_date_column(),
            rate_column: default_rate_column(),
            window: default_window(),
            strict: default_strict(),
            periods: default_periods(),
        }
    }
}

impl AnalysisConfig {
    /// Default config file location (`~/.euro-rates/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".euro-rates").join("config.toml"))
    }

    /// Load configuration
    ///
    /// An explicit path must exist and parse. Without one, the default
    /// location is tried and built-in defaults are used if it is absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(default_path) if default_path.exists() => Self::from_file(&default_path)?,
                _ => Self::default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            RateError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| RateError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(RateError::InvalidWindow(self.window));
        }
        Ok(())
    }

    pub fn parse_mode(&self) -> ParseMode {
        if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }

    pub fn processor(&self) -> RateSeriesProcessor {
        RateSeriesProcessor::with_mode(self.parse_mode())
    }

    pub fn loader(&self) -> CsvRateLoader {
        CsvRateLoader::with_columns(self.date_column.clone(), self.rate_column.clone())
    }
}

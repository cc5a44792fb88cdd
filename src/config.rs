//! Run configuration assembled from the command line at startup.

use std::{path::PathBuf, time::Duration};

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;

use crate::{error::ConfigurationError, export::ModelFormat};

pub const DEFAULT_START_YEAR: i32 = 2006;
pub const DEFAULT_END_YEAR: i32 = 2025;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_OUTPUT_DIR: &str = "panchganga-rainfall";

/// Inclusive calendar range, always whole years.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn from_years(start_year: i32, end_year: i32) -> Result<Self, ConfigurationError> {
        let invalid = ConfigurationError::InvalidPeriod {
            start_year,
            end_year,
        };
        if start_year > end_year {
            return Err(invalid);
        }

        match (
            NaiveDate::from_ymd_opt(start_year, 1, 1),
            NaiveDate::from_ymd_opt(end_year, 12, 31),
        ) {
            (Some(start), Some(end)) => Ok(Period { start, end }),
            _ => Err(invalid),
        }
    }

    pub fn start_year(&self) -> i32 {
        self.start.year()
    }

    pub fn end_year(&self) -> i32 {
        self.end.year()
    }

    /// Number of calendar days in the period, both ends included.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::from_years(DEFAULT_START_YEAR, DEFAULT_END_YEAR)
            .expect("default years form a valid period")
    }
}

/// Optional processing libraries the host claims to provide.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Capabilities {
    pub hdf5: bool,
    pub netcdf: bool,
}

/// What to do when one location reports the same date twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, ValueEnum)]
pub enum DuplicatePolicy {
    /// Pass duplicates through in fetch order
    #[default]
    KeepAll,
    /// Keep the last observation fetched for a date
    KeepLast,
    /// Fail on the first duplicate
    Reject,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub period: Period,
    pub output_dir: PathBuf,
    pub models: Vec<String>,
    pub duplicates: DuplicatePolicy,
    pub timeout: Duration,
    pub concurrent: bool,
    pub parquet: bool,
    pub capabilities: Capabilities,
}

impl Config {
    /// Checks everything that can be checked before the network is touched.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.period.start > self.period.end {
            return Err(ConfigurationError::InvalidPeriod {
                start_year: self.period.start_year(),
                end_year: self.period.end_year(),
            });
        }
        for model in &self.models {
            model.parse::<ModelFormat>()?;
        }

        Ok(())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.output_dir.join("rainfall_data")
    }

    pub fn model_dir(&self) -> PathBuf {
        self.output_dir.join("model_ready_data")
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            period: Period::default(),
            output_dir: default_output_dir(),
            models: vec!["hec-hms".to_string()],
            duplicates: DuplicatePolicy::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrent: false,
            parquet: false,
            capabilities: Capabilities::default(),
        }
    }
}

pub fn default_output_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_OUTPUT_DIR)
}

// -- Tests -------------------------------------------------------------------

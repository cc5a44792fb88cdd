//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{command, Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::{
        default_output_dir, Capabilities, Config, DuplicatePolicy, Period, DEFAULT_END_YEAR,
        DEFAULT_START_YEAR, DEFAULT_TIMEOUT_SECS,
    },
    error::ConfigurationError,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    /// Declare HDF5 processing available on this host
    #[arg(long, global = true)]
    pub hdf5: bool,

    /// Declare NetCDF processing available on this host
    #[arg(long, global = true)]
    pub netcdf: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            hdf5: self.hdf5,
            netcdf: self.netcdf,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show locations, basin extent and data availability
    Info {},
    /// Write the Earth Engine and plotting scripts
    Scripts {
        /// Output directory [default: ~/panchganga-rainfall]
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Fetch daily rainfall from NASA POWER and export it
    Fetch(FetchArgs),
    /// Recompute statistics from a combined CSV written by `fetch`
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// First year to fetch
    #[arg(long, default_value_t = DEFAULT_START_YEAR)]
    pub start_year: i32,

    /// Last year to fetch
    #[arg(long, default_value_t = DEFAULT_END_YEAR)]
    pub end_year: i32,

    /// Output directory [default: ~/panchganga-rainfall]
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Model export format, may repeat (hec-hms, swat)
    #[arg(long = "model", default_value = "hec-hms")]
    pub models: Vec<String>,

    /// Handling of repeated dates within one location
    #[arg(long, value_enum, default_value_t = DuplicatePolicy::KeepAll)]
    pub duplicates: DuplicatePolicy,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Fetch all locations in parallel
    #[arg(long)]
    pub concurrent: bool,

    /// Also write the combined series as parquet
    #[arg(long)]
    pub parquet: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Combined CSV to read
    #[arg(long)]
    pub input: PathBuf,

    /// First year of the period the file covers
    #[arg(long, default_value_t = DEFAULT_START_YEAR)]
    pub start_year: i32,

    /// Last year of the period the file covers
    #[arg(long, default_value_t = DEFAULT_END_YEAR)]
    pub end_year: i32,
}

impl FetchArgs {
    pub fn to_config(&self, capabilities: Capabilities) -> Result<Config, ConfigurationError> {
        let config = Config {
            period: Period::from_years(self.start_year, self.end_year)?,
            output_dir: self.output_dir.clone().unwrap_or_else(default_output_dir),
            models: self.models.clone(),
            duplicates: self.duplicates,
            timeout: Duration::from_secs(self.timeout_secs),
            concurrent: self.concurrent,
            parquet: self.parquet,
            capabilities,
        };
        config.validate()?;

        Ok(config)
    }
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    ProgressBar::new(size).with_message(message).with_style(
        ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    )
}

// -- Tests -------------------------------------------------------------------

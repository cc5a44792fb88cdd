//! Progress reporting for the fetch and export pipeline.
//!
//! Data code never prints. It tells a `Reporter` what happened and the
//! reporter decides how that reaches the terminal.

use std::path::Path;

use indicatif::ProgressBar;
use log::{info, warn};

use crate::error::TransportError;

pub trait Reporter {
    fn on_fetch_started(&self, _location: &str) {}
    fn on_location_fetched(&self, location: &str, count: usize);
    fn on_location_failed(&self, location: &str, error: &TransportError);
    fn on_file_written(&self, _path: &Path) {}
}

/// Drives a progress bar over the locations and forwards events to `log`.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new(bar: ProgressBar) -> Self {
        ProgressReporter { bar }
    }

    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

impl Reporter for ProgressReporter {
    fn on_fetch_started(&self, location: &str) {
        self.bar.set_message(format!("Fetching {}", location));
    }

    fn on_location_fetched(&self, location: &str, count: usize) {
        info!("Fetched {} days for {}", count, location);
        self.bar.inc(1);
    }

    fn on_location_failed(&self, location: &str, error: &TransportError) {
        match std::error::Error::source(error) {
            Some(source) => warn!("Skipping {}: {} ({})", location, error, source),
            None => warn!("Skipping {}: {}", location, error),
        }
        self.bar.inc(1);
    }

    fn on_file_written(&self, path: &Path) {
        info!("Exported {}", path.display());
    }
}

/// Sends everything to `log` only.
pub struct LogReporter;

impl Reporter for LogReporter {
    fn on_location_fetched(&self, location: &str, count: usize) {
        info!("Fetched {} days for {}", count, location);
    }

    fn on_location_failed(&self, location: &str, error: &TransportError) {
        warn!("Skipping {}: {}", location, error);
    }

    fn on_file_written(&self, path: &Path) {
        info!("Exported {}", path.display());
    }
}


// -- Tests -------------------------------------------------------------------

//! Error types shared across the crate.
//!
//! Configuration mistakes are fatal to the call that made them. Transport
//! errors are scoped to a single location and the fetch loop moves on.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("Location '{0}' not found")]
    UnknownLocation(String),

    #[error("Unsupported model format '{0}' (expected one of: hec-hms, swat)")]
    UnknownModelFormat(String),

    #[error("Start year {start_year} is after end year {end_year}")]
    InvalidPeriod { start_year: i32, end_year: i32 },
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Request failed for {location}")]
    Request {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {location}")]
    Status {
        location: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed response for {location}: {reason}")]
    Malformed { location: String, reason: String },
}

/// Raised when the `reject` duplicate policy meets a repeated date.
#[derive(Debug, Error, PartialEq)]
#[error("Duplicate observation for {location} on {date}")]
pub struct DuplicateDateError {
    pub location: String,
    pub date: NaiveDate,
}

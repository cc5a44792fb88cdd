use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Value the API reports for a day without data.
pub const MISSING_SENTINEL: f64 = -999.0;

/// Date format of the API's per-day keys.
pub const API_DATE_FORMAT: &str = "%Y%m%d";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub location: String,
    pub rainfall_mm: f64,
}

impl DailyObservation {
    pub fn new(date: NaiveDate, location: &str, rainfall_mm: f64) -> Self {
        DailyObservation {
            date,
            location: location.to_string(),
            rainfall_mm,
        }
    }

    /// Builds an observation from one `YYYYMMDD -> value` entry of an API
    /// response. Sentinel values yield `None`; they are never coerced to zero.
    pub fn from_entry(
        location: &str,
        date_key: &str,
        value: f64,
    ) -> Result<Option<Self>, chrono::ParseError> {
        let date = NaiveDate::parse_from_str(date_key, API_DATE_FORMAT)?;
        if value == MISSING_SENTINEL {
            return Ok(None);
        }

        Ok(Some(DailyObservation::new(date, location, value)))
    }
}

// -- Tests ----------------------------------------------------------------------------

//! Comma-separated exports: one file per location, the combined series and
//! the statistics table.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    aggregate::{SeriesByLocation, StatisticsRecord},
    config::Period,
    reading::DailyObservation,
    registry::{lookup, Location},
    report::Reporter,
};

use super::{combined_file_name, per_location_file_name, statistics_file_name};

#[derive(Debug, Serialize, Deserialize)]
struct SeriesRow {
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Rainfall_mm")]
    rainfall_mm: f64,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
}

impl SeriesRow {
    fn new(location: &Location, observation: &DailyObservation) -> Self {
        SeriesRow {
            date: observation.date,
            location: location.name.to_string(),
            rainfall_mm: observation.rainfall_mm,
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

/// Writes `<Location>_rainfall_<start>_<end>.csv` for every location plus
/// the combined file, returning the paths written.
pub fn export_per_location(
    series: &SeriesByLocation,
    output_dir: &Path,
    period: &Period,
    reporter: &dyn Reporter,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let mut written = Vec::new();

    for location_series in series.iter() {
        let path = output_dir.join(per_location_file_name(location_series.location.name, period));
        let mut writer = csv::Writer::from_path(&path)?;
        for observation in &location_series.observations {
            writer.serialize(SeriesRow::new(location_series.location, observation))?;
        }
        writer.flush()?;

        reporter.on_file_written(&path);
        written.push(path);
    }

    let path = output_dir.join(combined_file_name(period, "csv"));
    let mut writer = csv::Writer::from_path(&path)?;
    for (location, observation) in series.observations() {
        writer.serialize(SeriesRow::new(location, observation))?;
    }
    writer.flush()?;

    reporter.on_file_written(&path);
    written.push(path);

    Ok(written)
}

/// Writes `<label>_Statistics.csv` with one row per record.
pub fn export_statistics(
    stats: &[StatisticsRecord],
    output_dir: &Path,
    label: &str,
    reporter: &dyn Reporter,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let path = output_dir.join(statistics_file_name(label));
    let mut writer = csv::Writer::from_path(&path)?;
    for record in stats {
        writer.serialize(record)?;
    }
    writer.flush()?;

    reporter.on_file_written(&path);
    Ok(path)
}

/// Reads a series file written by `export_per_location` back into observations.
/// Rows naming a location outside the registry are a `ConfigurationError`.
pub fn read_combined(path: &Path) -> Result<Vec<DailyObservation>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut observations = Vec::new();
    for row in reader.deserialize() {
        let row: SeriesRow = row?;
        let location = lookup(&row.location)?;
        observations.push(DailyObservation::new(row.date, location.name, row.rainfall_mm));
    }

    Ok(observations)
}

// -- Tests -------------------------------------------------------------------

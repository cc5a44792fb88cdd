//! Groups observations by location and derives per-location statistics.

use std::collections::BTreeMap;

use chrono::Datelike;
use serde::Serialize;

use crate::{
    config::{DuplicatePolicy, Period},
    error::DuplicateDateError,
    reading::DailyObservation,
    registry::{all_locations, Location},
};

/// Calendar months counted as the wet season.
pub const MONSOON_MONTHS: [u32; 4] = [6, 7, 8, 9];
pub const HEAVY_RAIN_THRESHOLD_MM: f64 = 50.0;

/// The date-sorted observations of one location.
#[derive(Debug, Clone)]
pub struct LocationSeries {
    pub location: &'static Location,
    pub observations: Vec<DailyObservation>,
}

/// Every registry location with its series, in registry order.
#[derive(Debug, Clone)]
pub struct SeriesByLocation {
    series: Vec<LocationSeries>,
}

impl SeriesByLocation {
    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<&LocationSeries> {
        self.series.iter().find(|s| s.location.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocationSeries> {
        self.series.iter()
    }

    /// All observations concatenated location by location.
    pub fn observations(&self) -> impl Iterator<Item = (&'static Location, &DailyObservation)> {
        self.series
            .iter()
            .flat_map(|s| s.observations.iter().map(move |o| (s.location, o)))
    }

    pub fn total_observations(&self) -> usize {
        self.series.iter().map(|s| s.observations.len()).sum()
    }
}

pub fn organize_by_location(
    observations: &[DailyObservation],
    policy: DuplicatePolicy,
) -> Result<SeriesByLocation, DuplicateDateError> {
    let mut series = Vec::with_capacity(all_locations().len());

    for location in all_locations() {
        let mut location_observations: Vec<DailyObservation> = observations
            .iter()
            .filter(|o| o.location == location.name)
            .cloned()
            .collect();
        // Stable: equal dates stay in fetch order.
        location_observations.sort_by_key(|o| o.date);

        let observations = apply_duplicate_policy(location_observations, policy)?;
        series.push(LocationSeries {
            location,
            observations,
        });
    }

    Ok(SeriesByLocation { series })
}

fn apply_duplicate_policy(
    sorted: Vec<DailyObservation>,
    policy: DuplicatePolicy,
) -> Result<Vec<DailyObservation>, DuplicateDateError> {
    match policy {
        DuplicatePolicy::KeepAll => Ok(sorted),
        DuplicatePolicy::KeepLast => {
            let mut kept: Vec<DailyObservation> = Vec::with_capacity(sorted.len());
            for observation in sorted {
                match kept.last_mut() {
                    Some(last) if last.date == observation.date => *last = observation,
                    _ => kept.push(observation),
                }
            }
            Ok(kept)
        }
        DuplicatePolicy::Reject => {
            if let Some(pair) = sorted.windows(2).find(|w| w[0].date == w[1].date) {
                return Err(DuplicateDateError {
                    location: pair[0].location.clone(),
                    date: pair[0].date,
                });
            }
            Ok(sorted)
        }
    }
}

/// Derived statistics for one location. NaN marks a value the data cannot
/// support, such as the seasonal share of a series with no rainfall at all.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsRecord {
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Area_km2")]
    pub area_km2: f64,
    #[serde(rename = "Mean_Annual_Rainfall_mm")]
    pub mean_annual_rainfall_mm: f64,
    #[serde(rename = "Max_Daily_Rainfall_mm")]
    pub max_daily_rainfall_mm: f64,
    #[serde(rename = "Min_Daily_Rainfall_mm")]
    pub min_positive_rainfall_mm: f64,
    #[serde(rename = "Std_Dev_mm")]
    pub std_dev_mm: f64,
    #[serde(rename = "Rainy_Days_per_Year")]
    pub rainy_days_per_year: f64,
    #[serde(rename = "Heavy_Rain_Days_per_Year")]
    pub heavy_rain_days_per_year: f64,
    #[serde(rename = "Monsoon_Contribution_pct")]
    pub monsoon_contribution_pct: f64,
    #[serde(rename = "Years_Covered")]
    pub years_covered: usize,
    #[serde(rename = "Coverage_pct")]
    pub coverage_pct: f64,
}

#[derive(Debug, Default)]
struct YearTally {
    total: f64,
    rainy_days: u32,
    heavy_days: u32,
}

/// One record per registry location, in registry order, including
/// locations without any observations.
pub fn compute_statistics(observations: &[DailyObservation], period: &Period) -> Vec<StatisticsRecord> {
    all_locations()
        .iter()
        .map(|location| {
            let values: Vec<&DailyObservation> = observations
                .iter()
                .filter(|o| o.location == location.name)
                .collect();
            location_statistics(location, &values, period)
        })
        .collect()
}

fn location_statistics(
    location: &Location,
    observations: &[&DailyObservation],
    period: &Period,
) -> StatisticsRecord {
    let mut years: BTreeMap<i32, YearTally> = BTreeMap::new();
    let mut total = 0.0;
    let mut monsoon = 0.0;

    for o in observations {
        let tally = years.entry(o.date.year()).or_default();
        tally.total += o.rainfall_mm;
        if o.rainfall_mm > 0.0 {
            tally.rainy_days += 1;
        }
        if o.rainfall_mm > HEAVY_RAIN_THRESHOLD_MM {
            tally.heavy_days += 1;
        }

        total += o.rainfall_mm;
        if MONSOON_MONTHS.contains(&o.date.month()) {
            monsoon += o.rainfall_mm;
        }
    }

    let values: Vec<f64> = observations.iter().map(|o| o.rainfall_mm).collect();
    let min_positive = values
        .iter()
        .copied()
        .filter(|v| *v > 0.0)
        .fold(None, |min: Option<f64>, v| Some(min.map_or(v, |m| m.min(v))))
        .unwrap_or(0.0);

    StatisticsRecord {
        location: location.name.to_string(),
        area_km2: location.area_km2,
        mean_annual_rainfall_mm: mean(years.values().map(|y| y.total)),
        max_daily_rainfall_mm: values.iter().copied().fold(f64::NAN, f64::max),
        min_positive_rainfall_mm: min_positive,
        std_dev_mm: sample_std_dev(&values),
        rainy_days_per_year: mean(years.values().map(|y| y.rainy_days as f64)),
        heavy_rain_days_per_year: mean(years.values().map(|y| y.heavy_days as f64)),
        monsoon_contribution_pct: monsoon / total * 100.0,
        years_covered: years.len(),
        coverage_pct: observations.len() as f64 / period.num_days() as f64 * 100.0,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return f64::NAN;
    }
    sum / count as f64
}

// n - 1 denominator
fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let mean = mean(values.iter().copied());
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (squares / (values.len() - 1) as f64).sqrt()
}

// -- Tests -------------------------------------------------------------------

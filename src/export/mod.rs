//! Serialises organised series and statistics to disk.

pub mod table;
pub mod model;
pub mod parquet;

use std::str::FromStr;

use crate::{config::Period, error::ConfigurationError};

pub use table::{export_per_location, export_statistics, read_combined};
pub use model::export_for_model;
pub use self::parquet::export_combined_parquet;

pub const STATISTICS_LABEL: &str = "Location_Rainfall";

/// Input formats of the supported rainfall-runoff models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelFormat {
    /// Format A: `DDMONYYYY<TAB>0000<TAB>value`, no header.
    HecHms,
    /// Format B: station header block followed by `YEAR MO DAY RAINFALL` rows.
    Swat,
}

impl ModelFormat {
    pub fn file_label(&self) -> &'static str {
        match self {
            ModelFormat::HecHms => "HEC_HMS",
            ModelFormat::Swat => "SWAT",
        }
    }
}

impl FromStr for ModelFormat {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hec-hms" | "hec_hms" | "hechms" | "a" => Ok(ModelFormat::HecHms),
            "swat" | "b" => Ok(ModelFormat::Swat),
            _ => Err(ConfigurationError::UnknownModelFormat(s.to_string())),
        }
    }
}

pub fn per_location_file_name(location: &str, period: &Period) -> String {
    format!(
        "{}_rainfall_{}_{}.csv",
        location,
        period.start_year(),
        period.end_year()
    )
}

pub fn combined_file_name(period: &Period, extension: &str) -> String {
    format!(
        "All_Locations_Combined_{}_{}.{}",
        period.start_year(),
        period.end_year(),
        extension
    )
}

pub fn statistics_file_name(label: &str) -> String {
    format!("{}_Statistics.csv", label)
}

pub fn model_file_name(location: &str, format: ModelFormat) -> String {
    format!("{}_{}_format.txt", location, format.file_label())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_model_aliases() {
        assert_eq!("hec-hms".parse::<ModelFormat>().unwrap(), ModelFormat::HecHms);
        assert_eq!("HEC_HMS".parse::<ModelFormat>().unwrap(), ModelFormat::HecHms);
        assert_eq!("A".parse::<ModelFormat>().unwrap(), ModelFormat::HecHms);
        assert_eq!("swat".parse::<ModelFormat>().unwrap(), ModelFormat::Swat);
        assert_eq!("b".parse::<ModelFormat>().unwrap(), ModelFormat::Swat);
    }

    #[test]
    fn should_reject_unknown_model() {
        let err = "mike_she".parse::<ModelFormat>().unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownModelFormat("mike_she".to_string()));
    }

    #[test]
    fn should_make_file_names() {
        let period = Period::default();

        assert_eq!(per_location_file_name("Karvir", &period), "Karvir_rainfall_2006_2025.csv");
        assert_eq!(combined_file_name(&period, "csv"), "All_Locations_Combined_2006_2025.csv");
        assert_eq!(statistics_file_name(STATISTICS_LABEL), "Location_Rainfall_Statistics.csv");
        assert_eq!(model_file_name("Ajra", ModelFormat::Swat), "Ajra_SWAT_format.txt");
        assert_eq!(model_file_name("Ajra", ModelFormat::HecHms), "Ajra_HEC_HMS_format.txt");
    }
}

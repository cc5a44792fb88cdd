//! Static reference data for the Panchganga basin.
//!
//! Twelve administrative circles (talukas) of Kolhapur district, the basin
//! bounding box and the two satellite data epochs. The order of `LOCATIONS`
//! is significant: chart layouts downstream assume exactly this sequence.

use crate::error::ConfigurationError;

pub const BASIN_NAME: &str = "Panchganga Basin";
pub const REGION_LABEL: &str = "Kolhapur, Maharashtra";

#[derive(Debug, PartialEq)]
pub struct Location {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub area_km2: f64,
    pub description: &'static str,
}

#[derive(Debug, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// A named period of satellite data availability. Informational only.
#[derive(Debug, PartialEq)]
pub struct Epoch {
    pub name: &'static str,
    pub period: &'static str,
    pub status: &'static str,
    pub resolution: &'static str,
    pub version: Option<&'static str>,
}

pub static LOCATIONS: &[Location] = &[
    Location {
        name: "Karvir",
        latitude: 16.7050,
        longitude: 74.2433,
        area_km2: 760.0,
        description: "Includes Kolhapur city, district headquarters",
    },
    Location {
        name: "Panhala",
        latitude: 16.8167,
        longitude: 74.1167,
        area_km2: 682.0,
        description: "Historic fort town, high elevation",
    },
    Location {
        name: "Shahuwadi",
        latitude: 16.6167,
        longitude: 74.4833,
        area_km2: 565.0,
        description: "Eastern taluka",
    },
    Location {
        name: "Kagal",
        latitude: 16.5833,
        longitude: 74.3167,
        area_km2: 436.0,
        description: "Industrial area",
    },
    Location {
        name: "Hatkanangle",
        latitude: 16.4333,
        longitude: 74.4500,
        area_km2: 521.0,
        description: "Southern taluka",
    },
    Location {
        name: "Shirol",
        latitude: 16.7167,
        longitude: 74.4667,
        area_km2: 674.0,
        description: "Agricultural region",
    },
    Location {
        name: "Radhanagari",
        latitude: 16.4167,
        longitude: 73.9833,
        area_km2: 1041.0,
        description: "Western Ghats, wildlife sanctuary, high rainfall",
    },
    Location {
        name: "Gaganbawada",
        latitude: 16.5500,
        longitude: 73.7667,
        area_km2: 681.0,
        description: "Western Ghats region, high rainfall",
    },
    Location {
        name: "Bhudargad",
        latitude: 16.0167,
        longitude: 74.0667,
        area_km2: 569.0,
        description: "Southern region near Karnataka border",
    },
    Location {
        name: "Gadhinglaj",
        latitude: 16.2333,
        longitude: 74.3500,
        area_km2: 589.0,
        description: "Southern taluka",
    },
    Location {
        name: "Chandgad",
        latitude: 15.9833,
        longitude: 74.2333,
        area_km2: 632.0,
        description: "Southernmost taluka",
    },
    Location {
        name: "Ajra",
        latitude: 16.1167,
        longitude: 73.9667,
        area_km2: 539.0,
        description: "Western region",
    },
];

pub static BASIN_BBOX: BoundingBox = BoundingBox {
    min_lat: 15.90,
    max_lat: 17.00,
    min_lon: 73.50,
    max_lon: 74.70,
};

pub static EPOCHS: &[Epoch] = &[
    Epoch {
        name: "TRMM_era",
        period: "2000-01-01 to 2015-04-15",
        status: "Decommissioned, reprocessed as IMERG",
        resolution: "0.25° × 0.25° (original TMPA)",
        version: None,
    },
    Epoch {
        name: "GPM_IMERG",
        period: "2000-06-01 to Present",
        status: "Active - includes TRMM-era reprocessing",
        resolution: "0.1° × 0.1°",
        version: Some("V07B"),
    },
];

/// Returns the location registered under `name`.
pub fn lookup(name: &str) -> Result<&'static Location, ConfigurationError> {
    LOCATIONS
        .iter()
        .find(|location| location.name == name)
        .ok_or_else(|| ConfigurationError::UnknownLocation(name.to_string()))
}

/// All locations in registry order.
pub fn all_locations() -> &'static [Location] {
    LOCATIONS
}

// -- Tests -------------------------------------------------------------------

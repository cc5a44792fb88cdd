//! Prints the static reference data and data availability.

use std::fmt::Write;

use crate::{
    config::Config,
    registry::{all_locations, BASIN_BBOX, BASIN_NAME, EPOCHS, REGION_LABEL},
};

pub fn info(config: &Config) {
    print!("{}", availability_report(config));
}

pub fn availability_report(config: &Config) -> String {
    let mut report = String::new();
    let rule = "=".repeat(70);

    let _ = writeln!(report, "{}", rule);
    let _ = writeln!(report, "{} ({})", BASIN_NAME, REGION_LABEL);
    let _ = writeln!(report, "{}", rule);
    let _ = writeln!(
        report,
        "Administrative circles: {}    Period: {}-{}",
        all_locations().len(),
        config.period.start_year(),
        config.period.end_year()
    );
    let _ = writeln!(
        report,
        "Bounding box: lat {} to {}, lon {} to {}",
        BASIN_BBOX.min_lat, BASIN_BBOX.max_lat, BASIN_BBOX.min_lon, BASIN_BBOX.max_lon
    );

    let _ = writeln!(report, "\n{:<13} {:>9} {:>9} {:>8}  Description", "Location", "Lat", "Lon", "km²");
    for location in all_locations() {
        let _ = writeln!(
            report,
            "{:<13} {:>9.4} {:>9.4} {:>8.0}  {}",
            location.name,
            location.latitude,
            location.longitude,
            location.area_km2,
            location.description
        );
    }

    let _ = writeln!(report, "\nData epochs:");
    for epoch in EPOCHS {
        let _ = writeln!(report, "  {}", epoch.name);
        let _ = writeln!(report, "    Period:     {}", epoch.period);
        let _ = writeln!(report, "    Status:     {}", epoch.status);
        let _ = writeln!(report, "    Resolution: {}", epoch.resolution);
        if let Some(version) = epoch.version {
            let _ = writeln!(report, "    Version:    {}", version);
        }
    }

    let _ = writeln!(report, "\nLocal capabilities:");
    let _ = writeln!(report, "  HDF5:   {}", availability(config.capabilities.hdf5));
    let _ = writeln!(report, "  NetCDF: {}", availability(config.capabilities.netcdf));
    let _ = writeln!(report, "{}", rule);

    report
}

fn availability(flag: bool) -> &'static str {
    if flag {
        "available"
    } else {
        "not available"
    }
}

// -- Tests -------------------------------------------------------------------

//! Fixed-layout text files for rainfall-runoff models.

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::Datelike;

use crate::{
    aggregate::{LocationSeries, SeriesByLocation},
    registry::{BASIN_NAME, REGION_LABEL},
    report::Reporter,
};

use super::{model_file_name, ModelFormat};

/// Placeholder elevation in the SWAT station header.
pub const SWAT_ELEVATION_M: u32 = 543;
pub const HEC_HMS_TIME: &str = "0000";

/// Writes one `<Location>_<FORMAT>_format.txt` per location. The model type
/// is parsed before anything touches the filesystem, so an unsupported name
/// fails with `ConfigurationError` and leaves no files behind.
pub fn export_for_model(
    series: &SeriesByLocation,
    model_type: &str,
    output_dir: &Path,
    reporter: &dyn Reporter,
) -> Result<Vec<PathBuf>> {
    let format: ModelFormat = model_type.parse()?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let mut written = Vec::new();

    for location_series in series.iter() {
        let path = output_dir.join(model_file_name(location_series.location.name, format));
        let mut out = BufWriter::new(File::create(&path)?);

        match format {
            ModelFormat::HecHms => write_hec_hms(&mut out, location_series)?,
            ModelFormat::Swat => write_swat(&mut out, location_series)?,
        }
        out.flush()?;

        reporter.on_file_written(&path);
        written.push(path);
    }

    Ok(written)
}

fn write_hec_hms(out: &mut impl Write, series: &LocationSeries) -> Result<()> {
    for o in &series.observations {
        writeln!(
            out,
            "{}\t{}\t{}",
            o.date.format("%d%b%Y").to_string().to_uppercase(),
            HEC_HMS_TIME,
            format_value(o.rainfall_mm)
        )?;
    }

    Ok(())
}

fn write_swat(out: &mut impl Write, series: &LocationSeries) -> Result<()> {
    let location = series.location;

    writeln!(out, "{} Taluka - {}", location.name, BASIN_NAME)?;
    writeln!(out, "{}", REGION_LABEL)?;
    writeln!(out, "Lati\tLongi\tElev")?;
    writeln!(
        out,
        "{}\t{}\t{}",
        location.latitude, location.longitude, SWAT_ELEVATION_M
    )?;
    writeln!(out, "YEAR\tMO\tDAY\tRAINFALL")?;

    for o in &series.observations {
        writeln!(
            out,
            "{}\t{}\t{}\t{:.2}",
            o.date.year(),
            o.date.month(),
            o.date.day(),
            o.rainfall_mm
        )?;
    }

    Ok(())
}

// Whole numbers keep one decimal place so 0 reads as 0.0.
fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

// -- Tests -------------------------------------------------------------------

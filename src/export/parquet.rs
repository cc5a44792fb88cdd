//! Save the combined series to a parquet file.

use std::{fs::File, path::Path, sync::Arc};

use anyhow::Result;
use arrow::{
    array::{Date32Builder, Float64Builder, StringBuilder},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use chrono::Datelike;
use parquet::{arrow::ArrowWriter, file::properties::WriterProperties};

use crate::{aggregate::SeriesByLocation, report::Reporter};

// NaiveDate::from_ymd(1970, 1, 1).num_days_from_ce()
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// One record batch per location, rows in series order.
pub fn export_combined_parquet(
    series: &SeriesByLocation,
    file_path: &Path,
    reporter: &dyn Reporter,
) -> Result<()> {
    let file = File::create(file_path)?;

    let schema = Arc::new(Schema::new(vec![
        Field::new("location", DataType::Utf8, false),
        Field::new("date", DataType::Date32, false),
        Field::new("rainfall_mm", DataType::Float64, false),
        Field::new("lat", DataType::Float64, false),
        Field::new("lon", DataType::Float64, false),
    ]));

    let props = WriterProperties::builder()
        .set_compression(parquet::basic::Compression::ZSTD(
            parquet::basic::ZstdLevel::default(),
        ))
        .set_dictionary_enabled(true)
        .build();

    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

    for location_series in series.iter() {
        let rows = location_series.observations.len();
        if rows == 0 {
            continue;
        }
        let location = location_series.location;

        let mut location_builder = StringBuilder::with_capacity(rows, rows * location.name.len());
        let mut date_builder = Date32Builder::with_capacity(rows);
        let mut rainfall_builder = Float64Builder::with_capacity(rows);
        let mut lat_builder = Float64Builder::with_capacity(rows);
        let mut lon_builder = Float64Builder::with_capacity(rows);

        for o in &location_series.observations {
            location_builder.append_value(location.name);
            date_builder.append_value(o.date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE);
            rainfall_builder.append_value(o.rainfall_mm);
            lat_builder.append_value(location.latitude);
            lon_builder.append_value(location.longitude);
        }

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(location_builder.finish()),
                Arc::new(date_builder.finish()),
                Arc::new(rainfall_builder.finish()),
                Arc::new(lat_builder.finish()),
                Arc::new(lon_builder.finish()),
            ],
        )?;
        writer.write(&batch)?;
    }

    writer.close()?;
    reporter.on_file_written(file_path);

    Ok(())
}

// -- Tests -------------------------------------------------------------------

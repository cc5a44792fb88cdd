use std::path::{Path, PathBuf};

use anyhow::Result;
use log::info;

use crate::{
    aggregate::compute_statistics,
    cli::{command::fetch::format_statistics, SummaryArgs},
    config::Period,
    export::{export_statistics, read_combined, STATISTICS_LABEL},
    report::LogReporter,
};

/// Writes the statistics file next to the input and returns its path.
pub fn summary(args: SummaryArgs) -> Result<String> {
    let period = Period::from_years(args.start_year, args.end_year)?;
    let observations = read_combined(&args.input)?;
    info!("Read {} observations from {}", observations.len(), args.input.display());

    let statistics = compute_statistics(&observations, &period);
    let output_dir = args
        .input
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let path = export_statistics(&statistics, &output_dir, STATISTICS_LABEL, &LogReporter)?;
    print!("{}", format_statistics(&statistics));

    Ok(path.to_string_lossy().to_string())
}

// -- Tests -------------------------------------------------------------------

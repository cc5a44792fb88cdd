use std::{
    fmt::Write as _,
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{bail, Result};
use log::info;

use crate::{
    aggregate::{compute_statistics, organize_by_location, StatisticsRecord},
    cli::{create_progress_bar, create_spinner, FetchArgs},
    config::{Capabilities, Config},
    download::{fetch_all, PowerClient},
    export::{
        combined_file_name, export_combined_parquet, export_for_model, export_per_location,
        export_statistics, STATISTICS_LABEL,
    },
    reading::DailyObservation,
    registry::all_locations,
    report::{LogReporter, ProgressReporter},
    template::write_plotting_script,
};

const PROMPT: &str = "Fetch NASA POWER data now?";

/// Returns the output directory, or `None` when the user declines the prompt.
pub async fn fetch(args: FetchArgs, capabilities: Capabilities) -> Result<Option<String>> {
    let config = args.to_config(capabilities)?;

    if !args.yes && !confirm(PROMPT, &mut io::stdin().lock(), &mut io::stdout())? {
        return Ok(None);
    }

    let observations = fetch_observations(&config).await?;
    let summary = export_all(&observations, &config)?;
    info!("Wrote {} files under {}", summary.files.len(), config.output_dir.display());
    print!("{}", format_statistics(&summary.statistics));

    Ok(Some(config.output_dir.to_string_lossy().to_string()))
}

async fn fetch_observations(config: &Config) -> Result<Vec<DailyObservation>> {
    let client = PowerClient::new(config.timeout)?;
    let locations = all_locations();

    let reporter = ProgressReporter::new(create_progress_bar(
        locations.len() as u64,
        "Fetching rainfall".to_string(),
    ));
    let observations = fetch_all(&client, locations, &config.period, config.concurrent, &reporter).await;
    reporter.finish(&format!("Fetched {} daily records", observations.len()));

    if observations.is_empty() {
        bail!("No observations fetched for any location; nothing exported");
    }

    Ok(observations)
}

#[derive(Debug)]
pub struct ExportSummary {
    pub files: Vec<PathBuf>,
    pub statistics: Vec<StatisticsRecord>,
}

/// Organises the observations and writes every export the config asks for.
pub fn export_all(observations: &[DailyObservation], config: &Config) -> Result<ExportSummary> {
    let series = organize_by_location(observations, config.duplicates)?;
    info!(
        "Organised {} observations with duplicate policy {:?}",
        series.total_observations(),
        config.duplicates
    );
    let data_dir = config.data_dir();
    let model_dir = config.model_dir();

    let bar = create_spinner("Exporting files...".to_string());
    let mut files = export_per_location(&series, &data_dir, &config.period, &LogReporter)?;

    let organized: Vec<DailyObservation> = series.observations().map(|(_, o)| o.clone()).collect();
    let statistics = compute_statistics(&organized, &config.period);
    files.push(export_statistics(&statistics, &data_dir, STATISTICS_LABEL, &LogReporter)?);

    for model in &config.models {
        files.extend(export_for_model(&series, model, &model_dir, &LogReporter)?);
    }

    if config.parquet {
        let path = data_dir.join(combined_file_name(&config.period, "parquet"));
        export_combined_parquet(&series, &path, &LogReporter)?;
        files.push(path);
    }

    files.push(write_plotting_script(&config.output_dir, &LogReporter)?);
    bar.finish_with_message(format!("Exported {} files", files.len()));

    Ok(ExportSummary { files, statistics })
}

/// Asks a yes/no question; only `yes` or `y` counts as consent.
pub fn confirm(prompt: &str, input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    write!(output, "{} (yes/no): ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(matches!(answer.trim().to_lowercase().as_str(), "yes" | "y"))
}

pub fn format_statistics(stats: &[StatisticsRecord]) -> String {
    let mut table = String::new();

    let _ = writeln!(
        table,
        "{:<13} {:>8} {:>10} {:>9} {:>8} {:>8} {:>7} {:>7} {:>8} {:>9}",
        "Location", "Area", "Annual", "MaxDaily", "MinPos", "StdDev", "Rainy", "Heavy", "Monsoon%", "Coverage%"
    );
    for s in stats {
        let _ = writeln!(
            table,
            "{:<13} {:>8.0} {:>10.1} {:>9.1} {:>8.2} {:>8.2} {:>7.1} {:>7.1} {:>8.1} {:>9.1}",
            s.location,
            s.area_km2,
            s.mean_annual_rainfall_mm,
            s.max_daily_rainfall_mm,
            s.min_positive_rainfall_mm,
            s.std_dev_mm,
            s.rainy_days_per_year,
            s.heavy_rain_days_per_year,
            s.monsoon_contribution_pct,
            s.coverage_pct
        );
    }

    table
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;
    use crate::{
        config::{DuplicatePolicy, Period},
        error::{ConfigurationError, DuplicateDateError},
        export::read_combined,
    };

    fn observations() -> Vec<DailyObservation> {
        let day = |m, d| NaiveDate::from_ymd_opt(2010, m, d).unwrap();
        vec![
            DailyObservation::new(day(7, 1), "Karvir", 0.0),
            DailyObservation::new(day(7, 2), "Karvir", 60.0),
            DailyObservation::new(day(7, 3), "Karvir", 10.0),
            DailyObservation::new(day(1, 1), "Ajra", 2.5),
            DailyObservation::new(day(1, 1), "Ajra", 3.5),
        ]
    }

    fn config(dir: &TempDir) -> Config {
        Config {
            period: Period::from_years(2010, 2010).unwrap(),
            output_dir: dir.path().to_path_buf(),
            models: vec!["hec-hms".to_string(), "swat".to_string()],
            parquet: true,
            ..Config::default()
        }
    }

    #[test]
    fn should_accept_yes_answers() {
        for answer in ["yes\n", "Y\n", "  YES  \n", "y"] {
            let mut output = Vec::new();
            assert!(confirm("Go?", &mut Cursor::new(answer), &mut output).unwrap());
            assert_eq!(String::from_utf8(output).unwrap(), "Go? (yes/no): ");
        }
    }

    #[test]
    fn should_ask_fetch_question() {
        let mut output = Vec::new();
        confirm(PROMPT, &mut Cursor::new("no\n"), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Fetch NASA POWER data now? (yes/no): "
        );
    }

    #[test]
    fn should_decline_anything_else() {
        for answer in ["no\n", "\n", "yep\n", ""] {
            let mut output = Vec::new();
            assert!(!confirm("Go?", &mut Cursor::new(answer), &mut output).unwrap());
        }
    }

    #[test]
    fn should_export_everything() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);

        let summary = export_all(&observations(), &config).unwrap();

        // 12 per-location + combined + statistics + 2 x 12 model + parquet + plotting script
        assert_eq!(summary.files.len(), 40);
        assert!(summary.files.iter().all(|f| f.exists()));
        assert!(dir.path().join("rainfall_data/Location_Rainfall_Statistics.csv").exists());
        assert!(dir.path().join("rainfall_data/All_Locations_Combined_2010_2010.parquet").exists());
        assert!(dir.path().join("model_ready_data/Karvir_SWAT_format.txt").exists());
        assert!(dir.path().join("visualize_rainfall.py").exists());

        let karvir = summary.statistics.iter().find(|s| s.location == "Karvir").unwrap();
        assert_eq!(karvir.max_daily_rainfall_mm, 60.0);
        assert_eq!(summary.statistics.len(), 12);

        let combined = read_combined(&dir.path().join("rainfall_data/All_Locations_Combined_2010_2010.csv")).unwrap();
        assert_eq!(combined.len(), 5);
    }

    #[test]
    fn should_apply_duplicate_policy_before_statistics() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            duplicates: DuplicatePolicy::KeepLast,
            ..config(&dir)
        };

        let summary = export_all(&observations(), &config).unwrap();
        let ajra = summary.statistics.iter().find(|s| s.location == "Ajra").unwrap();

        assert_eq!(ajra.mean_annual_rainfall_mm, 3.5);
    }

    #[test]
    fn should_fail_on_rejected_duplicates() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            duplicates: DuplicatePolicy::Reject,
            ..config(&dir)
        };

        let err = export_all(&observations(), &config).unwrap_err();

        assert!(err.downcast_ref::<DuplicateDateError>().is_some());
        assert!(!dir.path().join("rainfall_data").exists());
    }

    #[test]
    fn should_stop_on_unknown_model_before_model_files() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            models: vec!["generic".to_string()],
            ..config(&dir)
        };

        let err = export_all(&observations(), &config).unwrap_err();

        assert!(err.downcast_ref::<ConfigurationError>().is_some());
        assert!(!dir.path().join("model_ready_data").exists());
    }

    #[test]
    fn should_point_plotting_script_at_written_export() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            period: Period::from_years(2010, 2012).unwrap(),
            ..config(&dir)
        };

        export_all(&observations(), &config).unwrap();

        let script = std::fs::read_to_string(dir.path().join("visualize_rainfall.py")).unwrap();
        let pattern = script
            .split("glob.glob('")
            .nth(1)
            .and_then(|rest| rest.split("')").next())
            .unwrap();
        let (prefix, suffix) = pattern.split_once('*').unwrap();

        let matches: Vec<String> = std::fs::read_dir(dir.path().join("rainfall_data"))
            .unwrap()
            .map(|entry| format!("rainfall_data/{}", entry.unwrap().file_name().to_string_lossy()))
            .filter(|name| name.starts_with(prefix) && name.ends_with(suffix))
            .collect();

        assert_eq!(matches, vec!["rainfall_data/All_Locations_Combined_2010_2012.csv".to_string()]);
        assert!(!script.contains("2006_2025"));
    }

    #[test]
    fn should_format_statistics_table() {
        let stats = compute_statistics(&observations(), &Period::from_years(2010, 2010).unwrap());
        let table = format_statistics(&stats);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 13);
        assert!(lines[0].starts_with("Location"));
        assert!(lines[1].starts_with("Karvir"));
        assert!(lines[2].contains("NaN"));
    }
}

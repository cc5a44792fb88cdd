//! Script artifacts generated from static configuration only.

pub mod platform;
pub mod plotting;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::report::Reporter;

pub use platform::generate_platform_script;
pub use plotting::generate_plotting_script;

pub const PLATFORM_SCRIPT_FILE: &str = "gee_panchganga_rainfall_extraction.js";
pub const PLOTTING_SCRIPT_FILE: &str = "visualize_rainfall.py";

pub fn write_platform_script(output_dir: &Path, reporter: &dyn Reporter) -> Result<PathBuf> {
    write_script(output_dir, PLATFORM_SCRIPT_FILE, &generate_platform_script(), reporter)
}

pub fn write_plotting_script(output_dir: &Path, reporter: &dyn Reporter) -> Result<PathBuf> {
    write_script(output_dir, PLOTTING_SCRIPT_FILE, generate_plotting_script(), reporter)
}

fn write_script(
    output_dir: &Path,
    file_name: &str,
    content: &str,
    reporter: &dyn Reporter,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let path = output_dir.join(file_name);
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    reporter.on_file_written(&path);

    Ok(path)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::report::testing::RecordingReporter;

    #[test]
    fn should_write_both_scripts() {
        let dir = TempDir::new().unwrap();
        let reporter = RecordingReporter::default();

        let platform = write_platform_script(dir.path(), &reporter).unwrap();
        let plotting = write_plotting_script(dir.path(), &reporter).unwrap();

        assert_eq!(fs::read_to_string(platform).unwrap(), generate_platform_script());
        assert_eq!(fs::read_to_string(plotting).unwrap(), generate_plotting_script());
        assert_eq!(reporter.written.lock().unwrap().len(), 2);
    }
}

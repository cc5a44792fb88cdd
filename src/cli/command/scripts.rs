use std::path::PathBuf;

use anyhow::Result;

use crate::{
    config::default_output_dir,
    report::LogReporter,
    template::{write_platform_script, write_plotting_script},
};

pub fn scripts(output_dir: Option<PathBuf>) -> Result<String> {
    let output_dir = output_dir.unwrap_or_else(default_output_dir);

    write_platform_script(&output_dir, &LogReporter)?;
    write_plotting_script(&output_dir, &LogReporter)?;

    Ok(output_dir.to_string_lossy().to_string())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::template::{PLATFORM_SCRIPT_FILE, PLOTTING_SCRIPT_FILE};

    #[test]
    fn should_write_scripts_into_output_dir() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("scripts");

        let saved = scripts(Some(out.clone())).unwrap();

        assert_eq!(saved, out.to_string_lossy());
        assert!(out.join(PLATFORM_SCRIPT_FILE).exists());
        assert!(out.join(PLOTTING_SCRIPT_FILE).exists());
    }
}

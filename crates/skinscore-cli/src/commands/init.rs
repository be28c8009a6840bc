use std::path::{Path, PathBuf};

use skinscore_core::config::default_config_yaml;
use skinscore_core::CalibrationTable;

/// Write default `skinscore.yml` and `calibration.json` files.
///
/// Safe to run multiple times - won't overwrite existing files unless `force`
/// is true.
pub fn cmd_init(dir: Option<PathBuf>, force: bool) -> Result<(), String> {
    let dir = match dir {
        Some(dir) => dir,
        None => std::env::current_dir()
            .map_err(|e| format!("Could not determine current directory: {}", e))?
            .join("config"),
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;
    println!("Initializing skinscore configuration in: {}", dir.display());

    let config_path = dir.join("skinscore.yml");
    if should_write(&config_path, force) {
        let yaml = default_config_yaml().map_err(|e| e.to_string())?;
        std::fs::write(&config_path, yaml)
            .map_err(|e| format!("Failed to write {}: {}", config_path.display(), e))?;
        println!("  Wrote: skinscore.yml");
    } else {
        println!("  Skipped: skinscore.yml (already exists, use --force to overwrite)");
    }

    let calibration_path = dir.join("calibration.json");
    if should_write(&calibration_path, force) {
        CalibrationTable::default()
            .save(&calibration_path)
            .map_err(|e| e.to_string())?;
        println!("  Wrote: calibration.json");
    } else {
        println!("  Skipped: calibration.json (already exists, use --force to overwrite)");
    }

    Ok(())
}

fn should_write(path: &Path, force: bool) -> bool {
    force || !path.exists()
}

//! Analysis configuration management.
//!
//! Loads [`AnalysisOptions`] from a YAML file, falling back to built-in
//! defaults. Nothing here is global: callers hold the returned handle and pass
//! the options to [`crate::SkinAnalyzer`].

mod defaults;


pub use defaults::AnalysisOptions;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkinError};

/// Canonical list of candidate config file names we search for on disk.
const CONFIG_FILENAMES: &[&str] = &["skinscore.yml", "skinscore.yaml"];

/// Environment variable that points at an explicit config file.
pub const CONFIG_ENV: &str = "SKINSCORE_CONFIG";

/// Complete configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub analysis: AnalysisOptions,
}

/// Loaded configuration, its source path, and warnings.
#[derive(Debug, Clone)]
pub struct AnalysisConfigHandle {
    pub options: AnalysisOptions,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

/// Load configuration from disk, optionally forcing a specific path.
///
/// Never fails: unreadable or malformed files are skipped with a warning and
/// the built-in defaults are used when no candidate parses.
pub fn load_analysis_config(custom_path: Option<&Path>) -> AnalysisConfigHandle {
    let mut warnings = Vec::new();

    for candidate in config_candidates(custom_path) {
        if !candidate.is_file() {
            continue;
        }

        match fs::read_to_string(&candidate) {
            Ok(contents) => match parse_analysis_config(&contents) {
                Ok(config) => {
                    let mut options = config.analysis;
                    warnings.extend(options.sanitize());
                    let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                    log::debug!("Loaded analysis config from {}", source.display());
                    return AnalysisConfigHandle {
                        options,
                        source: Some(source),
                        warnings,
                    };
                }
                Err(err) => warnings.push(format!(
                    "Failed to parse analysis config {}: {}",
                    candidate.display(),
                    err
                )),
            },
            Err(err) => warnings.push(format!(
                "Failed to read analysis config {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    warnings.push("No analysis config found; using built-in defaults.".to_string());
    AnalysisConfigHandle {
        options: AnalysisOptions::default(),
        source: None,
        warnings,
    }
}

/// Parse a YAML config document.
pub fn parse_analysis_config(contents: &str) -> Result<AnalysisConfig> {
    serde_yaml::from_str(contents).map_err(|e| SkinError::Config(e.to_string()))
}

/// Render the default configuration as YAML (used by `skinscore init`).
pub fn default_config_yaml() -> Result<String> {
    serde_yaml::to_string(&AnalysisConfig::default()).map_err(|e| SkinError::Config(e.to_string()))
}

fn config_candidates(custom_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        for name in CONFIG_FILENAMES {
            candidates.push(home_dir.join("skinscore").join(name));
        }
    }

    candidates
}

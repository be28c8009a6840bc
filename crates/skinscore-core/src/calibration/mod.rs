//! Calibration table: per-metric `[low, high]` ranges.
//!
//! The table is built once (from a persisted JSON document or the compiled-in
//! defaults) and is read-only afterwards, so any number of analyses can share
//! it without locking.

mod normalize;


pub use normalize::{normalize, SCORE_MAX};

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SkinError};
use crate::metric::Metric;

/// Canonical list of candidate calibration file names we search for on disk.
const CALIBRATION_FILENAMES: &[&str] = &["calibration.json"];

/// Environment variable that points at an explicit calibration file.
pub const CALIBRATION_ENV: &str = "SKINSCORE_CALIBRATION";

/// Raw-statistic window mapped linearly onto 0-10.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRange {
    pub low: f32,
    pub high: f32,
}

impl CalibrationRange {
    /// Range used by the fitter when a metric has no usable reference images.
    pub const SAFE_DEFAULT: CalibrationRange = CalibrationRange {
        low: 0.0,
        high: 10.0,
    };

    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    pub fn is_degenerate(&self) -> bool {
        self.low == self.high
    }

    pub fn normalize(&self, value: f32) -> f32 {
        normalize(value, self.low, self.high)
    }
}

/// Immutable mapping from every [`Metric`] to its range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationTable {
    ranges: [CalibrationRange; 6],
}

impl Default for CalibrationTable {
    /// Compiled-in ranges, in each metric's native unit.
    fn default() -> Self {
        Self::from_fn(|metric| match metric {
            // mean CIE L*
            Metric::Brightness => CalibrationRange::new(20.0, 80.0),
            // mean local variance of L*/100
            Metric::Dryness => CalibrationRange::new(0.0002, 0.004),
            // mean |Laplacian| on 8-bit intensity
            Metric::TexturePores => CalibrationRange::new(1.5, 12.0),
            // edge pixel fraction
            Metric::Lines => CalibrationRange::new(0.01, 0.12),
            Metric::Wrinkles => CalibrationRange::new(0.005, 0.08),
            // a*/b* variance plus weighted skewness
            Metric::Pigmentation => CalibrationRange::new(4.0, 60.0),
        })
    }
}

impl CalibrationTable {
    pub fn from_fn<F: FnMut(Metric) -> CalibrationRange>(mut f: F) -> Self {
        let mut ranges = [CalibrationRange::SAFE_DEFAULT; 6];
        for metric in Metric::ALL {
            ranges[metric.index()] = f(metric);
        }
        Self { ranges }
    }

    pub fn range(&self, metric: Metric) -> CalibrationRange {
        self.ranges[metric.index()]
    }

    /// Builder-style override, used while assembling a table.
    pub fn with_range(mut self, metric: Metric, range: CalibrationRange) -> Self {
        self.ranges[metric.index()] = range;
        self
    }

    pub fn normalize(&self, metric: Metric, value: f32) -> f32 {
        self.range(metric).normalize(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, CalibrationRange)> + '_ {
        Metric::ALL.iter().map(move |&m| (m, self.ranges[m.index()]))
    }

    /// Parse a persisted document on top of the compiled-in defaults.
    ///
    /// Present metrics with numeric `low` and `high` override the default;
    /// absent or malformed entries keep it. Unknown keys are ignored. Returns
    /// the table and one warning per skipped or repaired entry.
    pub fn from_json_str(contents: &str) -> std::result::Result<(Self, Vec<String>), String> {
        let document: Value = serde_json::from_str(contents)
            .map_err(|e| format!("Failed to parse calibration JSON: {}", e))?;
        let entries = document
            .as_object()
            .ok_or_else(|| "Calibration document must be a JSON object".to_string())?;

        let mut table = Self::default();
        let mut warnings = Vec::new();

        for metric in Metric::ALL {
            let Some(entry) = entries.get(metric.as_str()) else {
                continue;
            };
            match parse_range(entry) {
                Ok(range) => {
                    let range = if range.low > range.high {
                        warnings.push(format!(
                            "{}: low {} > high {}; swapping bounds",
                            metric, range.low, range.high
                        ));
                        CalibrationRange::new(range.high, range.low)
                    } else {
                        range
                    };
                    table.ranges[metric.index()] = range;
                }
                Err(reason) => {
                    warnings.push(format!("{}: {}; keeping default range", metric, reason))
                }
            }
        }

        Ok((table, warnings))
    }

    /// Persisted document form, keyed by metric name in canonical order.
    pub fn to_document(&self) -> BTreeMap<Metric, CalibrationRange> {
        self.iter().collect()
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_document())
            .map_err(|e| SkinError::Calibration(e.to_string()))
    }

    /// Write the table, replacing `path` atomically.
    ///
    /// The document goes to a temporary file in the same directory which is
    /// then renamed over the target, so a concurrent reader sees either the
    /// old table or the new one.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json_string()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| SkinError::io(&dir, e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| SkinError::io(&dir, e))?;
        if let Err(err) = write_document(tmp.as_file_mut(), &json) {
            return Err(SkinError::io(tmp.path(), err));
        }
        tmp.persist(path)
            .map_err(|e| SkinError::Calibration(format!("{}: {}", path.display(), e)))?;

        log::debug!("Wrote calibration table to {}", path.display());
        Ok(())
    }
}

fn write_document(file: &mut fs::File, json: &str) -> std::io::Result<()> {
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()
}

fn parse_range(entry: &Value) -> std::result::Result<CalibrationRange, String> {
    let object = entry
        .as_object()
        .ok_or_else(|| "entry is not an object".to_string())?;
    let bound = |name: &str| -> std::result::Result<f32, String> {
        let value = object
            .get(name)
            .ok_or_else(|| format!("missing `{}`", name))?;
        let number = value
            .as_f64()
            .ok_or_else(|| format!("`{}` is not a number", name))?;
        let number = number as f32;
        if number.is_finite() {
            Ok(number)
        } else {
            Err(format!("`{}` is out of range", name))
        }
    };
    Ok(CalibrationRange::new(bound("low")?, bound("high")?))
}

/// Where the active calibration table came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalibrationSource {
    /// Loaded from this file (defaults still fill any skipped entries)
    Persisted(PathBuf),
    /// No usable file; compiled-in defaults wholesale
    BuiltIn,
}

/// Loaded calibration table, its source, and warnings.
#[derive(Debug, Clone)]
pub struct CalibrationHandle {
    pub table: CalibrationTable,
    pub source: CalibrationSource,
    pub warnings: Vec<String>,
}

impl CalibrationHandle {
    pub fn used_defaults(&self) -> bool {
        self.source == CalibrationSource::BuiltIn
    }
}

/// Load the calibration table, optionally forcing a specific path.
///
/// Never fails: a missing or unreadable document falls back to the built-in
/// defaults and the reason is recorded in `warnings`.
pub fn load_calibration(custom_path: Option<&Path>) -> CalibrationHandle {
    let mut warnings = Vec::new();

    for candidate in calibration_candidates(custom_path) {
        if !candidate.is_file() {
            if custom_path == Some(candidate.as_path()) {
                warnings.push(format!(
                    "Calibration file {} not found",
                    candidate.display()
                ));
            }
            continue;
        }

        match fs::read_to_string(&candidate) {
            Ok(contents) => match CalibrationTable::from_json_str(&contents) {
                Ok((table, entry_warnings)) => {
                    for warning in &entry_warnings {
                        log::warn!("Calibration {}: {}", candidate.display(), warning);
                    }
                    warnings.extend(entry_warnings);
                    let source = fs::canonicalize(&candidate).unwrap_or(candidate);
                    log::debug!("Loaded calibration table from {}", source.display());
                    return CalibrationHandle {
                        table,
                        source: CalibrationSource::Persisted(source),
                        warnings,
                    };
                }
                Err(err) => warnings.push(format!("{}: {}", candidate.display(), err)),
            },
            Err(err) => warnings.push(format!(
                "Failed to read calibration {}: {}",
                candidate.display(),
                err
            )),
        }
    }

    warnings.push("No calibration table found; using built-in defaults.".to_string());
    log::warn!("No usable calibration table found; using built-in defaults");
    CalibrationHandle {
        table: CalibrationTable::default(),
        source: CalibrationSource::BuiltIn,
        warnings,
    }
}

fn calibration_candidates(custom_path: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = custom_path {
        candidates.push(path.to_path_buf());
    }

    if let Ok(env_path) = std::env::var(CALIBRATION_ENV) {
        candidates.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        for name in CALIBRATION_FILENAMES {
            candidates.push(cwd.join("config").join(name));
            candidates.push(cwd.join(name));
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        for name in CALIBRATION_FILENAMES {
            candidates.push(home_dir.join("skinscore").join(name));
        }
    }

    candidates
}

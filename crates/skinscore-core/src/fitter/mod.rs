//! Offline calibration fitting.
//!
//! Expects a reference root with one directory per metric, each holding
//! `mild/` and `severe/` folders of sample images:
//!
//! ```text
//! data/
//!   brightness/mild/*.jpg
//!   brightness/severe/*.jpg
//!   texture-pores/mild/...
//! ```
//!
//! For each metric the single relevant extractor is averaged over each
//! folder and the averages become the calibration range. This is a batch
//! tool and never runs on the analysis path.


use std::fmt;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::calibration::{CalibrationRange, CalibrationTable};
use crate::config::AnalysisOptions;
use crate::decoders::{decode_path, has_supported_extension};
use crate::error::{Result, SkinError};
use crate::extract::extract_metric;
use crate::metric::Metric;
use crate::prepare::prepare_region;

/// Half-width of the band synthesized around a single observed average.
const SINGLE_FOLDER_BAND: f32 = 0.2;

/// Reference label of a sample folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceLabel {
    Mild,
    Severe,
}

impl ReferenceLabel {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Severe => "severe",
        }
    }
}

/// How a metric's range was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitRule {
    /// Both folders produced an average: `[min, max]` of the two
    BothFolders,
    /// Only one folder produced an average: `avg * [0.8, 1.2]`
    SingleFolder(ReferenceLabel),
    /// Neither folder was usable: safe default range
    Fallback,
}

impl fmt::Display for FitRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitRule::BothFolders => f.write_str("mild+severe averages"),
            FitRule::SingleFolder(label) => {
                write!(f, "+/-20% around {} average", label.dir_name())
            }
            FitRule::Fallback => f.write_str("no usable images; safe default"),
        }
    }
}

/// Average of one folder.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FolderAverage {
    /// `None` when no image in the folder could be used
    pub average: Option<f32>,
    pub used: usize,
    pub skipped: usize,
}

/// Outcome for a single metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitEntry {
    pub metric: Metric,
    pub mild: FolderAverage,
    pub severe: FolderAverage,
    pub range: CalibrationRange,
    pub rule: FitRule,
}

/// Fitted table plus per-metric details.
#[derive(Debug, Clone)]
pub struct FitReport {
    pub table: CalibrationTable,
    pub entries: Vec<FitEntry>,
    pub warnings: Vec<String>,
}

/// Derive a range from the two folder averages.
pub fn fit_range(mild_avg: Option<f32>, severe_avg: Option<f32>) -> (CalibrationRange, FitRule) {
    match (mild_avg, severe_avg) {
        (Some(mild), Some(severe)) => (
            CalibrationRange::new(mild.min(severe), mild.max(severe)),
            FitRule::BothFolders,
        ),
        (Some(avg), None) => (
            single_folder_band(avg),
            FitRule::SingleFolder(ReferenceLabel::Mild),
        ),
        (None, Some(avg)) => (
            single_folder_band(avg),
            FitRule::SingleFolder(ReferenceLabel::Severe),
        ),
        (None, None) => (CalibrationRange::SAFE_DEFAULT, FitRule::Fallback),
    }
}

fn single_folder_band(avg: f32) -> CalibrationRange {
    let a = avg * (1.0 - SINGLE_FOLDER_BAND);
    let b = avg * (1.0 + SINGLE_FOLDER_BAND);
    // negative averages flip the band
    CalibrationRange::new(a.min(b), a.max(b))
}

/// Fit every metric from a reference root.
///
/// Fails only when the root itself is unusable. Missing metric or label
/// folders and undecodable images are recorded as warnings.
pub fn fit_calibration(root: &Path, options: &AnalysisOptions) -> Result<FitReport> {
    if !root.is_dir() {
        return Err(SkinError::ReferenceRoot {
            path: root.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut table = CalibrationTable::default();
    let mut entries = Vec::with_capacity(Metric::ALL.len());
    let mut warnings = Vec::new();

    for metric in Metric::ALL {
        let metric_dir = root.join(metric.as_str());
        let mild = folder_average(
            &metric_dir.join(ReferenceLabel::Mild.dir_name()),
            metric,
            options,
            &mut warnings,
        );
        let severe = folder_average(
            &metric_dir.join(ReferenceLabel::Severe.dir_name()),
            metric,
            options,
            &mut warnings,
        );

        let (range, rule) = fit_range(mild.average, severe.average);
        if rule != FitRule::BothFolders {
            log::warn!("{}: {}", metric, rule);
        }
        log::debug!(
            "{}: low={} high={} (mild {:?}, severe {:?})",
            metric,
            range.low,
            range.high,
            mild.average,
            severe.average
        );

        table = table.with_range(metric, range);
        entries.push(FitEntry {
            metric,
            mild,
            severe,
            range,
            rule,
        });
    }

    Ok(FitReport {
        table,
        entries,
        warnings,
    })
}

/// Fit and persist in one step, replacing `out` atomically.
pub fn fit_and_save(root: &Path, out: &Path, options: &AnalysisOptions) -> Result<FitReport> {
    let report = fit_calibration(root, options)?;
    report.table.save(out)?;
    Ok(report)
}

/// Average one metric's raw statistic over every usable image in `dir`.
pub fn folder_average(
    dir: &Path,
    metric: Metric,
    options: &AnalysisOptions,
    warnings: &mut Vec<String>,
) -> FolderAverage {
    let images = match list_images(dir) {
        Ok(images) => images,
        Err(err) => {
            warnings.push(format!("{}: {}", dir.display(), err));
            return FolderAverage::default();
        }
    };

    let results: Vec<std::result::Result<f32, String>> = images
        .par_iter()
        .map(|path| raw_value(path, metric, options))
        .collect();

    let mut sum = 0.0f64;
    let mut used = 0usize;
    let mut skipped = 0usize;
    for result in results {
        match result {
            Ok(value) => {
                sum += value as f64;
                used += 1;
            }
            Err(message) => {
                log::warn!("{}", message);
                warnings.push(message);
                skipped += 1;
            }
        }
    }

    FolderAverage {
        average: (used > 0).then(|| (sum / used as f64) as f32),
        used,
        skipped,
    }
}

fn raw_value(
    path: &Path,
    metric: Metric,
    options: &AnalysisOptions,
) -> std::result::Result<f32, String> {
    let image = decode_path(path).map_err(|e| format!("skipping {}: {}", path.display(), e))?;
    let region = prepare_region(&image, options);
    let value = extract_metric(metric, &region, options);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!(
            "skipping {}: {} is not finite ({})",
            path.display(),
            metric,
            value
        ))
    }
}

/// Supported image files directly inside `dir`, sorted.
fn list_images(dir: &Path) -> std::result::Result<Vec<PathBuf>, String> {
    if !dir.is_dir() {
        return Err("folder not found".to_string());
    }
    let entries = std::fs::read_dir(dir).map_err(|e| format!("failed to read folder: {}", e))?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("error reading directory entry: {}", e))?;
        let path = entry.path();
        if path.is_file() && has_supported_extension(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

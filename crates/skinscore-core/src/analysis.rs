//! The analysis entry point: image in, score mapping out.

use std::collections::BTreeMap;
use std::path::Path;

use image::RgbImage;
use serde::Serialize;

use crate::calibration::{CalibrationHandle, CalibrationTable};
use crate::config::{AnalysisConfigHandle, AnalysisOptions};
use crate::dampen::clinical_dampen;
use crate::decoders;
use crate::error::Result;
use crate::extract::{extract_all, RawMetricVector};
use crate::metric::Metric;
use crate::prepare::prepare_region;
use crate::severity::{classify, select_diagnosis, SeverityLabel};

/// Final scores keyed by metric, iterated in canonical order.
pub type ScoreMap = BTreeMap<Metric, f32>;

/// Result of one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkinReport {
    /// One score per metric in [0.0, 10.0], one decimal
    pub scores: ScoreMap,
    /// Diagnosis text for the highest-scoring metric
    pub diagnosis: &'static str,
    pub top_metric: Option<Metric>,
    /// Metrics whose raw statistic was not finite and were forced to 0
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invalid_metrics: Vec<Metric>,
}

impl SkinReport {
    pub fn score(&self, metric: Metric) -> f32 {
        self.scores.get(&metric).copied().unwrap_or(0.0)
    }

    pub fn severities(&self) -> BTreeMap<Metric, SeverityLabel> {
        self.scores
            .iter()
            .map(|(&metric, &score)| (metric, classify(score)))
            .collect()
    }
}

/// Immutable analysis pipeline.
///
/// Holds the calibration table and options by value; analyses borrow it
/// immutably, so one analyzer can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct SkinAnalyzer {
    calibration: CalibrationTable,
    options: AnalysisOptions,
}

impl SkinAnalyzer {
    /// Out-of-range options are replaced by their defaults with a warning.
    pub fn new(calibration: CalibrationTable, mut options: AnalysisOptions) -> Self {
        for warning in options.sanitize() {
            log::warn!("{}", warning);
        }
        Self {
            calibration,
            options,
        }
    }

    /// Build from loaded handles, logging any load warnings once.
    pub fn from_handles(calibration: &CalibrationHandle, config: &AnalysisConfigHandle) -> Self {
        for warning in calibration.warnings.iter().chain(&config.warnings) {
            log::debug!("{}", warning);
        }
        Self::new(calibration.table, config.options.clone())
    }

    pub fn calibration(&self) -> &CalibrationTable {
        &self.calibration
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Raw statistics for an image, before calibration.
    pub fn raw_metrics(&self, image: &RgbImage) -> RawMetricVector {
        let region = prepare_region(image, &self.options);
        extract_all(&region, &self.options)
    }

    pub fn analyze(&self, image: &RgbImage) -> SkinReport {
        let raw = self.raw_metrics(image);
        self.score_raw(&raw)
    }

    /// Decode an upload and analyze it. Only decoding can fail.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<SkinReport> {
        let image = decoders::decode_bytes(bytes)?;
        Ok(self.analyze(&image))
    }

    pub fn analyze_path<P: AsRef<Path>>(&self, path: P) -> Result<SkinReport> {
        let image = decoders::decode_path(path)?;
        Ok(self.analyze(&image))
    }

    /// Normalize, dampen and summarize raw statistics.
    ///
    /// A non-finite statistic forces only its own metric to 0; the other
    /// five are scored normally.
    pub fn score_raw(&self, raw: &RawMetricVector) -> SkinReport {
        let mut scores = ScoreMap::new();
        let mut invalid_metrics = Vec::new();

        for (metric, value) in raw.iter() {
            let score = if value.is_finite() {
                clinical_dampen(metric, self.calibration.normalize(metric, value))
            } else {
                log::warn!(
                    "{} produced a non-finite value ({}); scoring it as 0",
                    metric,
                    value
                );
                invalid_metrics.push(metric);
                0.0
            };
            scores.insert(metric, score);
        }

        let (top_metric, diagnosis) = select_diagnosis(&scores);
        SkinReport {
            scores,
            diagnosis,
            top_metric,
            invalid_metrics,
        }
    }
}

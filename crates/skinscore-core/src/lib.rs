//! Skinscore Core Library
//!
//! Heuristic skin-condition indices from a single facial-region photograph.
//!
//! The analysis path is a pure function of `(image, CalibrationTable)`:
//!
//! 1. [`prepare`] resizes and center-crops the photo and derives grayscale and
//!    CIE L*a*b* planes.
//! 2. [`extract`] turns the prepared region into six raw statistics.
//! 3. [`calibration`] rescales each statistic into 0-10 using a calibration
//!    range.
//! 4. [`dampen`] compresses clinically implausible extremes.
//!
//! [`fitter`] is the offline tool that derives calibration ranges from labeled
//! reference folders. Outputs are heuristic indices, not a diagnosis.

pub mod analysis;
pub mod calibration;
pub mod color;
pub mod config;
pub mod dampen;
pub mod decoders;
mod error;
pub mod extract;
pub mod fitter;
pub mod metric;
pub mod prepare;
pub mod severity;

pub use analysis::{ScoreMap, SkinAnalyzer, SkinReport};
pub use calibration::{
    load_calibration, normalize, CalibrationHandle, CalibrationRange, CalibrationSource,
    CalibrationTable,
};
pub use config::{load_analysis_config, AnalysisConfigHandle, AnalysisOptions};
pub use dampen::{clinical_dampen, DampenRule};
pub use error::{Result, SkinError};
pub use extract::RawMetricVector;
pub use fitter::{fit_calibration, fit_range, FitReport, FitRule};
pub use metric::Metric;
pub use prepare::{prepare_region, PreparedRegion};
pub use severity::{classify, select_diagnosis, SeverityLabel};

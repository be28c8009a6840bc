//! Default analysis parameter values and their validation/sanitization.

use serde::{Deserialize, Serialize};

/// Tunable parameters for image preparation and metric extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Length of the longer side after the initial resize (pixels)
    pub target_long_side: u32,
    /// Border removed on every side, as a fraction of the longer side
    pub pad_ratio: f32,
    /// Smallest crop side we accept before falling back to the full frame
    pub min_crop_side: u32,
    /// Gaussian sigma for the local mean/variance fields of the dryness proxy
    pub dryness_sigma: f32,
    /// Pre-smoothing before the fine line edge detector
    pub lines_blur_sigma: f32,
    pub lines_canny_low: f32,
    pub lines_canny_high: f32,
    /// Pre-smoothing before the wrinkle edge detector (stronger than lines)
    pub wrinkles_blur_sigma: f32,
    pub wrinkles_canny_low: f32,
    pub wrinkles_canny_high: f32,
    /// Radius of the square structuring element used to close wrinkle strokes
    pub wrinkles_close_radius: u8,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            target_long_side: 640,
            pad_ratio: 0.08,
            min_crop_side: 16,
            dryness_sigma: 2.0,
            lines_blur_sigma: 1.0,
            lines_canny_low: 30.0,
            lines_canny_high: 90.0,
            wrinkles_blur_sigma: 2.5,
            wrinkles_canny_low: 50.0,
            wrinkles_canny_high: 150.0,
            wrinkles_close_radius: 1,
        }
    }
}

impl AnalysisOptions {
    /// Replace out-of-range values with defaults, returning one warning per fix.
    pub fn sanitize(&mut self) -> Vec<String> {
        let defaults = Self::default();
        let mut warnings = Vec::new();

        if self.min_crop_side == 0 {
            warnings.push("min_crop_side must be positive; using default".to_string());
            self.min_crop_side = defaults.min_crop_side;
        }
        if self.target_long_side < self.min_crop_side {
            warnings.push(format!(
                "target_long_side {} is below min_crop_side {}; using default",
                self.target_long_side, self.min_crop_side
            ));
            self.target_long_side = defaults.target_long_side.max(self.min_crop_side);
        }
        if !self.pad_ratio.is_finite() || !(0.0..0.5).contains(&self.pad_ratio) {
            warnings.push(format!(
                "pad_ratio {} outside [0, 0.5); using default",
                self.pad_ratio
            ));
            self.pad_ratio = defaults.pad_ratio;
        }

        sanitize_sigma(
            &mut self.dryness_sigma,
            defaults.dryness_sigma,
            "dryness_sigma",
            &mut warnings,
        );
        sanitize_sigma(
            &mut self.lines_blur_sigma,
            defaults.lines_blur_sigma,
            "lines_blur_sigma",
            &mut warnings,
        );
        sanitize_sigma(
            &mut self.wrinkles_blur_sigma,
            defaults.wrinkles_blur_sigma,
            "wrinkles_blur_sigma",
            &mut warnings,
        );

        sanitize_thresholds(
            &mut self.lines_canny_low,
            &mut self.lines_canny_high,
            (defaults.lines_canny_low, defaults.lines_canny_high),
            "lines",
            &mut warnings,
        );
        sanitize_thresholds(
            &mut self.wrinkles_canny_low,
            &mut self.wrinkles_canny_high,
            (defaults.wrinkles_canny_low, defaults.wrinkles_canny_high),
            "wrinkles",
            &mut warnings,
        );

        warnings
    }
}

fn sanitize_sigma(value: &mut f32, default: f32, name: &str, warnings: &mut Vec<String>) {
    // Zero means "no pre-smoothing"; negative or non-finite is invalid.
    if !value.is_finite() || *value < 0.0 {
        warnings.push(format!("{} {} is invalid; using default", name, value));
        *value = default;
    }
}

fn sanitize_thresholds(
    low: &mut f32,
    high: &mut f32,
    defaults: (f32, f32),
    name: &str,
    warnings: &mut Vec<String>,
) {
    let valid = low.is_finite() && high.is_finite() && *low >= 0.0 && *low <= *high;
    if !valid {
        warnings.push(format!(
            "{} canny thresholds ({}, {}) are invalid; using defaults",
            name, low, high
        ));
        *low = defaults.0;
        *high = defaults.1;
    }
}

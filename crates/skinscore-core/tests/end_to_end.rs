//! End-to-end analysis and fitting on synthetic images.

use std::sync::Arc;
use std::thread;

use image::{Rgb, RgbImage};
use skinscore_core::fitter::{fit_and_save, FitRule};
use skinscore_core::{
    load_calibration, AnalysisOptions, CalibrationRange, CalibrationTable, Metric,
    RawMetricVector, SkinAnalyzer,
};

fn mid_gray() -> RgbImage {
    RgbImage::from_pixel(480, 360, Rgb([128, 128, 128]))
}

fn assert_one_decimal(score: f32) {
    assert!(((score * 10.0).round() - score * 10.0).abs() < 1e-3, "{}", score);
}

#[test]
fn test_uniform_gray_scores() {
    let analyzer = SkinAnalyzer::default();
    let report = analyzer.analyze(&mid_gray());

    assert_eq!(report.scores.len(), 6);
    for (&metric, &score) in &report.scores {
        assert!((0.0..=10.0).contains(&score), "{} = {}", metric, score);
        assert_one_decimal(score);
    }

    assert!(report.score(Metric::Lines) < 0.5);
    assert!(report.score(Metric::Wrinkles) < 0.5);
    assert!(report.score(Metric::TexturePores) < 0.5);

    let brightness = report.score(Metric::Brightness);
    assert!((3.0..=7.0).contains(&brightness), "brightness {}", brightness);
    assert!(brightness >= 1.0);
    assert!(report.score(Metric::Dryness) >= 0.8);

    assert_eq!(report.top_metric, Some(Metric::Brightness));
    assert!(report.invalid_metrics.is_empty());
}

#[test]
fn test_dark_photo_hits_brightness_floor() {
    let analyzer = SkinAnalyzer::default();
    let report = analyzer.analyze(&RgbImage::from_pixel(100, 100, Rgb([5, 5, 5])));
    assert_eq!(report.score(Metric::Brightness), 1.0);
}

#[test]
fn test_out_of_range_options_are_replaced() {
    let options = AnalysisOptions {
        pad_ratio: 1e10,
        dryness_sigma: f32::NAN,
        ..AnalysisOptions::default()
    };
    let analyzer = SkinAnalyzer::new(CalibrationTable::default(), options);
    let defaults = AnalysisOptions::default();
    assert_eq!(analyzer.options().pad_ratio, defaults.pad_ratio);
    assert_eq!(analyzer.options().dryness_sigma, defaults.dryness_sigma);

    let report = analyzer.analyze(&mid_gray());
    assert_eq!(report.scores.len(), 6);
    assert!(report.invalid_metrics.is_empty());
}

#[test]
fn test_nan_metric_does_not_block_others() {
    let analyzer = SkinAnalyzer::default();
    let mut raw = analyzer.raw_metrics(&mid_gray());
    raw.set(Metric::Pigmentation, f32::NAN);

    let report = analyzer.score_raw(&raw);
    assert_eq!(report.scores.len(), 6);
    assert_eq!(report.score(Metric::Pigmentation), 0.0);
    assert_eq!(report.invalid_metrics, vec![Metric::Pigmentation]);
    assert!(report.score(Metric::Brightness) >= 1.0);
    assert!(report.score(Metric::Dryness) >= 0.8);
}

#[test]
fn test_score_raw_applies_calibration_and_dampening() {
    let table = CalibrationTable::from_fn(|_| CalibrationRange::new(0.0, 1.0));
    let analyzer = SkinAnalyzer::new(table, AnalysisOptions::default());

    let raw = RawMetricVector::from_fn(|_| 0.95);
    let report = analyzer.score_raw(&raw);

    assert_eq!(report.score(Metric::Lines), 6.5);
    assert_eq!(report.score(Metric::Pigmentation), 6.0);
    assert_eq!(report.score(Metric::TexturePores), 5.5);
    assert_eq!(report.score(Metric::Brightness), 9.5);
    assert_eq!(report.score(Metric::Dryness), 9.5);
    assert_eq!(report.score(Metric::Wrinkles), 9.5);
    assert_eq!(report.top_metric, Some(Metric::Brightness));

    let severities = report.severities();
    assert_eq!(severities[&Metric::Lines].as_str(), "Severe");
    assert_eq!(severities[&Metric::TexturePores].as_str(), "Moderate");
}

#[test]
fn test_decode_failure_is_reported_as_input_error() {
    let analyzer = SkinAnalyzer::default();
    let err = analyzer.analyze_bytes(b"\x89PNG but not really").unwrap_err();
    assert!(err.is_input_error());
}

#[test]
fn test_report_serializes_metric_names() {
    let report = SkinAnalyzer::default().analyze(&mid_gray());
    let json = serde_json::to_value(&report).unwrap();
    let scores = json["scores"].as_object().unwrap();
    for metric in Metric::ALL {
        assert!(scores[metric.as_str()].is_number());
    }
    assert!(json["diagnosis"].is_string());
    assert!(json.get("invalid_metrics").is_none());
}

#[test]
fn test_concurrent_analyses_share_one_analyzer() {
    let analyzer = Arc::new(SkinAnalyzer::default());
    let expected = analyzer.analyze(&mid_gray());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            thread::spawn(move || analyzer.analyze(&mid_gray()))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

fn write_gray(dir: &std::path::Path, name: &str, value: u8) {
    std::fs::create_dir_all(dir).unwrap();
    RgbImage::from_pixel(96, 72, Rgb([value, value, value]))
        .save(dir.join(name))
        .unwrap();
}

#[test]
fn test_fit_and_reload_calibration() {
    let data = tempfile::tempdir().unwrap();
    let brightness = data.path().join("brightness");
    write_gray(&brightness.join("mild"), "1.png", 200);
    write_gray(&brightness.join("mild"), "2.png", 180);
    write_gray(&brightness.join("severe"), "1.png", 60);
    // only one labeled folder for dryness
    write_gray(&data.path().join("dryness").join("mild"), "1.png", 128);

    let out_dir = tempfile::tempdir().unwrap();
    let out = out_dir.path().join("calibration.json");
    let options = AnalysisOptions::default();
    let report = fit_and_save(data.path(), &out, &options).unwrap();

    let entry = |metric: Metric| {
        report
            .entries
            .iter()
            .find(|e| e.metric == metric)
            .unwrap()
            .clone()
    };

    let b = entry(Metric::Brightness);
    assert_eq!(b.rule, FitRule::BothFolders);
    assert_eq!(b.mild.used, 2);
    assert!(b.range.low < b.range.high);
    assert_eq!(Some(b.range.low), b.severe.average);
    assert_eq!(Some(b.range.high), b.mild.average);

    assert!(matches!(entry(Metric::Dryness).rule, FitRule::SingleFolder(_)));
    assert_eq!(entry(Metric::Wrinkles).rule, FitRule::Fallback);
    assert_eq!(
        entry(Metric::Wrinkles).range,
        CalibrationRange::SAFE_DEFAULT
    );

    // Re-running on the same folders gives the same table.
    let again = fit_and_save(data.path(), &out, &options).unwrap();
    assert_eq!(again.table, report.table);

    let handle = load_calibration(Some(&out));
    assert!(!handle.used_defaults());
    assert_eq!(handle.table, report.table);

    let analyzer = SkinAnalyzer::new(handle.table, options);
    let scores = analyzer.analyze(&mid_gray());
    assert!(scores.score(Metric::Brightness) > 1.0);
}

//! Report formatting for terminal and JSON output.

use std::collections::BTreeMap;

use serde::Serialize;
use skinscore_core::{Metric, SeverityLabel, SkinReport};

/// Per-file analysis output in the JSON report shape.
#[derive(Debug, Serialize)]
pub struct AnalysisOutput {
    pub file: String,
    pub diagnosis: &'static str,
    pub scores: BTreeMap<Metric, f32>,
    pub severities: BTreeMap<Metric, SeverityLabel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub invalid_metrics: Vec<Metric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<BTreeMap<Metric, f32>>,
}

impl AnalysisOutput {
    pub fn new(file: String, report: SkinReport, raw: Option<BTreeMap<Metric, f32>>) -> Self {
        let severities = report.severities();
        Self {
            file,
            diagnosis: report.diagnosis,
            scores: report.scores,
            severities,
            invalid_metrics: report.invalid_metrics,
            raw,
        }
    }
}

/// Human-readable multi-line rendering of one result.
pub fn format_report(output: &AnalysisOutput) -> String {
    let mut lines = vec![format!("Analysis: {}", output.file)];

    for (metric, score) in &output.scores {
        let severity = output
            .severities
            .get(metric)
            .map(|s| s.as_str())
            .unwrap_or("-");
        let mut line = format!("  {:<14} {:>4.1}  {}", metric.as_str(), score, severity);
        if let Some(raw) = output.raw.as_ref().and_then(|r| r.get(metric)) {
            line.push_str(&format!("  (raw {:.5})", raw));
        }
        if output.invalid_metrics.contains(metric) {
            line.push_str("  [invalid input value]");
        }
        lines.push(line);
    }

    lines.push(format!("  Diagnosis: {}", output.diagnosis));
    lines.join("\n")
}

//! Severity categories and diagnosis selection.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::metric::Metric;

/// Label used when no metric can be selected.
pub const BALANCED_PROFILE: &str = "Balanced skin profile; no dominant concern.";

/// Three-level category of a single final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SeverityLabel {
    Mild,
    Moderate,
    Severe,
}

impl SeverityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::Severe => "Severe",
        }
    }
}

impl fmt::Display for SeverityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `< 4.5` Mild, `< 6.5` Moderate, otherwise Severe.
pub fn classify(score: f32) -> SeverityLabel {
    if score < 4.5 {
        SeverityLabel::Mild
    } else if score < 6.5 {
        SeverityLabel::Moderate
    } else {
        SeverityLabel::Severe
    }
}

/// Pick the highest-scoring metric and its diagnosis text.
///
/// Ties go to the metric earliest in canonical order. Non-finite scores are
/// never selected.
pub fn select_diagnosis(scores: &BTreeMap<Metric, f32>) -> (Option<Metric>, &'static str) {
    let mut best: Option<(Metric, f32)> = None;
    // BTreeMap iterates in canonical order, so strict `>` keeps the first tie.
    for (&metric, &score) in scores {
        if !score.is_finite() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((metric, score)),
        }
    }

    match best {
        Some((metric, _)) => (Some(metric), metric.diagnosis_label()),
        None => (None, BALANCED_PROFILE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(0.0), SeverityLabel::Mild);
        assert_eq!(classify(4.4), SeverityLabel::Mild);
        assert_eq!(classify(4.5), SeverityLabel::Moderate);
        assert_eq!(classify(6.49), SeverityLabel::Moderate);
        assert_eq!(classify(6.5), SeverityLabel::Severe);
        assert_eq!(classify(10.0), SeverityLabel::Severe);
    }

    #[test]
    fn test_diagnosis_picks_maximum() {
        let scores: BTreeMap<Metric, f32> = [
            (Metric::Brightness, 3.0),
            (Metric::Dryness, 2.0),
            (Metric::Pigmentation, 5.5),
        ]
        .into_iter()
        .collect();

        let (metric, label) = select_diagnosis(&scores);
        assert_eq!(metric, Some(Metric::Pigmentation));
        assert_eq!(label, Metric::Pigmentation.diagnosis_label());
    }

    #[test]
    fn test_diagnosis_ties_follow_canonical_order() {
        let scores: BTreeMap<Metric, f32> = [
            (Metric::Wrinkles, 4.0),
            (Metric::Dryness, 4.0),
            (Metric::Lines, 4.0),
        ]
        .into_iter()
        .collect();

        assert_eq!(select_diagnosis(&scores).0, Some(Metric::Dryness));
    }

    #[test]
    fn test_diagnosis_fallback() {
        let (metric, label) = select_diagnosis(&BTreeMap::new());
        assert_eq!(metric, None);
        assert_eq!(label, BALANCED_PROFILE);
    }
}

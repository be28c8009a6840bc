//! Clinical dampening of normalized scores.
//!
//! A linear calibration happily reports 9-10 for things that are not
//! pathological (freckles read as melasma, natural pores read as texture
//! disease). Each metric carries a piecewise rule that compresses those
//! extremes or enforces a floor.

use crate::calibration::SCORE_MAX;
use crate::metric::Metric;

/// Per-metric compression applied after normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DampenRule {
    /// `(threshold, output)` pairs checked top-down; the first
    /// `score >= threshold` wins, otherwise the score is unchanged.
    Steps(&'static [(f32, f32)]),
    /// Never report below this value.
    Floor(f32),
    /// Scores below the limit are clipped into `[0, limit]`; no ceiling.
    ClipBelow(f32),
}

const LINES_STEPS: &[(f32, f32)] = &[(9.0, 6.5), (7.0, 5.5), (5.0, 4.5)];
const PIGMENTATION_STEPS: &[(f32, f32)] = &[(9.0, 6.0), (7.0, 5.0), (5.0, 4.0)];
const TEXTURE_STEPS: &[(f32, f32)] = &[(9.0, 5.5), (7.0, 4.5), (5.0, 3.5)];

impl Metric {
    pub fn dampen_rule(&self) -> DampenRule {
        match self {
            Metric::Lines => DampenRule::Steps(LINES_STEPS),
            Metric::Pigmentation => DampenRule::Steps(PIGMENTATION_STEPS),
            Metric::TexturePores => DampenRule::Steps(TEXTURE_STEPS),
            // a dim photo alone should not read as zero brightness
            Metric::Brightness => DampenRule::Floor(1.0),
            // skin is rarely entirely non-dry
            Metric::Dryness => DampenRule::Floor(0.8),
            Metric::Wrinkles => DampenRule::ClipBelow(1.0),
        }
    }
}

impl DampenRule {
    pub fn apply(&self, score: f32) -> f32 {
        match *self {
            DampenRule::Steps(steps) => steps
                .iter()
                .find(|(threshold, _)| score >= *threshold)
                .map(|&(_, output)| output)
                .unwrap_or(score),
            DampenRule::Floor(floor) => score.max(floor),
            DampenRule::ClipBelow(limit) => {
                if score < limit {
                    score.clamp(0.0, limit)
                } else {
                    score
                }
            }
        }
    }
}

/// Apply the metric's rule, clip to [0, 10] and round to one decimal.
pub fn clinical_dampen(metric: Metric, score: f32) -> f32 {
    let score = if score.is_finite() { score } else { 0.0 };
    let dampened = metric.dampen_rule().apply(score).clamp(0.0, SCORE_MAX);
    round_one_decimal(dampened)
}

pub(crate) fn round_one_decimal(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_points() {
        assert_eq!(clinical_dampen(Metric::Lines, 9.5), 6.5);
        assert_eq!(clinical_dampen(Metric::Brightness, 0.2), 1.0);
        assert_eq!(clinical_dampen(Metric::Wrinkles, 0.4), 0.4);
    }

    #[test]
    fn test_step_thresholds_are_inclusive() {
        assert_eq!(clinical_dampen(Metric::Lines, 9.0), 6.5);
        assert_eq!(clinical_dampen(Metric::Lines, 7.0), 5.5);
        assert_eq!(clinical_dampen(Metric::Lines, 5.0), 4.5);
        assert_eq!(clinical_dampen(Metric::Lines, 4.9), 4.9);

        assert_eq!(clinical_dampen(Metric::Pigmentation, 10.0), 6.0);
        assert_eq!(clinical_dampen(Metric::Pigmentation, 8.0), 5.0);
        assert_eq!(clinical_dampen(Metric::Pigmentation, 6.0), 4.0);
        assert_eq!(clinical_dampen(Metric::Pigmentation, 3.3), 3.3);

        assert_eq!(clinical_dampen(Metric::TexturePores, 9.9), 5.5);
        assert_eq!(clinical_dampen(Metric::TexturePores, 7.2), 4.5);
        assert_eq!(clinical_dampen(Metric::TexturePores, 5.0), 3.5);
        assert_eq!(clinical_dampen(Metric::TexturePores, 2.0), 2.0);
    }

    #[test]
    fn test_floors() {
        assert_eq!(clinical_dampen(Metric::Brightness, 0.0), 1.0);
        assert_eq!(clinical_dampen(Metric::Brightness, 7.3), 7.3);
        assert_eq!(clinical_dampen(Metric::Dryness, 0.0), 0.8);
        assert_eq!(clinical_dampen(Metric::Dryness, 9.99), 10.0);
    }

    #[test]
    fn test_wrinkles_have_no_ceiling() {
        assert_eq!(clinical_dampen(Metric::Wrinkles, 10.0), 10.0);
        assert_eq!(clinical_dampen(Metric::Wrinkles, 0.0), 0.0);
    }

    #[test]
    fn test_out_of_range_and_non_finite_inputs() {
        assert_eq!(clinical_dampen(Metric::Wrinkles, 42.0), 10.0);
        assert_eq!(clinical_dampen(Metric::Wrinkles, -3.0), 0.0);
        assert_eq!(clinical_dampen(Metric::Dryness, f32::NAN), 0.8);
    }

    proptest! {
        #[test]
        fn prop_output_bounded_and_rounded(score in 0.0f32..=10.0, idx in 0usize..6) {
            let metric = Metric::ALL[idx];
            let out = clinical_dampen(metric, score);
            prop_assert!((0.0..=10.0).contains(&out));
            prop_assert!(((out * 10.0).round() - out * 10.0).abs() < 1e-3);
        }

        #[test]
        fn prop_step_rules_never_raise(score in 0.0f32..=10.0) {
            for metric in [Metric::Lines, Metric::Pigmentation, Metric::TexturePores] {
                prop_assert!(clinical_dampen(metric, score) <= round_one_decimal(score) + 1e-6);
            }
        }
    }
}

//! Pigmentation from the a*/b* chrominance distribution.

use super::stats;
use crate::prepare::PreparedRegion;

/// Weight of the skewness term.
const SKEW_WEIGHT: f32 = 0.2;
/// Bound on the combined absolute skewness before weighting.
const SKEW_CAP: f32 = 2.0;

/// `var(a) + var(b) + 0.2 * clip(|skew(a)| + |skew(b)|, 0, 2)`
///
/// Variance measures overall color spread. Skewness picks up localized
/// blotches, which make the distribution lopsided, while a uniform tone shift
/// leaves it symmetric.
pub fn pigmentation(region: &PreparedRegion) -> f32 {
    let a = region.chroma_a.as_raw();
    let b = region.chroma_b.as_raw();

    let spread = stats::variance(a) + stats::variance(b);
    let skew = (stats::skewness(a).abs() + stats::skewness(b).abs()).clamp(0.0, SKEW_CAP);

    spread + SKEW_WEIGHT * skew
}

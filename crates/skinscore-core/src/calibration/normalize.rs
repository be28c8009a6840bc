//! Linear rescaling of raw statistics into the 0-10 score range.

/// Upper end of every score.
pub const SCORE_MAX: f32 = 10.0;

/// Map `value` linearly so `low -> 0` and `high -> 10`, clipped to [0, 10].
///
/// A degenerate range (`low == high`) carries no information and maps every
/// value to 0. Non-finite inputs also map to 0; callers that need to report
/// them check [`f32::is_finite`] first.
///
/// The ratio is computed in f64, where the quotient of two finite f32
/// differences cannot overflow, so very narrow ranges still saturate at 10.
pub fn normalize(value: f32, low: f32, high: f32) -> f32 {
    if !value.is_finite() || !low.is_finite() || !high.is_finite() {
        return 0.0;
    }
    if low == high {
        return 0.0;
    }
    let (value, low, high) = (f64::from(value), f64::from(low), f64::from(high));
    let scaled = (value - low) / (high - low) * f64::from(SCORE_MAX);
    if scaled.is_nan() {
        return 0.0;
    }
    scaled.clamp(0.0, f64::from(SCORE_MAX)) as f32
}

//! Moment statistics over float samples.
//!
//! Accumulation happens in f64; every function returns a finite 0.0 instead
//! of dividing by zero on empty or constant input.

pub fn mean(data: &[f32]) -> f32 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().map(|&v| v as f64).sum();
    (sum / data.len() as f64) as f32
}

/// Population variance.
pub fn variance(data: &[f32]) -> f32 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data) as f64;
    let sum_sq: f64 = data
        .iter()
        .map(|&v| {
            let d = v as f64 - m;
            d * d
        })
        .sum();
    (sum_sq / data.len() as f64) as f32
}

/// Third standardized moment (Fisher-Pearson, biased).
pub fn skewness(data: &[f32]) -> f32 {
    if data.len() < 2 {
        return 0.0;
    }
    let n = data.len() as f64;
    let m = mean(data) as f64;

    let (m2, m3) = data.iter().fold((0.0f64, 0.0f64), |(s2, s3), &v| {
        let d = v as f64 - m;
        (s2 + d * d, s3 + d * d * d)
    });
    let m2 = m2 / n;
    let m3 = m3 / n;

    if m2 <= f64::EPSILON {
        return 0.0;
    }
    (m3 / m2.powf(1.5)) as f32
}

/// Fraction of non-zero samples in a binary edge map.
pub fn density(data: &[u8]) -> f32 {
    if data.is_empty() {
        return 0.0;
    }
    let on = data.iter().filter(|&&v| v > 0).count();
    on as f32 / data.len() as f32
}

//! Extractors driven by lightness and intensity: brightness, dryness,
//! texture/pores.

use imageproc::filter::gaussian_blur_f32;

use super::stats;
use crate::prepare::{FloatPlane, PreparedRegion};

/// Mean CIE L* of the region.
pub fn brightness(region: &PreparedRegion) -> f32 {
    stats::mean(region.lightness.as_raw())
}

/// Mean local variance of normalized lightness.
///
/// `mu = G * L`, `var = G * (L - mu)^2`, result is `mean(var)`. Mottled
/// lightness (flaking, uneven hydration) raises it.
pub fn dryness(region: &PreparedRegion, sigma: f32) -> f32 {
    if region.pixel_count() == 0 {
        return 0.0;
    }

    let mut normalized = region.lightness.clone();
    for p in normalized.pixels_mut() {
        p.0[0] /= 100.0;
    }

    let local_mean = smooth(&normalized, sigma);
    let mut deviation = normalized;
    for (d, mu) in deviation.pixels_mut().zip(local_mean.pixels()) {
        let diff = d.0[0] - mu.0[0];
        d.0[0] = diff * diff;
    }
    let local_variance = smooth(&deviation, sigma);

    stats::mean(local_variance.as_raw())
}

/// Mean absolute 4-neighbour Laplacian response over grayscale intensity.
pub fn texture_pores(region: &PreparedRegion) -> f32 {
    let gray = &region.gray;
    let (w, h) = gray.dimensions();
    if w < 3 || h < 3 {
        return 0.0;
    }

    let mut sum = 0.0f64;
    let mut count = 0u64;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let center = gray.get_pixel(x, y).0[0] as f64;
            let top = gray.get_pixel(x, y - 1).0[0] as f64;
            let bottom = gray.get_pixel(x, y + 1).0[0] as f64;
            let left = gray.get_pixel(x - 1, y).0[0] as f64;
            let right = gray.get_pixel(x + 1, y).0[0] as f64;

            let laplacian = top + bottom + left + right - 4.0 * center;
            sum += laplacian.abs();
            count += 1;
        }
    }

    (sum / count as f64) as f32
}

fn smooth(plane: &FloatPlane, sigma: f32) -> FloatPlane {
    // gaussian_blur_f32 panics on sigma <= 0
    if sigma > 0.0 {
        gaussian_blur_f32(plane, sigma)
    } else {
        plane.clone()
    }
}

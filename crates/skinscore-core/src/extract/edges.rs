//! Edge-density extractors: fine lines and wrinkles.
//!
//! Both count Canny edge pixels, but wrinkles are broader, lower-contrast and
//! more continuous. They get a stronger blur, stricter thresholds and a
//! morphological close that joins broken segments into strokes. The heavier
//! smoothing suppresses most of the fine-line edges, so the two metrics do not
//! report the same structure twice.

use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::close;

use super::stats;
use crate::config::AnalysisOptions;
use crate::prepare::PreparedRegion;

pub fn lines(region: &PreparedRegion, options: &AnalysisOptions) -> f32 {
    if region.pixel_count() == 0 {
        return 0.0;
    }
    let smoothed = blur(&region.gray, options.lines_blur_sigma);
    let edges = canny(&smoothed, options.lines_canny_low, options.lines_canny_high);
    stats::density(edges.as_raw())
}

pub fn wrinkles(region: &PreparedRegion, options: &AnalysisOptions) -> f32 {
    if region.pixel_count() == 0 {
        return 0.0;
    }
    let smoothed = blur(&region.gray, options.wrinkles_blur_sigma);
    let edges = canny(
        &smoothed,
        options.wrinkles_canny_low,
        options.wrinkles_canny_high,
    );
    let strokes = if options.wrinkles_close_radius > 0 {
        close(&edges, Norm::LInf, options.wrinkles_close_radius)
    } else {
        edges
    };
    stats::density(strokes.as_raw())
}

fn blur(gray: &GrayImage, sigma: f32) -> GrayImage {
    if sigma > 0.0 {
        gaussian_blur_f32(gray, sigma)
    } else {
        gray.clone()
    }
}

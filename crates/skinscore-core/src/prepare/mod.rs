//! Image preparation: canonical resize, center crop, derived planes.
//!
//! The region of interest is a fixed center crop of the resized frame. Hair
//! and background usually sit near the frame edge, so a border proportional
//! to the longer side is discarded.


use image::imageops::{self, FilterType};
use image::{GrayImage, ImageBuffer, Luma, RgbImage};

use crate::color::rgb8_to_lab;
use crate::config::AnalysisOptions;

/// Single-channel floating point plane.
pub type FloatPlane = ImageBuffer<Luma<f32>, Vec<f32>>;

/// The analysis region and its derived colorspaces.
#[derive(Debug, Clone)]
pub struct PreparedRegion {
    /// Resized and cropped RGB region
    pub rgb: RgbImage,
    /// Grayscale intensity (0-255)
    pub gray: GrayImage,
    /// CIE L* (0-100)
    pub lightness: FloatPlane,
    /// CIE a* (green-red)
    pub chroma_a: FloatPlane,
    /// CIE b* (blue-yellow)
    pub chroma_b: FloatPlane,
}

impl PreparedRegion {
    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    pub fn height(&self) -> u32 {
        self.rgb.height()
    }

    pub fn pixel_count(&self) -> usize {
        self.rgb.width() as usize * self.rgb.height() as usize
    }
}

/// Resize, crop and decompose an RGB image.
pub fn prepare_region(image: &RgbImage, options: &AnalysisOptions) -> PreparedRegion {
    let resized = resize_long_side(image, options.target_long_side);
    let rgb = center_crop(resized, options.pad_ratio, options.min_crop_side);
    let gray = imageops::grayscale(&rgb);
    let (lightness, chroma_a, chroma_b) = lab_planes(&rgb);

    log::debug!(
        "Prepared region {}x{} from {}x{} input",
        rgb.width(),
        rgb.height(),
        image.width(),
        image.height()
    );

    PreparedRegion {
        rgb,
        gray,
        lightness,
        chroma_a,
        chroma_b,
    }
}

/// Uniformly scale so the longer side equals `target`, keeping aspect ratio.
///
/// Downscaling averages every source pixel covered by a target pixel (area
/// filter); upscaling interpolates linearly.
pub fn resize_long_side(image: &RgbImage, target: u32) -> RgbImage {
    let (w, h) = image.dimensions();
    let long = w.max(h);
    if long == 0 || long == target || target == 0 {
        return image.clone();
    }

    let scale = target as f64 / long as f64;
    let new_w = ((w as f64 * scale).round() as u32).max(1);
    let new_h = ((h as f64 * scale).round() as u32).max(1);

    if long > target {
        imageops::thumbnail(image, new_w, new_h)
    } else {
        imageops::resize(image, new_w, new_h, FilterType::Triangle)
    }
}

/// Remove `pad_ratio * max(w, h)` pixels from every side.
///
/// When the remaining region would be smaller than `min_side` in either
/// dimension the image is returned unmodified.
pub fn center_crop(image: RgbImage, pad_ratio: f32, min_side: u32) -> RgbImage {
    let (w, h) = image.dimensions();
    let pad = (pad_ratio.max(0.0) * w.max(h) as f32).round() as u32;

    let Some(border) = pad.checked_mul(2) else {
        return image;
    };
    let (Some(crop_w), Some(crop_h)) = (w.checked_sub(border), h.checked_sub(border)) else {
        return image;
    };
    if crop_w < min_side || crop_h < min_side {
        return image;
    }

    imageops::crop_imm(&image, pad, pad, crop_w, crop_h).to_image()
}

fn lab_planes(rgb: &RgbImage) -> (FloatPlane, FloatPlane, FloatPlane) {
    let (w, h) = rgb.dimensions();
    let count = w as usize * h as usize;
    let mut l = Vec::with_capacity(count);
    let mut a = Vec::with_capacity(count);
    let mut b = Vec::with_capacity(count);

    for pixel in rgb.pixels() {
        let lab = rgb8_to_lab(pixel.0);
        l.push(lab.l);
        a.push(lab.a);
        b.push(lab.b);
    }

    (plane(w, h, l), plane(w, h, a), plane(w, h, b))
}

fn plane(width: u32, height: u32, data: Vec<f32>) -> FloatPlane {
    // Buffer length always equals width * height here.
    ImageBuffer::from_raw(width, height, data).unwrap_or_else(|| ImageBuffer::new(width, height))
}

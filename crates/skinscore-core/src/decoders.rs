//! Image decoding into the 3-channel RGB buffer the analysis expects.
//!
//! Every format the `image` crate can read is accepted; alpha and grayscale
//! inputs are flattened to RGB.

use std::path::Path;

use image::RgbImage;

use crate::error::{Result, SkinError};

/// Extensions picked up when scanning directories (compared lowercase).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff", "bmp", "webp"];

/// Decode an in-memory upload.
pub fn decode_bytes(bytes: &[u8]) -> Result<RgbImage> {
    let image = image::load_from_memory(bytes).map_err(|e| SkinError::Decode {
        path: None,
        message: e.to_string(),
    })?;
    Ok(image.to_rgb8())
}

/// Decode an image file from disk.
pub fn decode_path<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| SkinError::io(path, e))?;
    let image = image::load_from_memory(&bytes).map_err(|e| SkinError::Decode {
        path: Some(path.to_path_buf()),
        message: e.to_string(),
    })?;
    Ok(image.to_rgb8())
}

/// True if the path has one of [`SUPPORTED_EXTENSIONS`].
pub fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

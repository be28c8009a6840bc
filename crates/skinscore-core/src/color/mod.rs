//! Color conversions used to build the lightness/chroma decomposition.
//!
//! Provides sRGB decoding and RGB -> CIE L*a*b* (D65).

mod lab;


pub use lab::{rgb8_to_lab, rgb_to_lab, srgb_to_linear, Lab};

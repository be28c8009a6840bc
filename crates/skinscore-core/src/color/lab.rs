//! LAB (CIE L*a*b*) color space conversions

/// LAB color representation (CIE L*a*b*)
/// - L: 0.0-100.0 (lightness)
/// - a: approximately -128 to +128 (green-red axis)
/// - b: approximately -128 to +128 (blue-yellow axis)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

/// D65 standard illuminant reference white point
const D65_X: f32 = 0.95047;
const D65_Y: f32 = 1.00000;
const D65_Z: f32 = 1.08883;

/// sRGB to XYZ matrix (D65)
const SRGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.119_192, 0.9503041],
];

/// LAB f(t) function
#[inline]
fn lab_f(t: f32) -> f32 {
    const DELTA: f32 = 6.0 / 29.0;
    const DELTA_CUBED: f32 = DELTA * DELTA * DELTA; // ~0.008856

    if t > DELTA_CUBED {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

/// Decode one gamma-encoded sRGB component (0.0-1.0) to linear light.
#[inline]
pub fn srgb_to_linear(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert linear sRGB (0.0-1.0) to CIE LAB (D65 illuminant)
///
/// Output: LAB where L is 0-100, a and b are approximately -128 to +128
#[inline]
pub fn rgb_to_lab(r: f32, g: f32, b: f32) -> Lab {
    let r = r.max(0.0);
    let g = g.max(0.0);
    let b = b.max(0.0);

    let m = &SRGB_TO_XYZ;
    let x = m[0][0] * r + m[0][1] * g + m[0][2] * b;
    let y = m[1][0] * r + m[1][1] * g + m[1][2] * b;
    let z = m[2][0] * r + m[2][1] * g + m[2][2] * b;

    let fx = lab_f(x / D65_X);
    let fy = lab_f(y / D65_Y);
    let fz = lab_f(z / D65_Z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Convert an 8-bit gamma-encoded sRGB pixel to LAB.
///
/// Uses a 256-entry decoding table so whole-image conversion stays cheap.
#[inline]
pub fn rgb8_to_lab(rgb: [u8; 3]) -> Lab {
    let lut = linear_lut();
    rgb_to_lab(
        lut[rgb[0] as usize],
        lut[rgb[1] as usize],
        lut[rgb[2] as usize],
    )
}

fn linear_lut() -> &'static [f32; 256] {
    use std::sync::OnceLock;
    static LUT: OnceLock<[f32; 256]> = OnceLock::new();
    LUT.get_or_init(|| {
        let mut table = [0.0f32; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = srgb_to_linear(i as f32 / 255.0);
        }
        table
    })
}

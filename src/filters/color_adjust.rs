//! Pixel-wise color filters: Negative, Sepia, Color Remap.
//!
//! These are point operations that don't require spatial context.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1)
//! - **RGB**: (height, width, 3)
//!
//! Negative works on any channel count. Sepia needs RGB and copies
//! grayscale input unchanged. Color remap expands grayscale to RGB.

use ndarray::{Array3, ArrayView3};

// ============================================================================
// Negative
// ============================================================================

/// Invert every channel: `255 - v`.
pub fn negative_u8(input: ArrayView3<u8>) -> Array3<u8> {
    input.mapv(|v| 255 - v)
}

// ============================================================================
// Sepia
// ============================================================================

/// Sepia mixing matrix. Row `i` produces output channel `i` (red, green, blue).
pub const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.272, 0.534, 0.131],
    [0.349, 0.686, 0.168],
    [0.393, 0.769, 0.189],
];

/// Apply the sepia color-mixing matrix.
///
/// Each output channel is a weighted sum of the pixel's (R, G, B), saturated
/// to 0-255. The strongest row feeds red, giving the warm brown cast.
///
/// # Arguments
/// * `input` - Image with 1 or 3 channels (height, width, channels)
///
/// # Returns
/// Toned image with same shape
pub fn sepia_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    if channels < 3 {
        return input.to_owned();
    }

    let mut output = Array3::<u8>::zeros((height, width, channels));
    for y in 0..height {
        for x in 0..width {
            let rgb = [
                input[[y, x, 0]] as f32,
                input[[y, x, 1]] as f32,
                input[[y, x, 2]] as f32,
            ];
            for (row, weights) in SEPIA_MATRIX.iter().enumerate() {
                let v = weights[0] * rgb[0] + weights[1] * rgb[1] + weights[2] * rgb[2];
                output[[y, x, row]] = v.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
    output
}

// ============================================================================
// Color Remap (jet)
// ============================================================================

/// Jet ramp: blue through cyan, yellow to red.
fn jet(t: f32) -> [u8; 3] {
    let ramp = |center: f32| (1.5 - (4.0 * t - center).abs()).clamp(0.0, 1.0);
    [
        (ramp(3.0) * 255.0).round() as u8,
        (ramp(2.0) * 255.0).round() as u8,
        (ramp(1.0) * 255.0).round() as u8,
    ]
}

/// 256-entry jet lookup table, one RGB triple per input level.
pub fn jet_lut() -> [[u8; 3]; 256] {
    let mut lut = [[0u8; 3]; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = jet(i as f32 / 255.0);
    }
    lut
}

/// Remap colors through the jet ramp.
///
/// For RGB input each channel indexes its own column of the table, so the
/// red output comes from the red ramp evaluated at the red input, and so on.
/// Single-channel input is mapped to a full RGB jet color.
///
/// # Returns
/// RGB image (height, width, 3)
pub fn color_remap_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let lut = jet_lut();

    Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
        let src = if channels >= 3 { c } else { 0 };
        lut[input[[y, x, src]] as usize][c]
    })
}

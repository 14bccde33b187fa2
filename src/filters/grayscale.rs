//! Grayscale conversion.
//!
//! Collapses RGB to a single luminance channel using ITU-R BT.601 weights
//! (0.299, 0.587, 0.114) in 14-bit fixed point, so results are exact and
//! reproducible across platforms.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1) - returned unchanged (copied)
//! - **RGB**: (height, width, 3) - collapsed to (height, width, 1)

use ndarray::{Array3, ArrayView3};

/// BT.601 weights scaled by 2^14
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;
const LUMA_ROUND: u32 = 1 << (LUMA_SHIFT - 1);

/// Luminance of a single RGB pixel.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B + LUMA_ROUND) >> LUMA_SHIFT) as u8
}

/// Convert an image to a single luminance channel.
///
/// # Arguments
/// * `input` - Image with 1 or 3 channels (height, width, channels)
///
/// # Returns
/// Array of shape (height, width, 1)
pub fn grayscale_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    if channels < 3 {
        return input.to_owned();
    }

    let mut output = Array3::<u8>::zeros((height, width, 1));
    for y in 0..height {
        for x in 0..width {
            output[[y, x, 0]] = luma(input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]);
        }
    }
    output
}

/// Broadcast a single-channel image to 3 identical channels.
pub fn gray_to_rgb_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, _) = input.dim();
    Array3::from_shape_fn((height, width, 3), |(y, x, _)| input[[y, x, 0]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_primaries() {
        // 0.299 * 255 ≈ 76, 0.587 * 255 ≈ 150, 0.114 * 255 ≈ 29
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);
    }

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma(0, 0, 0), 0);
        assert_eq!(luma(255, 255, 255), 255);
    }

    #[test]
    fn test_grayscale_u8_collapses_channels() {
        let mut img = Array3::<u8>::zeros((2, 3, 3));
        img[[1, 2, 1]] = 255;

        let result = grayscale_u8(img.view());

        assert_eq!(result.dim(), (2, 3, 1));
        assert_eq!(result[[1, 2, 0]], 150);
        assert_eq!(result[[0, 0, 0]], 0);
    }

    #[test]
    fn test_grayscale_u8_passes_single_channel() {
        let img = Array3::<u8>::from_shape_fn((2, 2, 1), |(y, x, _)| (y * 2 + x) as u8);
        assert_eq!(grayscale_u8(img.view()), img);
    }

    #[test]
    fn test_gray_to_rgb_u8() {
        let img = Array3::<u8>::from_elem((2, 2, 1), 42);
        let result = gray_to_rgb_u8(img.view());
        assert_eq!(result.dim(), (2, 2, 3));
        assert!(result.iter().all(|&v| v == 42));
    }
}

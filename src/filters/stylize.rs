//! Stylize filters: Emboss, Adaptive Threshold.
//!
//! ## Supported Formats
//!
//! - Emboss accepts any channel count and processes channels independently.
//! - Adaptive threshold works on the first channel of its input and returns
//!   a single-channel binary image (0 or 255).

use ndarray::{Array2, Array3, ArrayView3};

use super::core::{convolve_3x3, BorderMode};

// ============================================================================
// Emboss
// ============================================================================

/// Center-weighted 3x3 kernel used by the emboss filter.
pub const EMBOSS_KERNEL: [[f32; 3]; 3] = [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]];

/// Apply the emboss kernel to every channel.
///
/// Borders are replicated and results are saturated to 0-255, so flat
/// regions are unchanged while local contrast is amplified.
pub fn emboss_u8(input: ArrayView3<u8>) -> Array3<u8> {
    convolve_3x3(input, &EMBOSS_KERNEL, BorderMode::Replicate)
}

// ============================================================================
// Adaptive Threshold
// ============================================================================

/// Mean-based adaptive threshold.
///
/// Each pixel is compared with the rounded mean of the `block_size` x
/// `block_size` neighborhood around it (replicated borders) minus `offset`:
/// pixels strictly above the local threshold become 255, others 0. Dark
/// lines on a lighter background therefore come out as 0.
///
/// # Arguments
/// * `input` - Image whose first channel is thresholded (height, width, channels)
/// * `block_size` - Neighborhood size, forced odd (9 in the cartoon edge mask)
/// * `offset` - Constant subtracted from the mean (2 in the cartoon edge mask)
///
/// # Returns
/// Binary image of shape (height, width, 1)
pub fn adaptive_threshold_mean_u8(input: ArrayView3<u8>, block_size: usize, offset: i32) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let block_size = block_size.max(1) | 1;
    let half = (block_size / 2) as isize;
    let area = (block_size * block_size) as u32;
    let border = BorderMode::Replicate;

    // Horizontal box sums
    let mut row_sums = Array2::<u32>::zeros((height, width));
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0u32;
            for dx in -half..=half {
                let sx = border.index(x as isize + dx, width);
                sum += input[[y, sx, 0]] as u32;
            }
            row_sums[[y, x]] = sum;
        }
    }

    let mut output = Array3::<u8>::zeros((height, width, 1));
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0u32;
            for dy in -half..=half {
                let sy = border.index(y as isize + dy, height);
                sum += row_sums[[sy, x]];
            }
            let mean = ((sum + area / 2) / area) as i32;
            let src = input[[y, x, 0]] as i32;
            output[[y, x, 0]] = if src > mean - offset { 255 } else { 0 };
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emboss_u8_flat_unchanged() {
        let img = Array3::<u8>::from_elem((4, 4, 3), 90);
        let result = emboss_u8(img.view());
        assert_eq!(result, img);
    }

    #[test]
    fn test_emboss_u8_saturates() {
        let mut img = Array3::<u8>::zeros((3, 3, 1));
        img[[1, 1, 0]] = 200;

        let result = emboss_u8(img.view());

        // 5 * 200 clamps to 255, neighbors go negative and clamp to 0
        assert_eq!(result[[1, 1, 0]], 255);
        assert_eq!(result[[0, 1, 0]], 0);
        assert_eq!(result[[0, 0, 0]], 0);
    }

    #[test]
    fn test_emboss_u8_replicates_border() {
        let img = Array3::<u8>::from_shape_fn((1, 3, 1), |(_, x, _)| [10, 20, 30][x]);

        let result = emboss_u8(img.view());

        // Left pixel: 5*10 - 10 (up) - 10 (down) - 10 (left, replicated) - 20 = 0
        assert_eq!(result[[0, 0, 0]], 0);
        // Right pixel: 5*30 - 30 - 30 - 20 - 30 = 40
        assert_eq!(result[[0, 2, 0]], 40);
    }

    #[test]
    fn test_adaptive_threshold_flat_is_white() {
        let img = Array3::<u8>::from_elem((12, 12, 1), 255);
        let result = adaptive_threshold_mean_u8(img.view(), 9, 2);
        assert!(result.iter().all(|&v| v == 255));

        let dark = Array3::<u8>::from_elem((12, 12, 1), 0);
        let result = adaptive_threshold_mean_u8(dark.view(), 9, 2);
        assert!(result.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_adaptive_threshold_marks_dark_line() {
        let mut img = Array3::<u8>::from_elem((15, 15, 1), 200);
        for y in 0..15 {
            img[[y, 7, 0]] = 20;
        }

        let result = adaptive_threshold_mean_u8(img.view(), 9, 2);

        assert_eq!(result[[7, 7, 0]], 0);
        assert_eq!(result[[7, 6, 0]], 255);
        assert_eq!(result[[7, 0, 0]], 255);
    }
}

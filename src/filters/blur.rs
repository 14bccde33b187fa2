//! Gaussian blur.
//!
//! Separable two-pass convolution, rows parallelized with rayon.
//! Works on any channel count; output shape equals input shape.

use ndarray::{Array3, ArrayView3};

use super::core::{convolve_separable, gaussian_kernel_1d, BorderMode};

/// Kernel size used by the catalog blur.
pub const CATALOG_BLUR_SIZE: usize = 15;

/// Apply Gaussian blur with an explicit kernel size.
///
/// # Arguments
/// * `input` - Image with any channel count (height, width, channels)
/// * `size` - Kernel size in pixels (forced odd)
/// * `sigma` - Standard deviation; `<= 0` derives it from `size`
///
/// # Returns
/// Blurred image, borders replicated
pub fn gaussian_blur_u8(input: ArrayView3<u8>, size: usize, sigma: f32) -> Array3<u8> {
    if size <= 1 {
        return input.to_owned();
    }
    let kernel = gaussian_kernel_1d(size, sigma);
    convolve_separable(input, &kernel, BorderMode::Replicate)
}

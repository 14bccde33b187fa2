//! Core utilities shared by the filters and the cartoon pipeline.
//!
//! This module provides:
//! - Border extrapolation policies
//! - Gaussian kernel generation
//! - Separable and 3x3 convolution over u8 buffers
//! - Saturating conversion back to u8

use ndarray::{Array3, ArrayView3, Axis};
use rayon::prelude::*;

/// How pixels outside the image are synthesized for neighborhood filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderMode {
    /// `aaaa|abcd|dddd`
    Replicate,
    /// `dcb|abcd|cba`, the edge pixel itself is not repeated.
    Reflect101,
}

impl BorderMode {
    /// Map a possibly out-of-range coordinate into `0..len`.
    ///
    /// `len` must be non-zero.
    #[inline]
    pub fn index(self, i: isize, len: usize) -> usize {
        let n = len as isize;
        if (0..n).contains(&i) {
            return i as usize;
        }
        match self {
            BorderMode::Replicate => i.clamp(0, n - 1) as usize,
            BorderMode::Reflect101 => {
                if n == 1 {
                    return 0;
                }
                let mut i = i;
                loop {
                    if i < 0 {
                        i = -i;
                    } else if i >= n {
                        i = 2 * (n - 1) - i;
                    } else {
                        return i as usize;
                    }
                }
            }
        }
    }
}

/// Saturating conversion with round-half-away-from-zero.
#[inline]
pub fn saturate_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Standard deviation implied by a kernel size when none is given.
///
/// `0.3 * ((size - 1) * 0.5 - 1) + 0.8`, so a 15-tap kernel gets sigma 2.6.
pub fn sigma_for_size(size: usize) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Generate a normalized 1D Gaussian kernel with an explicit tap count.
///
/// # Arguments
/// * `size` - Number of taps, forced odd
/// * `sigma` - Standard deviation; `<= 0` derives it from `size`
///
/// # Returns
/// Normalized taps summing to 1.0
pub fn gaussian_kernel_1d(size: usize, sigma: f32) -> Vec<f32> {
    let size = size.max(1) | 1;
    let sigma = if sigma > 0.0 { sigma } else { sigma_for_size(size) };
    let half = (size / 2) as f32;

    let mut kernel: Vec<f32> = (0..size)
        .map(|i| {
            let x = i as f32 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

/// Convolve every channel with the same 1D kernel, horizontally then vertically.
///
/// Rows are processed in parallel. Output has the input's shape.
pub fn convolve_separable(input: ArrayView3<u8>, taps: &[f32], border: BorderMode) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let half = (taps.len() / 2) as isize;

    // Horizontal pass, kept in f32 for precision
    let mut temp = Array3::<f32>::zeros((height, width, channels));
    temp.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for (ki, &kv) in taps.iter().enumerate() {
                        let sx = border.index(x as isize + ki as isize - half, width);
                        sum += input[[y, sx, c]] as f32 * kv;
                    }
                    row[[x, c]] = sum;
                }
            }
        });

    // Vertical pass
    let mut output = Array3::<u8>::zeros((height, width, channels));
    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for (ki, &kv) in taps.iter().enumerate() {
                        let sy = border.index(y as isize + ki as isize - half, height);
                        sum += temp[[sy, x, c]] * kv;
                    }
                    row[[x, c]] = saturate_u8(sum);
                }
            }
        });

    output
}

/// Apply a 3x3 kernel to every channel independently, saturating the result.
pub fn convolve_3x3(input: ArrayView3<u8>, kernel: &[[f32; 3]; 3], border: BorderMode) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));

    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for c in 0..channels {
                    let mut sum = 0.0f32;
                    for (ky, krow) in kernel.iter().enumerate() {
                        let sy = border.index(y as isize + ky as isize - 1, height);
                        for (kx, &kv) in krow.iter().enumerate() {
                            let sx = border.index(x as isize + kx as isize - 1, width);
                            sum += input[[sy, sx, c]] as f32 * kv;
                        }
                    }
                    row[[x, c]] = saturate_u8(sum);
                }
            }
        });

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_border_replicate() {
        assert_eq!(BorderMode::Replicate.index(-3, 5), 0);
        assert_eq!(BorderMode::Replicate.index(7, 5), 4);
        assert_eq!(BorderMode::Replicate.index(2, 5), 2);
    }

    #[test]
    fn test_border_reflect101() {
        assert_eq!(BorderMode::Reflect101.index(-1, 5), 1);
        assert_eq!(BorderMode::Reflect101.index(-2, 5), 2);
        assert_eq!(BorderMode::Reflect101.index(5, 5), 3);
        assert_eq!(BorderMode::Reflect101.index(6, 5), 2);
        assert_eq!(BorderMode::Reflect101.index(-4, 1), 0);
        // Radius wider than the image
        assert_eq!(BorderMode::Reflect101.index(5, 2), 1);
    }

    #[test]
    fn test_gaussian_kernel_normalized_and_symmetric() {
        let k = gaussian_kernel_1d(15, 0.0);
        assert_eq!(k.len(), 15);
        let sum: f32 = k.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for i in 0..7 {
            assert!((k[i] - k[14 - i]).abs() < 1e-7);
        }
        assert!(k[7] > k[6]);
    }

    #[test]
    fn test_sigma_for_size() {
        assert!((sigma_for_size(15) - 2.6).abs() < 1e-6);
        assert!((sigma_for_size(3) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_separable_preserves_flat_image() {
        let img = Array3::<u8>::from_elem((6, 9, 3), 77);
        let k = gaussian_kernel_1d(5, 1.0);
        let out = convolve_separable(img.view(), &k, BorderMode::Replicate);
        assert_eq!(out, img);
    }

    #[test]
    fn test_convolve_3x3_identity() {
        let img = Array3::<u8>::from_shape_fn((4, 5, 1), |(y, x, _)| (y * 10 + x) as u8);
        let identity = [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]];
        let out = convolve_3x3(img.view(), &identity, BorderMode::Replicate);
        assert_eq!(out, img);
    }

    #[test]
    fn test_saturate_u8() {
        assert_eq!(saturate_u8(-4.0), 0);
        assert_eq!(saturate_u8(300.0), 255);
        assert_eq!(saturate_u8(127.5), 128);
    }
}

//! Gaussian pyramid steps.
//!
//! Both directions use the 5-tap binomial kernel `[1, 4, 6, 4, 1] / 16`
//! with reflect-101 borders and exact integer arithmetic:
//! - **Down**: blur, then keep even rows and columns. `(w, h)` becomes
//!   `(ceil(w / 2), ceil(h / 2))`.
//! - **Up**: insert zero rows and columns, then blur with four times the
//!   kernel. The target size may be `2w` or `2w - 1` per axis, which lets an
//!   up step undo a down step on odd sizes exactly.

use ndarray::parallel::prelude::*;
use ndarray::{Array3, ArrayView3, Axis};

use super::core::BorderMode;

/// Integer binomial taps
const TAPS: [u32; 5] = [1, 4, 6, 4, 1];

/// Size produced by one down step.
#[inline]
pub fn down_size(width: usize, height: usize) -> (usize, usize) {
    (width.div_ceil(2), height.div_ceil(2))
}

/// Whether an up step from `src` can produce `dst` along one axis.
///
/// An empty source is never compatible.
#[inline]
pub fn up_size_compatible(src: usize, dst: usize) -> bool {
    src > 0 && (dst == src * 2 || dst == src * 2 - 1)
}

/// Halve an image: low-pass filter, then drop odd rows and columns.
///
/// # Arguments
/// * `input` - Image with any channel count (height, width, channels)
///
/// # Returns
/// Image of size `(ceil(height / 2), ceil(width / 2), channels)`
pub fn pyr_down_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (src_h, src_w, channels) = input.dim();
    let (dst_w, dst_h) = down_size(src_w, src_h);
    if src_w == 0 || src_h == 0 {
        return Array3::<u8>::zeros((dst_h, dst_w, channels));
    }
    let border = BorderMode::Reflect101;

    // Horizontal pass on even columns only
    let mut temp = Array3::<u32>::zeros((src_h, dst_w, channels));
    temp.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..dst_w {
                for c in 0..channels {
                    let mut sum = 0u32;
                    for (k, &w) in TAPS.iter().enumerate() {
                        let sx = border.index((2 * x) as isize + k as isize - 2, src_w);
                        sum += input[[y, sx, c]] as u32 * w;
                    }
                    row[[x, c]] = sum;
                }
            }
        });

    // Vertical pass on even rows only
    let mut output = Array3::<u8>::zeros((dst_h, dst_w, channels));
    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..dst_w {
                for c in 0..channels {
                    let mut sum = 0u32;
                    for (k, &w) in TAPS.iter().enumerate() {
                        let sy = border.index((2 * y) as isize + k as isize - 2, src_h);
                        sum += temp[[sy, x, c]] * w;
                    }
                    row[[x, c]] = ((sum + 128) >> 8).min(255) as u8;
                }
            }
        });

    output
}

/// Source indices and weights (out of 8) feeding output sample `o`.
#[inline]
fn up_taps(o: usize, src_len: usize, border: BorderMode) -> [(usize, u32); 3] {
    let i = (o / 2) as isize;
    if o % 2 == 0 {
        [
            (border.index(i - 1, src_len), 1),
            (border.index(i, src_len), 6),
            (border.index(i + 1, src_len), 1),
        ]
    } else {
        [
            (border.index(i, src_len), 4),
            (border.index(i + 1, src_len), 4),
            (0, 0),
        ]
    }
}

/// Double an image to exactly `width` x `height`.
///
/// # Arguments
/// * `input` - Image with any channel count (height, width, channels)
/// * `width` - Target width, `2 * src_width` or `2 * src_width - 1`
/// * `height` - Target height, `2 * src_height` or `2 * src_height - 1`
///
/// # Returns
/// Upsampled image, or `None` when the target is not reachable in one step
pub fn pyr_up_to_u8(input: ArrayView3<u8>, width: usize, height: usize) -> Option<Array3<u8>> {
    let (src_h, src_w, channels) = input.dim();
    if !up_size_compatible(src_w, width) || !up_size_compatible(src_h, height) {
        return None;
    }
    let border = BorderMode::Reflect101;

    let mut temp = Array3::<u32>::zeros((src_h, width, channels));
    temp.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                let taps = up_taps(x, src_w, border);
                for c in 0..channels {
                    row[[x, c]] = taps.iter().map(|&(sx, w)| input[[y, sx, c]] as u32 * w).sum();
                }
            }
        });

    let mut output = Array3::<u8>::zeros((height, width, channels));
    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            let taps = up_taps(y, src_h, border);
            for x in 0..width {
                for c in 0..channels {
                    let sum: u32 = taps.iter().map(|&(sy, w)| temp[[sy, x, c]] * w).sum();
                    row[[x, c]] = ((sum + 32) >> 6).min(255) as u8;
                }
            }
        });

    Some(output)
}

/// Double an image to `2 * width` x `2 * height`.
pub fn pyr_up_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (h, w, channels) = input.dim();
    pyr_up_to_u8(input, w * 2, h * 2).unwrap_or_else(|| Array3::<u8>::zeros((h * 2, w * 2, channels)))
}

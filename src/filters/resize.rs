//! Resampling: area/bilinear resize, nearest-neighbour resize, preview fitting.
//!
//! The resize is separable. Each axis picks its own method: area averaging
//! when that axis shrinks (every source pixel contributes in proportion to
//! its overlap with the destination pixel), bilinear with half-pixel centers
//! when it grows or stays the same. A same-size axis is an exact copy.

use ndarray::parallel::prelude::*;
use ndarray::{Array3, ArrayView3, Axis};

use super::core::saturate_u8;

/// Longest side of the reference preview.
pub const PREVIEW_MAX_SIDE: usize = 750;

/// Contributions of source pixels to each destination pixel along one axis.
fn axis_weights(src_len: usize, dst_len: usize) -> Vec<Vec<(usize, f32)>> {
    let scale = src_len as f64 / dst_len as f64;
    let last = src_len - 1;

    (0..dst_len)
        .map(|i| {
            if dst_len < src_len {
                // Area: source interval [start, end) covered by this pixel
                let start = i as f64 * scale;
                let end = ((i + 1) as f64 * scale).min(src_len as f64);
                let mut taps = Vec::with_capacity(scale.ceil() as usize + 1);
                let mut j = start.floor() as usize;
                while (j as f64) < end && j <= last {
                    let overlap = end.min(j as f64 + 1.0) - start.max(j as f64);
                    if overlap > 1e-9 {
                        taps.push((j, (overlap / scale) as f32));
                    }
                    j += 1;
                }
                taps
            } else {
                // Bilinear with half-pixel centers, clamped at the edges
                let fx = (i as f64 + 0.5) * scale - 0.5;
                let x0 = fx.floor();
                let a = (fx - x0) as f32;
                let i0 = (x0.max(0.0) as usize).min(last);
                let i1 = ((x0 + 1.0).max(0.0) as usize).min(last);
                if a <= 0.0 || i0 == i1 {
                    vec![(i0, 1.0)]
                } else {
                    vec![(i0, 1.0 - a), (i1, a)]
                }
            }
        })
        .collect()
}

/// Resize to exact dimensions.
///
/// # Arguments
/// * `input` - Image with any channel count (height, width, channels)
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
///
/// # Returns
/// Resampled image (height, width, channels). Empty if either the source or
/// the target has zero area.
pub fn resize_u8(input: ArrayView3<u8>, width: usize, height: usize) -> Array3<u8> {
    let (src_h, src_w, channels) = input.dim();
    if width == 0 || height == 0 || src_w == 0 || src_h == 0 {
        return Array3::<u8>::zeros((height, width, channels));
    }
    if (src_w, src_h) == (width, height) {
        return input.to_owned();
    }

    let x_taps = axis_weights(src_w, width);
    let y_taps = axis_weights(src_h, height);

    // Horizontal pass
    let mut temp = Array3::<f32>::zeros((src_h, width, channels));
    temp.axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for (x, taps) in x_taps.iter().enumerate() {
                for c in 0..channels {
                    row[[x, c]] = taps.iter().map(|&(sx, w)| input[[y, sx, c]] as f32 * w).sum();
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
            let taps = &y_taps[y];
            for x in 0..width {
                for c in 0..channels {
                    let v: f32 = taps.iter().map(|&(sy, w)| temp[[sy, x, c]] * w).sum();
                    row[[x, c]] = saturate_u8(v);
                }
            }
        });

    output
}

/// Resize by picking the nearest source pixel. Keeps binary masks binary.
pub fn resize_nearest_u8(input: ArrayView3<u8>, width: usize, height: usize) -> Array3<u8> {
    let (src_h, src_w, channels) = input.dim();
    if width == 0 || height == 0 || src_w == 0 || src_h == 0 {
        return Array3::<u8>::zeros((height, width, channels));
    }
    if (src_w, src_h) == (width, height) {
        return input.to_owned();
    }

    let sx = src_w as f64 / width as f64;
    let sy = src_h as f64 / height as f64;
    Array3::from_shape_fn((height, width, channels), |(y, x, c)| {
        let src_y = ((y as f64 * sy).floor() as usize).min(src_h - 1);
        let src_x = ((x as f64 * sx).floor() as usize).min(src_w - 1);
        input[[src_y, src_x, c]]
    })
}

/// Target size so the longer side equals `max_side`, aspect preserved.
///
/// The shorter side is truncated and never drops below one pixel.
pub fn fit_dimensions(width: usize, height: usize, max_side: usize) -> (usize, usize) {
    if width == 0 || height == 0 {
        return (width, height);
    }
    if height > width {
        let w = (max_side as f64 * (width as f64 / height as f64)) as usize;
        (w.max(1), max_side)
    } else {
        let h = (max_side as f64 * (height as f64 / width as f64)) as usize;
        (max_side, h.max(1))
    }
}

/// Scale an image so its longer side is `max_side` pixels.
pub fn fit_within(input: ArrayView3<u8>, max_side: usize) -> Array3<u8> {
    let (height, width, _) = input.dim();
    let (w, h) = fit_dimensions(width, height, max_side);
    resize_u8(input, w, h)
}

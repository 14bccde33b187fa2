//! The individual steps of the cartoon effect.
//!
//! Each step is a pure function so the pipeline can be checked piece by
//! piece. [`CartoonPipeline::render`](super::CartoonPipeline::render) chains
//! them in this order:
//!
//! 1. [`normalize`] the input to the working size
//! 2. [`simplify_colors`] on the normalized image (color branch)
//! 3. [`edge_mask`] on the normalized image (edge branch)
//! 4. [`reconcile_mask`] to the color branch's size, 3 channels
//! 5. [`composite`] both branches with a bitwise AND

use std::time::Instant;

use log::debug;
use ndarray::{Array3, ArrayView3, Zip};

use super::config::PipelineConfig;
use crate::error::{CartoonError, Result, Stage};
use crate::filters::grayscale::{gray_to_rgb_u8, grayscale_u8};
use crate::filters::noise::{bilateral_filter_u8, median_blur_u8};
use crate::filters::pyramid::{pyr_down_u8, pyr_up_to_u8};
use crate::filters::resize::{resize_nearest_u8, resize_u8};
use crate::filters::stylize::adaptive_threshold_mean_u8;

/// Median aperture applied to the luminance before thresholding.
pub const MASK_MEDIAN_APERTURE: usize = 3;
/// Neighborhood of the adaptive threshold.
pub const MASK_BLOCK_SIZE: usize = 9;
/// Constant subtracted from the local mean.
pub const MASK_OFFSET: i32 = 2;

/// Resample the input to the working resolution.
pub fn normalize(input: ArrayView3<u8>, working_size: (usize, usize)) -> Result<Array3<u8>> {
    let (width, height) = working_size;
    if width == 0 || height == 0 {
        return Err(CartoonError::render(
            Stage::Normalize,
            format!("working size {width}x{height} has no area"),
        ));
    }
    Ok(resize_u8(input, width, height))
}

/// Flatten colors: pyramid down, repeated bilateral smoothing, pyramid up.
///
/// Each up step targets the size recorded by the matching down step, so the
/// result has exactly the size of `normalized`.
pub fn simplify_colors(normalized: ArrayView3<u8>, config: &PipelineConfig) -> Result<Array3<u8>> {
    let mut current = normalized.to_owned();
    let mut sizes: Vec<(usize, usize)> = Vec::with_capacity(config.down_samples);

    let t0 = Instant::now();
    for level in 0..config.down_samples {
        let (height, width, _) = current.dim();
        if width <= 1 || height <= 1 {
            return Err(CartoonError::render(
                Stage::PyramidDown,
                format!("level {level} is {width}x{height}, too small to halve"),
            ));
        }
        sizes.push((width, height));
        current = pyr_down_u8(current.view());
    }
    debug!(
        "cartoon: pyramid down x{} -> {:?} in {:.1} ms",
        config.down_samples,
        (current.dim().1, current.dim().0),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    let params = &config.smoothing;
    if config.smoothing_passes > 0 && !(params.sigma_color.is_finite() && params.sigma_space.is_finite()) {
        return Err(CartoonError::render(
            Stage::Smoothing,
            format!(
                "bilateral sigmas must be finite, got color {} space {}",
                params.sigma_color, params.sigma_space
            ),
        ));
    }

    let t1 = Instant::now();
    for _ in 0..config.smoothing_passes {
        current = bilateral_filter_u8(current.view(), &config.smoothing);
    }
    debug!(
        "cartoon: {} bilateral passes in {:.1} ms",
        config.smoothing_passes,
        t1.elapsed().as_secs_f64() * 1000.0
    );

    let t2 = Instant::now();
    for &(width, height) in sizes.iter().rev() {
        let (src_h, src_w, _) = current.dim();
        current = pyr_up_to_u8(current.view(), width, height).ok_or_else(|| {
            CartoonError::render(
                Stage::PyramidUp,
                format!("cannot upsample {src_w}x{src_h} to {width}x{height}"),
            )
        })?;
    }
    debug!(
        "cartoon: pyramid up x{} in {:.1} ms",
        sizes.len(),
        t2.elapsed().as_secs_f64() * 1000.0
    );

    Ok(current)
}

/// Binary outline mask of the normalized image, shape (height, width, 1).
///
/// Dark lines come out as 0 and everything else as 255. The input must be a
/// non-empty RGB image.
pub fn edge_mask(normalized: ArrayView3<u8>) -> Result<Array3<u8>> {
    let (height, width, channels) = normalized.dim();
    if width == 0 || height == 0 || channels != 3 {
        return Err(CartoonError::render(
            Stage::EdgeMask,
            format!("expected a non-empty RGB image, got {width}x{height}x{channels}"),
        ));
    }
    let t0 = Instant::now();
    let gray = grayscale_u8(normalized);
    let blurred = median_blur_u8(gray.view(), MASK_MEDIAN_APERTURE);
    let mask = adaptive_threshold_mean_u8(blurred.view(), MASK_BLOCK_SIZE, MASK_OFFSET);
    debug!("cartoon: edge mask in {:.1} ms", t0.elapsed().as_secs_f64() * 1000.0);
    Ok(mask)
}

/// Bring the mask to `(width, height)` and three channels.
///
/// Nearest-neighbour resampling keeps the mask binary.
pub fn reconcile_mask(mask: ArrayView3<u8>, size: (usize, usize)) -> Result<Array3<u8>> {
    let (height, width, _) = mask.dim();
    if width == 0 || height == 0 || size.0 == 0 || size.1 == 0 {
        return Err(CartoonError::render(
            Stage::Reconcile,
            format!("cannot map a {width}x{height} mask onto {}x{}", size.0, size.1),
        ));
    }
    if (width, height) != size {
        debug!("cartoon: resizing mask {width}x{height} -> {}x{}", size.0, size.1);
        let resized = resize_nearest_u8(mask, size.0, size.1);
        return Ok(gray_to_rgb_u8(resized.view()));
    }
    Ok(gray_to_rgb_u8(mask))
}

/// Per-channel bitwise AND of the color branch and the 3-channel mask.
pub fn composite(color: ArrayView3<u8>, mask: ArrayView3<u8>) -> Result<Array3<u8>> {
    if color.dim() != mask.dim() {
        return Err(CartoonError::render(
            Stage::Composite,
            format!("color is {:?} but mask is {:?}", color.dim(), mask.dim()),
        ));
    }
    let mut output = Array3::<u8>::zeros(color.dim());
    Zip::from(&mut output)
        .and(&color)
        .and(&mask)
        .for_each(|o, &c, &m| *o = c & m);
    Ok(output)
}

//! Image buffer conventions.
//!
//! Buffers are `ndarray` arrays of shape `(height, width, channels)` with
//! `u8` samples. Color buffers are RGB (3 channels), intensity buffers have
//! a single channel.

use ndarray::{Array3, ArrayView3};

use crate::error::{CartoonError, Result};

/// Owned image buffer, shape (height, width, channels).
pub type ImageBuffer = Array3<u8>;

/// Returns `(width, height, channels)` of a buffer.
#[inline]
pub fn dimensions(image: &ArrayView3<u8>) -> (usize, usize, usize) {
    let (height, width, channels) = image.dim();
    (width, height, channels)
}

/// Build a buffer from interleaved raw samples.
///
/// # Arguments
/// * `data` - Interleaved samples, row-major (length = width * height * channels)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `channels` - 1 (intensity) or 3 (RGB)
pub fn from_raw(data: Vec<u8>, width: usize, height: usize, channels: usize) -> Result<ImageBuffer> {
    if channels != 1 && channels != 3 {
        return Err(CartoonError::InvalidInput(format!(
            "expected 1 or 3 channels, got {channels}"
        )));
    }
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| CartoonError::InvalidInput(format!("{width}x{height} overflows")))?;
    if data.len() != expected {
        return Err(CartoonError::InvalidInput(format!(
            "buffer holds {} bytes, {width}x{height}x{channels} needs {expected}",
            data.len()
        )));
    }
    Array3::from_shape_vec((height, width, channels), data)
        .map_err(|e| CartoonError::InvalidInput(e.to_string()))
}

/// Flatten a buffer into interleaved row-major samples.
pub fn into_raw(image: ImageBuffer) -> Vec<u8> {
    match image.as_slice() {
        Some(samples) => samples.to_vec(),
        None => image.iter().copied().collect(),
    }
}

/// A buffer filled with a single RGB color.
pub fn solid_rgb(width: usize, height: usize, rgb: [u8; 3]) -> ImageBuffer {
    Array3::from_shape_fn((height, width, 3), |(_, _, c)| rgb[c])
}

/// Check that a buffer is a non-empty 3-channel color image.
pub fn ensure_rgb(image: &ArrayView3<u8>) -> Result<()> {
    let (width, height, channels) = dimensions(image);
    if width == 0 || height == 0 {
        return Err(CartoonError::InvalidInput(format!(
            "degenerate dimensions {width}x{height}"
        )));
    }
    if channels != 3 {
        return Err(CartoonError::InvalidInput(format!(
            "expected a 3-channel color image, got {channels} channels"
        )));
    }
    Ok(())
}

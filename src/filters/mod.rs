//! Filter modules for image processing effects.
//!
//! ## Supported Formats
//!
//! All filters work on u8 buffers laid out as `(height, width, channels)`:
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W, 1) | u8 | Single luminance channel, 0-255 |
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//!
//! Channel count is inferred from input array dimensions.
//!
//! ## Architecture
//!
//! All filters follow these principles:
//! - **Pure** - Borrow an `ArrayView3<u8>`, return a fresh `Array3<u8>`
//! - **Size preserving** - Except the pyramid and resize steps, which exist to change size
//! - **Thread-safe** - Neighborhood filters split rows across rayon workers
//!
//! ## Filter Categories
//!
//! - **Pixel-wise**: negative, sepia, color remap, grayscale
//! - **Neighborhood**: gaussian blur, emboss, median, bilateral, adaptive threshold
//! - **Edge detection**: sobel, canny
//! - **Geometry**: resize, fit, gaussian pyramid
//! - **Catalog**: lookup of the pixel filters by display name

pub mod core;
pub mod grayscale;
pub mod color_adjust;
pub mod blur;
pub mod edge;
pub mod stylize;
pub mod noise;
pub mod resize;
pub mod pyramid;
pub mod catalog;

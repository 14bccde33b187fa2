//! WebAssembly exports for the cartoon pipeline and filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen.
//!
//! ## Buffer Layout
//!
//! Inputs are flat RGB byte arrays (length = width * height * 3), row-major.
//! Outputs are flat byte arrays; filters that produce a single channel
//! (grayscale, edges) return width * height bytes.

use wasm_bindgen::prelude::*;

use crate::cartoon::{CartoonPipeline, PipelineConfig};
use crate::error::CartoonError;
use crate::filters::catalog::FilterCatalog;
use crate::image::{from_raw, into_raw};

fn to_js_err(err: CartoonError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ============================================================================
// Cartoon Pipeline
// ============================================================================

/// Render the cartoon effect on an RGB image.
///
/// # Arguments
/// * `data` - Flat array of RGB bytes (length = width * height * 3)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `down_samples` - Pyramid levels (2 in the reference look)
/// * `smoothing_passes` - Bilateral passes (50 in the reference look)
///
/// # Returns
/// Flat array of RGB bytes at 1366x768
#[wasm_bindgen]
pub fn cartoonize_rgb_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    down_samples: usize,
    smoothing_passes: usize,
) -> Result<Vec<u8>, JsValue> {
    let input = from_raw(data.to_vec(), width, height, 3).map_err(to_js_err)?;
    let pipeline = CartoonPipeline::new(PipelineConfig::new(down_samples, smoothing_passes));
    let result = pipeline.render(input.view()).map_err(to_js_err)?;
    Ok(into_raw(result))
}

// ============================================================================
// Filter Catalog
// ============================================================================

/// Apply a named filter to an RGB image.
///
/// Unknown names return the input unchanged.
#[wasm_bindgen]
pub fn apply_filter_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    name: &str,
) -> Result<Vec<u8>, JsValue> {
    let input = from_raw(data.to_vec(), width, height, 3).map_err(to_js_err)?;
    let result = FilterCatalog::apply(input.view(), name);
    Ok(into_raw(result))
}

/// Filter names in menu order.
#[wasm_bindgen]
pub fn filter_names_wasm() -> Vec<String> {
    FilterCatalog::menu_names().iter().map(|s| s.to_string()).collect()
}

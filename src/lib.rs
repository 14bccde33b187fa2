//! Cartoonize Rust
//!
//! Turns photos into cartoon-style images and applies simple named filters,
//! with Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Buffers are `ndarray` arrays of shape (height, width, channels), u8:
//! - **Grayscale**: (height, width, 1) - single channel
//! - **RGB**: (height, width, 3) - red, green, blue
//!
//! ## Components
//! - [`CartoonPipeline`]: normalize to 1366x768, flatten colors with a
//!   gaussian pyramid and repeated bilateral filtering, then paint outlines
//!   from an adaptive-threshold edge mask.
//! - [`FilterCatalog`]: grayscale, edge detection, color remap, blur, sepia,
//!   negative and emboss, picked by display name.
//!
//! The two are independent; [`cartoonize`] chains them.

pub mod cartoon;
pub mod error;
pub mod filters;
pub mod image;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use cartoon::{cartoonize, CartoonPipeline, PipelineConfig};
pub use error::{CartoonError, Result, Stage};
pub use filters::catalog::{FilterCatalog, FilterKind};
pub use image::ImageBuffer;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::cartoon::{cartoonize, CartoonPipeline, PipelineConfig};
    use crate::error::CartoonError;
    use crate::filters::catalog::FilterCatalog;
    use crate::filters::resize::{fit_within, PREVIEW_MAX_SIDE};

    fn to_py_err(err: CartoonError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }

    // ========================================================================
    // Cartoon Pipeline
    // ========================================================================

    /// Render the cartoon effect on an RGB u8 image.
    ///
    /// Output is RGB at 1366x768.
    #[pyfunction]
    #[pyo3(signature = (image, down_samples=2, smoothing_passes=50))]
    pub fn render<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        down_samples: usize,
        smoothing_passes: usize,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = image.as_array();
        let pipeline = CartoonPipeline::new(PipelineConfig::new(down_samples, smoothing_passes));
        let result = pipeline.render(input).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Render the cartoon effect, then apply a named filter.
    #[pyfunction]
    #[pyo3(signature = (image, filter, down_samples=2, smoothing_passes=50))]
    pub fn render_with_filter<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        filter: &str,
        down_samples: usize,
        smoothing_passes: usize,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = image.as_array();
        let config = PipelineConfig::new(down_samples, smoothing_passes);
        let result = cartoonize(input, &config, filter).map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Filter Catalog
    // ========================================================================

    /// Apply a named filter. Unknown names return a copy unless `strict`.
    #[pyfunction]
    #[pyo3(signature = (image, name, strict=false))]
    pub fn apply_filter<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        name: &str,
        strict: bool,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = image.as_array();
        let result = if strict {
            FilterCatalog::try_apply(input, name).map_err(to_py_err)?
        } else {
            FilterCatalog::apply(input, name)
        };
        Ok(result.into_pyarray(py))
    }

    /// Filter names in menu order.
    #[pyfunction]
    pub fn filter_names() -> Vec<&'static str> {
        FilterCatalog::menu_names().to_vec()
    }

    // ========================================================================
    // Preview
    // ========================================================================

    /// Scale so the longer side is `max_side` pixels (750 by default).
    #[pyfunction]
    #[pyo3(signature = (image, max_side=PREVIEW_MAX_SIDE))]
    pub fn fit_preview<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        max_side: usize,
    ) -> Bound<'py, PyArray3<u8>> {
        let input = image.as_array();
        fit_within(input, max_side).into_pyarray(py)
    }

    /// Python module definition
    #[pymodule]
    pub fn cartoonize_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Cartoon pipeline
        m.add_function(wrap_pyfunction!(render, m)?)?;
        m.add_function(wrap_pyfunction!(render_with_filter, m)?)?;

        // Filters
        m.add_function(wrap_pyfunction!(apply_filter, m)?)?;
        m.add_function(wrap_pyfunction!(filter_names, m)?)?;

        // Preview
        m.add_function(wrap_pyfunction!(fit_preview, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::cartoonize_rust;

use std::time::Instant;

use log::debug;
use ndarray::{Array3, ArrayView3};

use super::config::PipelineConfig;
use super::stages::{composite, edge_mask, normalize, reconcile_mask, simplify_colors};
use crate::error::Result;
use crate::filters::catalog::FilterCatalog;
use crate::image::ensure_rgb;

/// Turns a photo into a flat-colored image with dark outlines.
pub struct CartoonPipeline {
    config: PipelineConfig,
}

impl CartoonPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Render the cartoon effect.
    ///
    /// # Arguments
    /// * `input` - RGB image (height, width, 3), any non-zero size
    ///
    /// # Returns
    /// RGB image at the working size, or an error naming the failing stage.
    /// The input is never modified.
    pub fn render(&self, input: ArrayView3<u8>) -> Result<Array3<u8>> {
        ensure_rgb(&input)?;
        let t0 = Instant::now();

        let normalized = normalize(input, self.config.working_size)?;
        debug!(
            "cartoon: normalized {:?} -> {:?}",
            (input.dim().1, input.dim().0),
            self.config.working_size
        );

        let color = simplify_colors(normalized.view(), &self.config)?;
        let mask = edge_mask(normalized.view())?;
        let (height, width, _) = color.dim();
        let mask = reconcile_mask(mask.view(), (width, height))?;
        let output = composite(color.view(), mask.view())?;

        debug!(
            "cartoon: render {}x{} in {:.1} ms",
            width,
            height,
            t0.elapsed().as_secs_f64() * 1000.0
        );
        Ok(output)
    }
}

impl Default for CartoonPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

/// Render the cartoon effect, then apply the filter called `filter`.
///
/// Unknown filter names leave the cartoon result as is.
pub fn cartoonize(input: ArrayView3<u8>, config: &PipelineConfig, filter: &str) -> Result<Array3<u8>> {
    let cartoon = CartoonPipeline::new(config.clone()).render(input)?;
    Ok(FilterCatalog::apply(cartoon.view(), filter))
}

use crate::filters::noise::BilateralParams;

/// Fixed working resolution of the cartoon pipeline (width, height).
pub const WORKING_SIZE: (usize, usize) = (1366, 768);

/// Parameters of a [`CartoonPipeline`](super::CartoonPipeline).
///
/// Fixed once the pipeline is constructed. With the `serde` feature every
/// field may be omitted from a config file and falls back to its default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PipelineConfig {
    /// Pyramid levels removed before smoothing and restored after.
    pub down_samples: usize,
    /// Bilateral passes applied at the reduced resolution.
    pub smoothing_passes: usize,
    /// Size every input is resampled to before processing.
    pub working_size: (usize, usize),
    pub smoothing: BilateralParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            down_samples: 2,
            smoothing_passes: 50,
            working_size: WORKING_SIZE,
            smoothing: BilateralParams::default(),
        }
    }
}

impl PipelineConfig {
    pub fn new(down_samples: usize, smoothing_passes: usize) -> Self {
        Self {
            down_samples,
            smoothing_passes,
            ..Self::default()
        }
    }

    pub fn with_down_samples(mut self, down_samples: usize) -> Self {
        self.down_samples = down_samples;
        self
    }

    pub fn with_smoothing_passes(mut self, smoothing_passes: usize) -> Self {
        self.smoothing_passes = smoothing_passes;
        self
    }

    pub fn with_working_size(mut self, width: usize, height: usize) -> Self {
        self.working_size = (width, height);
        self
    }

    pub fn with_smoothing(mut self, smoothing: BilateralParams) -> Self {
        self.smoothing = smoothing;
        self
    }
}

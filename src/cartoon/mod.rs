//! Cartoon effect.
//!
//! Two branches run from the same normalized image:
//! - **Color**: gaussian pyramid down, many bilateral passes, pyramid back up.
//!   Flattens shading into uniform regions while keeping region borders.
//! - **Edges**: luminance, median blur, adaptive mean threshold. Produces a
//!   binary mask where outlines are 0.
//!
//! The mask is ANDed into the color branch, painting the outlines black.

mod config;
mod pipeline;
pub mod stages;

pub use config::{PipelineConfig, WORKING_SIZE};
pub use pipeline::{cartoonize, CartoonPipeline};

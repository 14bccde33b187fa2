//! Error types for the cartoon pipeline and filter catalog.
//!
//! Filters in the catalog are total and never fail on a well-formed buffer.
//! Only the cartoon pipeline and the strict catalog lookups return errors.

use std::fmt;

/// Named stage of the cartoon pipeline, reported on render failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Normalize,
    PyramidDown,
    Smoothing,
    PyramidUp,
    EdgeMask,
    Reconcile,
    Composite,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Normalize => "normalize",
            Stage::PyramidDown => "pyramid-down",
            Stage::Smoothing => "smoothing",
            Stage::PyramidUp => "pyramid-up",
            Stage::EdgeMask => "edge-mask",
            Stage::Reconcile => "reconcile",
            Stage::Composite => "composite",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CartoonError {
    /// Degenerate dimensions, wrong channel count or raw length mismatch.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("render failed at stage {stage}: {reason}")]
    RenderFailure { stage: Stage, reason: String },

    /// Only produced by the strict lookups (`FromStr`, `try_apply`).
    #[error("unknown filter: {0:?}")]
    UnknownFilter(String),
}

impl CartoonError {
    pub(crate) fn render(stage: Stage, reason: impl Into<String>) -> Self {
        CartoonError::RenderFailure {
            stage,
            reason: reason.into(),
        }
    }

    /// The failing stage, if this is a render failure.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            CartoonError::RenderFailure { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CartoonError>;

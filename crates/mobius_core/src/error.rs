use thiserror::Error;

use crate::singularity::DegeneracyKind;

/// Errors produced by the geometry pipeline.
///
/// Configuration errors are rejected before any computation starts.
/// Degeneracy errors are fatal for the given grid/twist combination:
/// retrying with the same inputs reproduces the same singularity, so the
/// remedy is to change the resolution, twist, or domain bounds.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error(
        "degenerate {kind} at grid point ({row}, {col}): |{value:e}| is below tolerance {epsilon:e}"
    )]
    Degenerate {
        kind: DegeneracyKind,
        row: usize,
        col: usize,
        value: f64,
        epsilon: f64,
    },

    #[error("non-finite {kind} at grid point ({row}, {col})")]
    NonFinite {
        kind: DegeneracyKind,
        row: usize,
        col: usize,
    },
}

impl GeometryError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        GeometryError::InvalidConfig {
            reason: reason.into(),
        }
    }
}

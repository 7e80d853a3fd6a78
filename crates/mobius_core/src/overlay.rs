//! Scalar overlays handed to the renderer.
//!
//! The renderer selects overlays through this closed enumeration rather
//! than open-ended string keys, and picks its color scale from the
//! field's sign range: diverging when the values straddle zero,
//! sequential otherwise.

use serde::{Deserialize, Serialize};

use crate::field::ScalarField;
use crate::pipeline::PipelineOutput;

/// The named scalar fields a renderer may drape over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayKind {
    /// |H| of the projected surface.
    AbsMeanCurvature,
    /// Extrinsic Gaussian curvature K_R3.
    GaussianCurvature,
    /// Conformal scale of the stereographic map.
    ScaleFactor,
    /// K_S3 - K_R3: how much the projection distorts Gaussian curvature.
    CurvatureDifference,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorScale {
    Diverging,
    Sequential,
}

/// Explicit mapping from overlay kind to scalar field.
pub fn overlay_field(output: &PipelineOutput, kind: OverlayKind) -> ScalarField {
    let curvature = &output.curvature;
    match kind {
        OverlayKind::AbsMeanCurvature => {
            let h = &curvature.mean_curvature;
            ScalarField::from_fn(h.rows(), h.cols(), |i, j| h.get(i, j).abs())
        }
        OverlayKind::GaussianCurvature => curvature.gaussian_curvature.clone(),
        OverlayKind::ScaleFactor => curvature.scale_factor.clone(),
        OverlayKind::CurvatureDifference => {
            let k_s3 = &output.k_s3;
            let k_r3 = &curvature.gaussian_curvature;
            ScalarField::from_fn(k_s3.rows(), k_s3.cols(), |i, j| {
                k_s3.get(i, j) - k_r3.get(i, j)
            })
        }
    }
}

/// Diverging scales need a meaningful center; use one only when the field
/// actually crosses zero.
pub fn color_scale(field: &ScalarField) -> ColorScale {
    if field.min() < 0.0 && field.max() > 0.0 {
        ColorScale::Diverging
    } else {
        ColorScale::Sequential
    }
}

//! End-to-end geometry pipeline: grid -> S^3 surface -> stereographic
//! projection -> curvature, with validation up front and the singularity
//! guard consulted at every guarded denominator.
//!
//! The pipeline is purely functional over its inputs: identical
//! configurations produce identical outputs, and independent runs share
//! no state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::curvature::{curvature_r3, gaussian_curvature_s3, CurvatureData};
use crate::error::GeometryError;
use crate::field::{PointField, ScalarField};
use crate::grid::GridSpec;
use crate::projection::stereographic_projection;
use crate::singularity::SingularityGuard;
use crate::surface::sudanese_surface;

/// Full configuration of one pipeline run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub grid: GridSpec,
    /// 0.5 is the Mobius strip, 1.0 the flat torus.
    pub twist: f64,
    /// Absolute tolerance below which a guarded denominator is degenerate.
    pub singularity_epsilon: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            twist: 0.5,
            singularity_epsilon: 1e-8,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.grid.validate()?;
        if !self.twist.is_finite() {
            return Err(GeometryError::invalid_config(format!(
                "twist must be finite, got {}",
                self.twist
            )));
        }
        if !(self.singularity_epsilon > 0.0 && self.singularity_epsilon.is_finite()) {
            return Err(GeometryError::invalid_config(format!(
                "singularity_epsilon must be positive and finite, got {}",
                self.singularity_epsilon
            )));
        }
        Ok(())
    }
}

/// Projected surface in the flat layout the renderer consumes: row-major
/// xyz triples, `positions.len() == rows * cols * 3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceGeometry {
    pub rows: usize,
    pub cols: usize,
    pub positions: Vec<f64>,
}

impl SurfaceGeometry {
    fn from_points(points: &PointField<3>) -> Self {
        let mut positions = Vec::with_capacity(points.rows() * points.cols() * 3);
        for i in 0..points.rows() {
            for j in 0..points.cols() {
                let p = points.get(i, j);
                positions.extend_from_slice(&[p[0], p[1], p[2]]);
            }
        }
        Self {
            rows: points.rows(),
            cols: points.cols(),
            positions,
        }
    }
}

/// Everything a renderer needs from one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub surface: SurfaceGeometry,
    pub curvature: CurvatureData,
    /// Intrinsic Gaussian curvature within S^3, for the difference
    /// overlay against the extrinsic value.
    pub k_s3: ScalarField,
}

/// Runs the whole pipeline for one configuration.
pub fn run(config: &PipelineConfig) -> Result<PipelineOutput> {
    config.validate().context("configuration rejected")?;
    let guard = SingularityGuard::new(config.singularity_epsilon);
    let (du, dv) = (config.grid.du(), config.grid.dv());

    let surface = sudanese_surface(&config.grid, config.twist);

    let k_s3 = gaussian_curvature_s3(&surface, du, dv, &guard)
        .context("intrinsic curvature in S^3 failed")?;

    let projection = stereographic_projection(&surface, &guard)
        .context("stereographic projection failed")?;

    let curvature = curvature_r3(&projection.points, &projection.scale, du, dv, &guard)
        .context("extrinsic curvature in R^3 failed")?;

    Ok(PipelineOutput {
        surface: SurfaceGeometry::from_points(&projection.points),
        curvature,
        k_s3,
    })
}

#[cfg(test)]
mod tests {
    use super::{run, PipelineConfig};
    use crate::grid::GridSpec;

    fn config(resolution: usize, twist: f64) -> PipelineConfig {
        PipelineConfig {
            grid: GridSpec {
                resolution,
                ..GridSpec::default()
            },
            twist,
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn rejects_invalid_configuration_before_computing() {
        let mut bad = config(2, 0.5);
        let err = run(&bad).expect_err("resolution 2 must be rejected");
        assert!(format!("{err:#}").contains("resolution must be at least 3"));

        bad = config(50, f64::NAN);
        let err = run(&bad).expect_err("NaN twist must be rejected");
        assert!(format!("{err:#}").contains("twist must be finite"));

        bad = config(50, 0.5);
        bad.singularity_epsilon = 0.0;
        let err = run(&bad).expect_err("zero epsilon must be rejected");
        assert!(format!("{err:#}").contains("singularity_epsilon"));
    }

    // Resolution 50, default domain, twist 0.5 runs clean; the strip is
    // not umbilic, and the scale factor is strictly positive.
    #[test]
    fn mobius_strip_scenario_at_resolution_50() {
        let output = run(&config(50, 0.5)).expect("Mobius scenario should succeed");

        let h = &output.curvature.mean_curvature;
        assert!(h.min() < 0.0, "mean curvature should reach below zero");
        assert!(h.max() > 0.0, "mean curvature should reach above zero");

        let scale = &output.curvature.scale_factor;
        assert!(scale.min() > 0.0, "scale factor must be strictly positive");

        assert_eq!(output.surface.positions.len(), 50 * 50 * 3);
        assert_eq!(output.k_s3.rows(), 50);
        for value in output.k_s3.values() {
            assert!(value.is_finite());
        }
    }

    #[test]
    fn identical_configurations_give_identical_outputs() {
        let cfg = config(40, 0.5);
        let first = run(&cfg).expect("first run should succeed");
        let second = run(&cfg).expect("second run should succeed");
        assert_eq!(first, second);
    }

    #[test]
    fn torus_configuration_runs_clean() {
        run(&config(50, 1.0)).expect("torus case should succeed");
    }
}

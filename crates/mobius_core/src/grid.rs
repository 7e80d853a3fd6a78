use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// Uniform discretization of the (u, v) parameter rectangle.
///
/// Immutable once constructed. Both ranges are sampled inclusively, so
/// the spacing is `(max - min) / (resolution - 1)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GridSpec {
    pub resolution: usize,
    pub u_min: f64,
    pub u_max: f64,
    pub v_min: f64,
    pub v_max: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            resolution: 200,
            u_min: -0.5 * std::f64::consts::PI,
            u_max: 0.5 * std::f64::consts::PI,
            v_min: 0.0,
            v_max: 2.0 * std::f64::consts::PI,
        }
    }
}

impl GridSpec {
    /// Rejects grids on which the second-order stencils are not defined.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.resolution < 3 {
            return Err(GeometryError::invalid_config(format!(
                "resolution must be at least 3 for second-order stencils, got {}",
                self.resolution
            )));
        }
        for (name, value) in [
            ("u_min", self.u_min),
            ("u_max", self.u_max),
            ("v_min", self.v_min),
            ("v_max", self.v_max),
        ] {
            if !value.is_finite() {
                return Err(GeometryError::invalid_config(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.u_min >= self.u_max {
            return Err(GeometryError::invalid_config(format!(
                "u range is inverted or empty: [{}, {}]",
                self.u_min, self.u_max
            )));
        }
        if self.v_min >= self.v_max {
            return Err(GeometryError::invalid_config(format!(
                "v range is inverted or empty: [{}, {}]",
                self.v_min, self.v_max
            )));
        }
        Ok(())
    }

    pub fn u(&self) -> Vec<f64> {
        linspace(self.u_min, self.u_max, self.resolution)
    }

    pub fn v(&self) -> Vec<f64> {
        linspace(self.v_min, self.v_max, self.resolution)
    }

    pub fn du(&self) -> f64 {
        (self.u_max - self.u_min) / (self.resolution - 1) as f64
    }

    pub fn dv(&self) -> f64 {
        (self.v_max - self.v_min) / (self.resolution - 1) as f64
    }
}

/// `n` samples linearly spaced over `[a, b]`, inclusive of both endpoints.
fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    let step = (b - a) / (n - 1) as f64;
    let mut samples: Vec<f64> = (0..n).map(|i| a + step * i as f64).collect();
    // Pin the last sample to the exact upper bound.
    samples[n - 1] = b;
    samples
}

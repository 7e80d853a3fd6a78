//! Degeneracy detection for quantities that appear in denominators.
//!
//! Curvature is undefined wherever the metric determinant or the raw
//! normal length vanishes, and the stereographic projection is undefined
//! at the pole. The guard fails loudly on the first offending sample
//! instead of substituting a small constant, which would hide the
//! singularity rather than report it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::field::ScalarField;

/// Which guarded quantity fell below tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DegeneracyKind {
    /// `1 - x4` in the stereographic projection; zero at the pole.
    ProjectionDenominator,
    /// `EG - F^2` of a first fundamental form.
    MetricDeterminant,
    /// Length of the surface normal before normalization.
    NormalLength,
}

impl fmt::Display for DegeneracyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DegeneracyKind::ProjectionDenominator => "projection denominator",
            DegeneracyKind::MetricDeterminant => "metric determinant",
            DegeneracyKind::NormalLength => "normal length",
        };
        f.write_str(name)
    }
}

/// Checks denominator fields against an absolute tolerance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SingularityGuard {
    pub epsilon: f64,
}

impl Default for SingularityGuard {
    fn default() -> Self {
        Self { epsilon: 1e-8 }
    }
}

impl SingularityGuard {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    /// Fails on the first sample that is non-finite or smaller in
    /// magnitude than the tolerance. Non-finite values are classified as
    /// degeneracies rather than masked with fallback values.
    pub fn check(&self, kind: DegeneracyKind, field: &ScalarField) -> Result<(), GeometryError> {
        for row in 0..field.rows() {
            for col in 0..field.cols() {
                let value = field.get(row, col);
                if !value.is_finite() {
                    return Err(GeometryError::NonFinite { kind, row, col });
                }
                if value.abs() < self.epsilon {
                    return Err(GeometryError::Degenerate {
                        kind,
                        row,
                        col,
                        value,
                        epsilon: self.epsilon,
                    });
                }
            }
        }
        Ok(())
    }
}

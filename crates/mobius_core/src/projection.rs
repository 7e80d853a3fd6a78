//! Stereographic projection from S^3 into R^3 and its conformal scale.

use nalgebra::{Matrix3, Vector3};

use crate::error::GeometryError;
use crate::field::{PointField, ScalarField};
use crate::singularity::{DegeneracyKind, SingularityGuard};

/// Projected surface together with the local conformal scale of the map.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub points: PointField<3>,
    /// Ratio of R^3 to S^3 infinitesimal lengths, `1 / (1 - x4)`.
    /// Strictly positive everywhere the projection is defined; diverges
    /// as a point approaches the pole.
    pub scale: ScalarField,
}

/// Fixed 45-degree rotation in the last two axes, applied to the
/// projected points purely for display-axis alignment. Orientation only;
/// it does not affect curvature.
pub fn display_rotation() -> Matrix3<f64> {
    let s = std::f64::consts::FRAC_1_SQRT_2;
    Matrix3::new(
        1.0, 0.0, 0.0, //
        0.0, s, -s, //
        0.0, s, s,
    )
}

/// Projects an S^3 point field through the pole `x4 = 1`.
///
/// The denominator field `1 - x4` is checked by the guard before any
/// division: a sample near the pole is a hard degeneracy error naming the
/// grid indices, never a silently substituted constant.
pub fn stereographic_projection(
    x: &PointField<4>,
    guard: &SingularityGuard,
) -> Result<Projection, GeometryError> {
    let denom = ScalarField::from_fn(x.rows(), x.cols(), |i, j| 1.0 - x.get(i, j)[3]);
    guard.check(DegeneracyKind::ProjectionDenominator, &denom)?;

    let rotation = display_rotation();
    let points = PointField::from_fn(x.rows(), x.cols(), |i, j| {
        let p = x.get(i, j);
        rotation * (Vector3::new(p[0], p[1], p[2]) / denom.get(i, j))
    });
    let scale = ScalarField::from_fn(x.rows(), x.cols(), |i, j| 1.0 / denom.get(i, j));

    Ok(Projection { points, scale })
}

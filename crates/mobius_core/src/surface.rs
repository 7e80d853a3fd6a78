//! Parameterization of the Sudanese Mobius family on the unit 3-sphere.

use nalgebra::{Matrix4, Vector4};

use crate::field::PointField;
use crate::grid::GridSpec;

/// The fixed orthogonal rotation applied after parameterization. It moves
/// the surface away from the projection pole so that no sampled point has
/// fourth coordinate equal to 1.
pub fn pole_shift_rotation() -> Matrix4<f64> {
    0.5 * Matrix4::new(
        1.0, -1.0, -1.0, -1.0, //
        1.0, 1.0, -1.0, 1.0, //
        1.0, 1.0, 1.0, -1.0, //
        1.0, -1.0, 1.0, 1.0,
    )
}

/// Samples the twist-parameterized surface family over the grid.
///
/// `twist = 0.5` yields the Mobius strip; `twist = 1.0` degenerates to a
/// flat torus. Every returned point lies on the unit sphere in 4-space:
/// the raw parameterization is unit-norm by trigonometric identity and
/// the pole-shift rotation is orthogonal.
pub fn sudanese_surface(grid: &GridSpec, twist: f64) -> PointField<4> {
    let us = grid.u();
    let vs = grid.v();
    let rotation = pole_shift_rotation();
    PointField::from_fn(grid.resolution, grid.resolution, |i, j| {
        let (u, v) = (us[i], vs[j]);
        let raw = Vector4::new(
            u.cos() * v.cos(),
            u.cos() * v.sin(),
            u.sin() * (twist * v).cos(),
            u.sin() * (twist * v).sin(),
        );
        rotation * raw
    })
}

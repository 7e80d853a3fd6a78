//! Fundamental forms and curvature, computed twice: intrinsically for the
//! surface embedded in S^3 and extrinsically for its stereographic image
//! in R^3.
//!
//! The two computations share the input fields and the finite-difference
//! stencils of [`crate::field`], and nothing else. Keeping them
//! independent is deliberate: the difference `K_S3 - K_R3` quantifies how
//! much the projection distorts Gaussian curvature, and a bug in one
//! pipeline must not silently cancel in that comparison.

use nalgebra::{Matrix3, Vector4};
use serde::Serialize;

use crate::error::GeometryError;
use crate::field::{PointField, ScalarField};
use crate::singularity::{DegeneracyKind, SingularityGuard};

/// Per-point curvature of the projected surface, tied to the grid and
/// twist it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvatureData {
    pub mean_curvature: ScalarField,
    pub gaussian_curvature: ScalarField,
    /// Conformal scale of the projection, passed through for overlays.
    pub scale_factor: ScalarField,
}

/// Intrinsic Gaussian curvature of the surface as seen from within S^3.
///
/// The ambient space has constant curvature +1, so by the Gauss equation
/// `K_S3 = (LN - M^2) / (EG - F^2) + 1`. The ambient term is added after
/// the metric division; near-singular determinants are rejected by the
/// guard before the division happens.
pub fn gaussian_curvature_s3(
    x: &PointField<4>,
    du: f64,
    dv: f64,
    guard: &SingularityGuard,
) -> Result<ScalarField, GeometryError> {
    let xu = x.partial_u(du);
    let xv = x.partial_v(dv);
    let xuu = xu.partial_u(du);
    let xvv = xv.partial_v(dv);
    let (uv, vu) = mixed_partials(&xu, &xv, du, dv);
    let xuv = average(&uv, &vu);

    let raw_normal = PointField::from_fn(x.rows(), x.cols(), |i, j| {
        ambient_normal(&x.get(i, j), &xu.get(i, j), &xv.get(i, j))
    });
    let normal = guarded_unit_normal(&raw_normal, guard)?;

    let (e, f, g) = first_forms(&xu, &xv);
    let det = metric_determinant(&e, &f, &g, guard)?;
    let (l, m, n) = second_forms(&xuu, &xuv, &xvv, &normal);

    Ok(ScalarField::from_fn(x.rows(), x.cols(), |i, j| {
        (l.get(i, j) * n.get(i, j) - m.get(i, j) * m.get(i, j)) / det.get(i, j) + 1.0
    }))
}

/// Mean and Gaussian curvature of the projected surface in R^3, by
/// classical surface theory.
pub fn curvature_r3(
    c: &PointField<3>,
    scale: &ScalarField,
    du: f64,
    dv: f64,
    guard: &SingularityGuard,
) -> Result<CurvatureData, GeometryError> {
    let cu = c.partial_u(du);
    let cv = c.partial_v(dv);
    let cuu = cu.partial_u(du);
    let cvv = cv.partial_v(dv);
    let (uv, vu) = mixed_partials(&cu, &cv, du, dv);
    let cuv = average(&uv, &vu);

    let raw_normal =
        PointField::from_fn(c.rows(), c.cols(), |i, j| cu.get(i, j).cross(&cv.get(i, j)));
    let normal = guarded_unit_normal(&raw_normal, guard)?;

    let (e, f, g) = first_forms(&cu, &cv);
    let det = metric_determinant(&e, &f, &g, guard)?;
    let (l, m, n) = second_forms(&cuu, &cuv, &cvv, &normal);

    let mean_curvature = ScalarField::from_fn(c.rows(), c.cols(), |i, j| {
        (l.get(i, j) * g.get(i, j) - 2.0 * m.get(i, j) * f.get(i, j)
            + n.get(i, j) * e.get(i, j))
            / (2.0 * det.get(i, j))
    });
    let gaussian_curvature = ScalarField::from_fn(c.rows(), c.cols(), |i, j| {
        (l.get(i, j) * n.get(i, j) - m.get(i, j) * m.get(i, j)) / det.get(i, j)
    });

    Ok(CurvatureData {
        mean_curvature,
        gaussian_curvature,
        scale_factor: scale.clone(),
    })
}

/// The two one-sided estimates of the mixed second partial. Discretization
/// makes them differ by the truncation error, so consumers average them
/// instead of trusting either one.
pub(crate) fn mixed_partials<const D: usize>(
    fu: &PointField<D>,
    fv: &PointField<D>,
    du: f64,
    dv: f64,
) -> (PointField<D>, PointField<D>) {
    (fu.partial_v(dv), fv.partial_u(du))
}

fn average<const D: usize>(a: &PointField<D>, b: &PointField<D>) -> PointField<D> {
    PointField::from_fn(a.rows(), a.cols(), |i, j| {
        0.5 * (a.get(i, j) + b.get(i, j))
    })
}

/// Normal to the surface within S^3, in the ambient 4-space: the point
/// itself, x_u, and x_v span the tangent 3-flat, and the normal components
/// are the 3x3 minors over each coordinate-axis triple with alternating
/// sign.
fn ambient_normal(x: &Vector4<f64>, xu: &Vector4<f64>, xv: &Vector4<f64>) -> Vector4<f64> {
    let minor = |a: usize, b: usize, c: usize| {
        Matrix3::new(
            x[a], x[b], x[c], //
            xu[a], xu[b], xu[c], //
            xv[a], xv[b], xv[c],
        )
        .determinant()
    };
    Vector4::new(
        minor(1, 2, 3),
        -minor(0, 2, 3),
        minor(0, 1, 3),
        -minor(0, 1, 2),
    )
}

fn guarded_unit_normal<const D: usize>(
    raw: &PointField<D>,
    guard: &SingularityGuard,
) -> Result<PointField<D>, GeometryError> {
    let length = ScalarField::from_fn(raw.rows(), raw.cols(), |i, j| raw.get(i, j).norm());
    guard.check(DegeneracyKind::NormalLength, &length)?;
    Ok(PointField::from_fn(raw.rows(), raw.cols(), |i, j| {
        raw.get(i, j) / length.get(i, j)
    }))
}

fn first_forms<const D: usize>(
    fu: &PointField<D>,
    fv: &PointField<D>,
) -> (ScalarField, ScalarField, ScalarField) {
    let e = dot(fu, fu);
    let f = dot(fu, fv);
    let g = dot(fv, fv);
    (e, f, g)
}

fn metric_determinant(
    e: &ScalarField,
    f: &ScalarField,
    g: &ScalarField,
    guard: &SingularityGuard,
) -> Result<ScalarField, GeometryError> {
    let det = ScalarField::from_fn(e.rows(), e.cols(), |i, j| {
        e.get(i, j) * g.get(i, j) - f.get(i, j) * f.get(i, j)
    });
    guard.check(DegeneracyKind::MetricDeterminant, &det)?;
    Ok(det)
}

fn second_forms<const D: usize>(
    fuu: &PointField<D>,
    fuv: &PointField<D>,
    fvv: &PointField<D>,
    normal: &PointField<D>,
) -> (ScalarField, ScalarField, ScalarField) {
    let l = dot(fuu, normal);
    let m = dot(fuv, normal);
    let n = dot(fvv, normal);
    (l, m, n)
}

fn dot<const D: usize>(a: &PointField<D>, b: &PointField<D>) -> ScalarField {
    ScalarField::from_fn(a.rows(), a.cols(), |i, j| {
        a.get(i, j).dot(&b.get(i, j))
    })
}

#[cfg(test)]
mod tests {
    use super::{curvature_r3, gaussian_curvature_s3, mixed_partials};
    use crate::field::{PointField, ScalarField};
    use crate::grid::GridSpec;
    use crate::projection::stereographic_projection;
    use crate::singularity::SingularityGuard;
    use crate::surface::sudanese_surface;
    use nalgebra::Vector3;

    fn grid(resolution: usize) -> GridSpec {
        GridSpec {
            resolution,
            ..GridSpec::default()
        }
    }

    /// Largest magnitude over interior samples, `margin` rows/cols away
    /// from the boundary.
    fn interior_max_abs(field: &ScalarField, margin: usize) -> f64 {
        let mut max = 0.0_f64;
        for i in margin..field.rows() - margin {
            for j in margin..field.cols() - margin {
                max = max.max(field.get(i, j).abs());
            }
        }
        max
    }

    // For twist = 1 the parameterization is the flat torus: E = G = 1,
    // F = 0, so the intrinsic Gaussian curvature within S^3 is exactly
    // zero and the finite-difference result must vanish.
    #[test]
    fn flat_torus_has_vanishing_intrinsic_curvature() {
        let grid = grid(81);
        let guard = SingularityGuard::default();
        let surface = sudanese_surface(&grid, 1.0);
        let k_s3 = gaussian_curvature_s3(&surface, grid.du(), grid.dv(), &guard)
            .expect("flat torus should be non-degenerate");
        let worst = interior_max_abs(&k_s3, 3);
        assert!(worst < 1e-6, "interior |K_S3| should vanish, got {worst}");
    }

    // Richardson check on the Mobius strip: resolutions 41, 81 and 161
    // sample coincident parameter points, so the change between
    // successive refinements estimates the truncation error. Halving the
    // spacing should roughly quarter it; require at least a factor of
    // two.
    #[test]
    fn intrinsic_curvature_converges_at_second_order() {
        let guard = SingularityGuard::default();
        let k_s3_at = |resolution: usize| {
            let grid = grid(resolution);
            let surface = sudanese_surface(&grid, 0.5);
            gaussian_curvature_s3(&surface, grid.du(), grid.dv(), &guard)
                .expect("Mobius strip should be non-degenerate")
        };
        let shared_diff = |coarse: &ScalarField, fine: &ScalarField, margin: usize| {
            let mut worst = 0.0_f64;
            for i in margin..coarse.rows() - margin {
                for j in margin..coarse.cols() - margin {
                    worst = worst.max((coarse.get(i, j) - fine.get(2 * i, 2 * j)).abs());
                }
            }
            worst
        };

        let (coarse, medium, fine) = (k_s3_at(41), k_s3_at(81), k_s3_at(161));
        let d1 = shared_diff(&coarse, &medium, 3);
        let d2 = shared_diff(&medium, &fine, 6);
        assert!(
            d2 < d1 / 2.0,
            "expected second-order decay, got {d1} -> {d2}"
        );
    }

    // The projected torus bends like a torus of revolution: Gaussian
    // curvature positive on the outer band and negative on the inner one,
    // so both signs must be well represented.
    #[test]
    fn projected_torus_has_both_curvature_signs() {
        let grid = grid(81);
        let guard = SingularityGuard::default();
        let surface = sudanese_surface(&grid, 1.0);
        let projection =
            stereographic_projection(&surface, &guard).expect("projection should succeed");
        let curvature = curvature_r3(
            &projection.points,
            &projection.scale,
            grid.du(),
            grid.dv(),
            &guard,
        )
        .expect("projected torus should be non-degenerate");

        let margin = 3;
        let (mut positive, mut negative, mut total) = (0usize, 0usize, 0usize);
        for i in margin..grid.resolution - margin {
            for j in margin..grid.resolution - margin {
                let k = curvature.gaussian_curvature.get(i, j);
                if k > 0.0 {
                    positive += 1;
                } else if k < 0.0 {
                    negative += 1;
                }
                total += 1;
            }
        }
        assert!(
            positive * 10 > total && negative * 10 > total,
            "expected both bands, got {positive} positive / {negative} negative of {total}"
        );
    }

    #[test]
    fn mixed_partial_estimates_agree_to_discretization_order() {
        let grid = grid(101);
        let guard = SingularityGuard::default();
        let surface = sudanese_surface(&grid, 0.5);
        let projection =
            stereographic_projection(&surface, &guard).expect("projection should succeed");
        let cu = projection.points.partial_u(grid.du());
        let cv = projection.points.partial_v(grid.dv());
        let (uv, vu) = mixed_partials(&cu, &cv, grid.du(), grid.dv());

        let mut worst_mismatch = 0.0_f64;
        let mut largest_value = 0.0_f64;
        let margin = 2;
        for i in margin..grid.resolution - margin {
            for j in margin..grid.resolution - margin {
                worst_mismatch = worst_mismatch.max((uv.get(i, j) - vu.get(i, j)).norm());
                largest_value = largest_value.max(uv.get(i, j).norm());
            }
        }
        assert!(
            worst_mismatch < 0.05 * largest_value,
            "mixed partials disagree: {worst_mismatch} vs field magnitude {largest_value}"
        );
    }

    #[test]
    fn degenerate_parameterization_is_rejected() {
        // A constant field has vanishing partials, hence a singular
        // metric; the guard must name the metric determinant, not emit
        // NaN curvature.
        let constant = PointField::from_fn(5, 5, |_, _| Vector3::new(1.0, 2.0, 3.0));
        let scale = ScalarField::from_fn(5, 5, |_, _| 1.0);
        let err = curvature_r3(&constant, &scale, 0.1, 0.1, &SingularityGuard::default())
            .expect_err("constant field must be degenerate");
        let message = format!("{err}");
        assert!(
            message.contains("normal length") || message.contains("metric determinant"),
            "got \"{message}\""
        );
    }
}

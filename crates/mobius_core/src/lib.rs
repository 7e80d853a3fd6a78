/// The `mobius_core` crate computes the differential geometry of the
/// Sudanese Mobius strip: a twist-parameterized surface family on the
/// unit 3-sphere, stereographically projected into R^3.
///
/// Key components:
/// - **Grid**: uniform (u, v) parameter grid with validated spacing.
/// - **Surface**: the S^3 parameterization and its pole-shift rotation.
/// - **Projection**: stereographic map into R^3 with its conformal scale.
/// - **Curvature**: fundamental forms and mean/Gaussian curvature,
///   derived independently in S^3 (intrinsic) and R^3 (extrinsic).
/// - **Singularity guard**: hard failure on near-degenerate metric,
///   normal, or projection denominators.
/// - **Pipeline/Overlay**: one-call orchestration and the scalar fields
///   handed to an external renderer.
pub mod curvature;
pub mod error;
pub mod field;
pub mod grid;
pub mod overlay;
pub mod pipeline;
pub mod projection;
pub mod singularity;
pub mod surface;

pub use curvature::CurvatureData;
pub use error::GeometryError;
pub use grid::GridSpec;
pub use pipeline::{run, PipelineConfig, PipelineOutput};
pub use singularity::SingularityGuard;

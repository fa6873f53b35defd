//! # Primitives
//!
//! Parametric solid builders. Each takes a validated parameter record and
//! returns a [`Mesh`] whose vertex and face counts match the record's
//! declared counts, with faces wound so normals point outward.
//!
//! Rings run counter-clockwise seen from +Z. A ring fanned to an apex above
//! it faces up; a strip bridged from an upper ring to a lower one faces
//! outward.

mod diamond;
mod gem;
mod spindle;
mod star;
mod surface;
mod torus;
mod triangle;
mod wedge;

pub use diamond::{diamond, DiamondParams};
pub use gem::{gem, GemParams};
pub use spindle::{spindle, SpindleParams};
pub use star::{star, StarParams};
pub use surface::{function_surface, function_surface_with, FunctionSurfaceParams};
pub use torus::{twisted_torus, TwistedTorusParams};
pub use triangle::{triangle, TriangleKind, TriangleParams, TriangleTopology};
pub use wedge::{wedge, WedgeParams};

use crate::error::{KernelError, KernelResult};
use crate::mesh::Mesh;
use config::constants::MAX_VERTICES;
use std::f64::consts::TAU;

/// Parameter record of a primitive builder.
pub trait PrimitiveParams {
    /// Builder name, for diagnostics.
    const NAME: &'static str;

    /// Checks every parameter against its declared range.
    fn validate(&self) -> KernelResult<()>;

    /// Number of vertices [`PrimitiveParams::build`] will emit.
    fn vertex_count(&self) -> usize;

    /// Number of faces [`PrimitiveParams::build`] will emit.
    fn face_count(&self) -> usize;

    /// Builds the mesh.
    fn build(&self) -> KernelResult<Mesh>;
}

/// Validates `params` and refuses outputs past [`MAX_VERTICES`].
pub(crate) fn prepare<P: PrimitiveParams>(params: &P) -> KernelResult<Mesh> {
    params.validate()?;
    let vertices = params.vertex_count();
    if vertices > MAX_VERTICES {
        return Err(KernelError::invalid_argument(format!(
            "{} would emit {vertices} vertices (max: {MAX_VERTICES})",
            P::NAME
        )));
    }
    Ok(Mesh::with_capacity(vertices, params.face_count()))
}

/// Logs and hands back a finished mesh.
pub(crate) fn finish<P: PrimitiveParams>(mesh: Mesh) -> Mesh {
    log::debug!(
        "{}: {} vertices, {} faces",
        P::NAME,
        mesh.vertex_count(),
        mesh.face_count()
    );
    mesh
}

/// Angle of step `i` out of `count` around the full circle.
#[inline]
pub(crate) fn step_angle(i: u32, count: u32) -> f64 {
    TAU * f64::from(i) / f64::from(count)
}

#[cfg(test)]
mod tests;

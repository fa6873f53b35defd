//! # Local Frames
//!
//! Places a copy of a template mesh at a point, oriented by a primary
//! direction (`zdir`, normal-like) and a secondary one (`xdir`, tangential).

use crate::error::{KernelError, KernelResult};
use crate::math::{basis_matrix, normalize_or_zero, AxisPair, Matrix4, Vector3};
use crate::mesh::Mesh;
use serde::{Deserialize, Serialize};

/// Orthonormal basis plus origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub origin: Vector3,
    pub x_axis: Vector3,
    pub y_axis: Vector3,
    pub z_axis: Vector3,
}

impl Frame {
    /// Builds a frame from unnormalized directions.
    ///
    /// When `xdir × zdir` is shorter than `epsilon` the directions are
    /// parallel (or one is zero). The missing one is rebuilt as
    /// `(0, 0, 1) × other`; if that is zero too, the frame is degenerate.
    pub fn new(origin: Vector3, xdir: Vector3, zdir: Vector3, epsilon: f64) -> KernelResult<Self> {
        let mut x = normalize_or_zero(xdir);
        let mut z = normalize_or_zero(zdir);

        if x.cross(z).length() < epsilon {
            if x != Vector3::ZERO {
                z = normalize_or_zero(Vector3::Z.cross(x));
            } else {
                x = normalize_or_zero(Vector3::Z.cross(z));
            }
            if x == Vector3::ZERO || z == Vector3::ZERO {
                return Err(KernelError::degenerate(format!(
                    "cannot build a frame at {origin} from xdir {xdir} and zdir {zdir}"
                )));
            }
            log::warn!("patched degenerate frame at {origin}: x = {x}, z = {z}");
        }

        Ok(Self {
            origin,
            x_axis: x,
            y_axis: z.cross(x),
            z_axis: z,
        })
    }

    /// World matrix `translation · rotation · scale`.
    pub fn matrix(&self, axes: AxisPair, scale: Option<Vector3>) -> Matrix4 {
        let rotation = basis_matrix(self.x_axis, self.y_axis, self.z_axis, axes);
        let scale = Matrix4::from_scale(scale.unwrap_or(Vector3::ONE));
        Matrix4::from_translation(self.origin) * rotation * scale
    }
}

/// A template copy and the transform that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub matrix: Matrix4,
    pub mesh: Mesh,
}

/// Copies `source` into the frame at `position`.
///
/// # Example
///
/// ```rust
/// use meshgen_kernel::assembly::copyto;
/// use meshgen_kernel::math::AxisPair;
/// use meshgen_kernel::Mesh;
/// use glam::DVec3;
///
/// let template = Mesh::from_parts(vec![DVec3::Z], vec![]);
/// let copy = copyto(&template, DVec3::new(5.0, 0.0, 0.0), DVec3::Y, DVec3::X, AxisPair::ZX, None, 1e-6).unwrap();
/// // Template +Z now points along world +X.
/// assert!((copy.mesh.verts[0] - DVec3::new(6.0, 0.0, 0.0)).length() < 1e-12);
/// ```
pub fn copyto(
    source: &Mesh,
    position: Vector3,
    xdir: Vector3,
    zdir: Vector3,
    axes: AxisPair,
    scale: Option<Vector3>,
    epsilon: f64,
) -> KernelResult<Placement> {
    let frame = Frame::new(position, xdir, zdir, epsilon)?;
    let matrix = frame.matrix(axes, scale);
    Ok(Placement {
        matrix,
        mesh: source.transformed(&matrix),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn close(a: Vector3, b: Vector3) -> bool {
        (a - b).length() < 1e-12
    }

    #[test]
    fn test_frame_orthonormal() {
        let frame = Frame::new(Vector3::ZERO, Vector3::new(2.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 3.0), 1e-6).unwrap();
        assert_eq!(frame.x_axis, Vector3::X);
        assert_eq!(frame.z_axis, Vector3::Z);
        assert_eq!(frame.y_axis, Vector3::Y);
    }

    #[test]
    fn test_frame_patches_parallel_directions() {
        let frame = Frame::new(Vector3::ZERO, Vector3::X, Vector3::X, 1e-6).unwrap();
        assert_eq!(frame.x_axis, Vector3::X);
        assert!(close(frame.z_axis, Vector3::Y));

        let frame = Frame::new(Vector3::ZERO, Vector3::ZERO, Vector3::Y, 1e-6).unwrap();
        assert!(close(frame.x_axis, -Vector3::X));
        assert_eq!(frame.z_axis, Vector3::Y);
    }

    #[test]
    fn test_frame_unpatchable() {
        let err = Frame::new(Vector3::ZERO, Vector3::Z, Vector3::Z, 1e-6).unwrap_err();
        assert!(matches!(err, KernelError::Degenerate { .. }));
        assert!(Frame::new(Vector3::ZERO, Vector3::ZERO, Vector3::ZERO, 1e-6).is_err());
    }

    #[test]
    fn test_copyto_applies_scale_before_rotation() {
        let template = Mesh::from_parts(vec![Vector3::new(1.0, 0.0, 1.0)], vec![]);
        let copy = copyto(
            &template,
            Vector3::new(0.0, 0.0, 10.0),
            Vector3::X,
            Vector3::Z,
            AxisPair::ZX,
            Some(Vector3::new(2.0, 1.0, 3.0)),
            1e-6,
        )
        .unwrap();
        assert!(close(copy.mesh.verts[0], Vector3::new(2.0, 0.0, 13.0)));
    }

    #[test]
    fn test_copyto_axis_pairs_route_primary() {
        let template = Mesh::from_parts(vec![Vector3::X, Vector3::Y, Vector3::Z], vec![]);
        for pair in AxisPair::ALL {
            let copy = copyto(&template, Vector3::ZERO, Vector3::Y, Vector3::Z, pair, None, 1e-6).unwrap();
            // The template axis named first ends up on zdir, the second on xdir.
            assert!(close(copy.mesh.verts[pair.primary()], Vector3::Z), "{pair}");
            assert!(close(copy.mesh.verts[pair.secondary()], Vector3::Y), "{pair}");
        }
    }

    #[test]
    fn test_copyto_identity_template_lands_on_position() {
        let template = Mesh::from_parts(vec![Vector3::ZERO], vec![]);
        let pos = Vector3::new(1.5, -2.0, 0.25);
        let copy = copyto(&template, pos, Vector3::X, Vector3::Y, AxisPair::XY, None, 1e-6).unwrap();
        assert_relative_eq!(copy.mesh.verts[0].x, pos.x);
        assert_relative_eq!(copy.mesh.verts[0].y, pos.y);
        assert_relative_eq!(copy.mesh.verts[0].z, pos.z);
    }
}

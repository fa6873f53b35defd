//! Armature bones and lattice placements derived from mesh elements.

use crate::error::{require_positive, KernelError, KernelResult};
use crate::math::Vector3;
use crate::mesh::Mesh;
use serde::{Deserialize, Serialize};

/// A bone from `head` to `tail`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bone {
    pub head: Vector3,
    pub tail: Vector3,
}

/// One bone per face, rising from the face median along its normal.
///
/// # Errors
///
/// `InvalidArgument` for a non-positive length or an unknown face;
/// `Degenerate` for a face with no area.
pub fn bones_from_faces(mesh: &Mesh, faces: &[usize], length: f64) -> KernelResult<Vec<Bone>> {
    require_positive("bone length", length)?;
    faces
        .iter()
        .map(|&face| {
            let (Some(head), Some(normal)) = (mesh.face_center(face), mesh.face_normal(face)) else {
                return Err(KernelError::invalid_argument(format!(
                    "face {face} out of range (count: {})",
                    mesh.face_count()
                )));
            };
            if normal == Vector3::ZERO {
                return Err(KernelError::degenerate(format!("face {face} has no normal")));
            }
            Ok(Bone {
                head,
                tail: head + normal * length,
            })
        })
        .collect()
}

/// Axis-aligned lattice cage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticePlacement {
    pub center: Vector3,
    /// Full extent along each axis.
    pub scale: Vector3,
}

/// Lattice enclosing `points`, grown by `padding` on every side.
///
/// Axes where the points are flat still get `2 * padding`; with zero
/// padding they fall back to unit extent so the cage stays invertible.
pub fn lattice_from_points(points: &[Vector3], padding: f64) -> KernelResult<LatticePlacement> {
    if !padding.is_finite() || padding < 0.0 {
        return Err(KernelError::invalid_argument(format!(
            "padding must be >= 0, got {padding}"
        )));
    }
    let Some(&first) = points.first() else {
        return Err(KernelError::invalid_argument("lattice needs at least one point"));
    };
    let (min, max) = points
        .iter()
        .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));
    let extent = (max - min) + Vector3::splat(2.0 * padding);
    let scale = Vector3::select(extent.cmpgt(Vector3::ZERO), extent, Vector3::ONE);
    Ok(LatticePlacement {
        center: (min + max) / 2.0,
        scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{wedge, WedgeParams};

    #[test]
    fn test_bones_follow_face_normals() {
        let mesh = wedge(&WedgeParams::default()).unwrap();
        let bones = bones_from_faces(&mesh, &[0, 2], 0.5).unwrap();
        assert_eq!(bones[0].head, Vector3::new(-1.0 / 3.0, -1.0 / 3.0, 1.0));
        assert!(bones[0].tail.distance(bones[0].head + Vector3::Z * 0.5) < 1e-12);
        assert!(bones[1].tail.distance(Vector3::new(0.0, -1.5, 0.0)) < 1e-12);
    }

    #[test]
    fn test_bones_reject_bad_input() {
        let mesh = wedge(&WedgeParams::default()).unwrap();
        assert!(bones_from_faces(&mesh, &[0], 0.0).is_err());
        assert!(matches!(
            bones_from_faces(&mesh, &[7], 1.0),
            Err(KernelError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_lattice_encloses_points() {
        let points = [Vector3::new(-1.0, 0.0, 2.0), Vector3::new(3.0, 2.0, 2.0)];
        let lattice = lattice_from_points(&points, 0.5).unwrap();
        assert_eq!(lattice.center, Vector3::new(1.0, 1.0, 2.0));
        assert_eq!(lattice.scale, Vector3::new(5.0, 3.0, 1.0));

        let flat = lattice_from_points(&points, 0.0).unwrap();
        assert_eq!(flat.scale, Vector3::new(4.0, 2.0, 1.0));
    }

    #[test]
    fn test_lattice_needs_points() {
        assert!(lattice_from_points(&[], 0.1).is_err());
        assert!(lattice_from_points(&[Vector3::ZERO], -1.0).is_err());
    }
}

//! Wedge: a right triangular prism.

use super::{finish, prepare, PrimitiveParams};
use crate::assembly::bridge;
use crate::error::{require_positive, KernelResult};
use crate::math::Vector3;
use crate::mesh::Mesh;
use serde::{Deserialize, Serialize};

/// Parameters of [`wedge`]: full extents along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WedgeParams {
    pub size_x: f64,
    pub size_y: f64,
    pub size_z: f64,
}

impl Default for WedgeParams {
    fn default() -> Self {
        Self {
            size_x: 2.0,
            size_y: 2.0,
            size_z: 2.0,
        }
    }
}

impl PrimitiveParams for WedgeParams {
    const NAME: &'static str = "wedge";

    fn validate(&self) -> KernelResult<()> {
        require_positive("size_x", self.size_x)?;
        require_positive("size_y", self.size_y)?;
        require_positive("size_z", self.size_z)
    }

    fn vertex_count(&self) -> usize {
        6
    }

    fn face_count(&self) -> usize {
        5
    }

    fn build(&self) -> KernelResult<Mesh> {
        wedge(self)
    }
}

/// Builds a wedge centered on the origin.
///
/// The right angle sits at `(-x, -y)`. Vertices come in top/bottom pairs
/// around the triangle; faces are the two caps `[0, 2, 4]` and `[1, 3, 5]`
/// followed by the closed side strip. Both caps share one winding, so the
/// bottom cap faces up.
///
/// ## Example
///
/// ```rust
/// use meshgen_kernel::primitives::{wedge, WedgeParams};
///
/// let mesh = wedge(&WedgeParams::default()).unwrap();
/// assert_eq!(mesh.faces[0], vec![0, 2, 4]);
/// assert_eq!(mesh.faces.len(), 5);
/// ```
pub fn wedge(params: &WedgeParams) -> KernelResult<Mesh> {
    let mut mesh = prepare(params)?;
    let (x, y, z) = (params.size_x / 2.0, params.size_y / 2.0, params.size_z / 2.0);

    for (cx, cy) in [(-x, -y), (x, -y), (-x, y)] {
        mesh.add_vertex(Vector3::new(cx, cy, z));
        mesh.add_vertex(Vector3::new(cx, cy, -z));
    }

    let top = [0, 2, 4];
    let bottom = [1, 3, 5];
    mesh.extend_faces([top.to_vec(), bottom.to_vec()]);
    mesh.extend_faces(bridge(&top, &bottom, true, false)?);

    Ok(finish::<WedgeParams>(mesh))
}

//! Brilliant-cut diamond: a pavilion cone under a flat-topped crown.

use super::{finish, prepare, step_angle, PrimitiveParams};
use crate::assembly::bridge;
use crate::error::{require_at_least, require_positive, KernelResult};
use crate::math::{polar, Vector3};
use crate::mesh::Mesh;
use config::constants::MIN_SEGMENTS;
use serde::{Deserialize, Serialize};

/// Parameters of [`diamond`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiamondParams {
    pub segments: u32,
    /// Radius of the widest ring, at `z = 0`.
    pub girdle_radius: f64,
    /// Radius of the flat top ring.
    pub table_radius: f64,
    /// Height of the table above the girdle.
    pub crown_height: f64,
    /// Depth of the tip below the girdle.
    pub pavilion_height: f64,
}

impl Default for DiamondParams {
    fn default() -> Self {
        Self {
            segments: 32,
            girdle_radius: 1.0,
            table_radius: 0.6,
            crown_height: 0.35,
            pavilion_height: 0.8,
        }
    }
}

impl PrimitiveParams for DiamondParams {
    const NAME: &'static str = "diamond";

    fn validate(&self) -> KernelResult<()> {
        require_at_least("segments", self.segments, MIN_SEGMENTS)?;
        require_positive("girdle_radius", self.girdle_radius)?;
        require_positive("table_radius", self.table_radius)?;
        require_positive("crown_height", self.crown_height)?;
        require_positive("pavilion_height", self.pavilion_height)
    }

    fn vertex_count(&self) -> usize {
        2 + 2 * self.segments as usize
    }

    fn face_count(&self) -> usize {
        3 * self.segments as usize
    }

    fn build(&self) -> KernelResult<Mesh> {
        diamond(self)
    }
}

/// Builds a diamond.
///
/// Vertex layout: the pavilion tip, the table center, then one table vertex
/// and one girdle vertex per segment. Faces: the pavilion fan, the crown
/// band, then the table fan.
///
/// ## Example
///
/// ```rust
/// use meshgen_kernel::primitives::{diamond, DiamondParams};
///
/// let params = DiamondParams { segments: 3, ..DiamondParams::default() };
/// let mesh = diamond(&params).unwrap();
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.face_count(), 9);
/// ```
pub fn diamond(params: &DiamondParams) -> KernelResult<Mesh> {
    let mut mesh = prepare(params)?;

    let tip = mesh.add_vertex(Vector3::new(0.0, 0.0, -params.pavilion_height));
    let table_center = mesh.add_vertex(Vector3::new(0.0, 0.0, params.crown_height));

    let mut table = Vec::with_capacity(params.segments as usize);
    let mut girdle = Vec::with_capacity(params.segments as usize);
    for i in 0..params.segments {
        let angle = step_angle(i, params.segments);
        table.push(mesh.add_vertex(polar(params.table_radius, angle, params.crown_height)));
        girdle.push(mesh.add_vertex(polar(params.girdle_radius, angle, 0.0)));
    }

    mesh.extend_faces(bridge(&[tip], &girdle, true, true)?);
    mesh.extend_faces(bridge(&table, &girdle, true, false)?);
    mesh.extend_faces(bridge(&[table_center], &table, true, false)?);

    Ok(finish::<DiamondParams>(mesh))
}

//! Star prism: a zig-zag outline extruded along Z with pointed caps.

use super::{finish, prepare, step_angle, PrimitiveParams};
use crate::assembly::bridge;
use crate::error::{require_at_least, require_positive, KernelResult};
use crate::math::{polar, Vector3};
use crate::mesh::Mesh;
use config::constants::MIN_STAR_POINTS;
use serde::{Deserialize, Serialize};

/// Parameters of [`star`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarParams {
    pub points: u32,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub height: f64,
}

impl Default for StarParams {
    fn default() -> Self {
        Self {
            points: 5,
            outer_radius: 1.0,
            inner_radius: 0.5,
            height: 0.5,
        }
    }
}

impl StarParams {
    fn outline_len(&self) -> usize {
        2 * self.points as usize
    }
}

impl PrimitiveParams for StarParams {
    const NAME: &'static str = "star";

    fn validate(&self) -> KernelResult<()> {
        require_at_least("points", self.points, MIN_STAR_POINTS)?;
        require_positive("outer_radius", self.outer_radius)?;
        require_positive("inner_radius", self.inner_radius)?;
        require_positive("height", self.height)
    }

    fn vertex_count(&self) -> usize {
        2 + 2 * self.outline_len()
    }

    fn face_count(&self) -> usize {
        3 * self.outline_len()
    }

    fn build(&self) -> KernelResult<Mesh> {
        star(self)
    }
}

/// Builds a star centered on the origin.
///
/// The outline alternates outer and inner radius, starting with a point on
/// the +X axis. Vertex layout: top pole, bottom pole, then per outline
/// vertex its top copy followed by its bottom copy.
pub fn star(params: &StarParams) -> KernelResult<Mesh> {
    let mut mesh = prepare(params)?;
    let half = params.height / 2.0;
    let steps = 2 * params.points;

    let top_pole = mesh.add_vertex(Vector3::new(0.0, 0.0, half));
    let bottom_pole = mesh.add_vertex(Vector3::new(0.0, 0.0, -half));

    let mut top = Vec::with_capacity(params.outline_len());
    let mut bottom = Vec::with_capacity(params.outline_len());
    for k in 0..steps {
        let radius = if k % 2 == 0 {
            params.outer_radius
        } else {
            params.inner_radius
        };
        let angle = step_angle(k, steps);
        top.push(mesh.add_vertex(polar(radius, angle, half)));
        bottom.push(mesh.add_vertex(polar(radius, angle, -half)));
    }

    mesh.extend_faces(bridge(&[top_pole], &top, true, false)?);
    mesh.extend_faces(bridge(&top, &bottom, true, false)?);
    mesh.extend_faces(bridge(&[bottom_pole], &bottom, true, true)?);

    Ok(finish::<StarParams>(mesh))
}

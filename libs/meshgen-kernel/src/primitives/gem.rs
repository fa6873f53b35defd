//! Faceted gem: a triangulated pavilion under a crown of offset kites.

use super::{finish, prepare, step_angle, PrimitiveParams};
use crate::error::{require_at_least, require_positive, KernelResult};
use crate::math::{polar, Vector3};
use crate::mesh::Mesh;
use config::constants::MIN_SEGMENTS;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Parameters of [`gem`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GemParams {
    pub segments: u32,
    /// Girdle radius, where pavilion meets crown.
    pub pavilion_radius: f64,
    /// Radius of the crown's middle ring.
    pub crown_radius: f64,
    pub pavilion_height: f64,
    pub crown_height: f64,
}

impl Default for GemParams {
    fn default() -> Self {
        Self {
            segments: 8,
            pavilion_radius: 1.0,
            crown_radius: 0.8,
            pavilion_height: 1.0,
            crown_height: 0.4,
        }
    }
}

impl PrimitiveParams for GemParams {
    const NAME: &'static str = "gem";

    fn validate(&self) -> KernelResult<()> {
        require_at_least("segments", self.segments, MIN_SEGMENTS)?;
        require_positive("pavilion_radius", self.pavilion_radius)?;
        require_positive("crown_radius", self.crown_radius)?;
        require_positive("pavilion_height", self.pavilion_height)?;
        require_positive("crown_height", self.crown_height)
    }

    fn vertex_count(&self) -> usize {
        2 + 4 * self.segments as usize
    }

    fn face_count(&self) -> usize {
        6 * self.segments as usize
    }

    fn build(&self) -> KernelResult<Mesh> {
        gem(self)
    }
}

/// Builds a gem.
///
/// Four rings alternate between the segment angles and the half-step
/// angles between them:
///
/// | ring | angle          | radius              | z                    |
/// |------|----------------|---------------------|----------------------|
/// | 0    | `θ`            | `pavilion_radius/2` | `-pavilion_height/2` |
/// | 1    | `θ + step/2`   | `pavilion_radius`   | `0`                  |
/// | 2    | `θ`            | `crown_radius`      | `crown_height/2`     |
/// | 3    | `θ + step/2`   | `crown_radius/2`    | `crown_height`       |
///
/// Vertex layout: bottom pole, top pole, then the four ring vertices of each
/// segment in ring order. Each segment emits six faces: the pavilion fan
/// triangle, two zigzag triangles between rings 0 and 1, a girdle triangle
/// under ring 2, a crown kite spanning rings 1 to 3, and a table kite on the
/// top pole.
///
/// ## Example
///
/// ```rust
/// use meshgen_kernel::primitives::{gem, GemParams};
///
/// let mesh = gem(&GemParams { segments: 3, ..GemParams::default() }).unwrap();
/// assert_eq!(mesh.vertex_count(), 14);
/// assert_eq!(mesh.face_count(), 18);
/// ```
pub fn gem(params: &GemParams) -> KernelResult<Mesh> {
    let mut mesh = prepare(params)?;
    let n = params.segments as usize;
    let half_step = PI / f64::from(params.segments);

    let bottom = mesh.add_vertex(Vector3::new(0.0, 0.0, -params.pavilion_height));
    let top = mesh.add_vertex(Vector3::new(0.0, 0.0, params.crown_height));

    let mut rings: [Vec<usize>; 4] = Default::default();
    for i in 0..params.segments {
        let theta = step_angle(i, params.segments);
        let phi = theta + half_step;
        rings[0].push(mesh.add_vertex(polar(
            params.pavilion_radius / 2.0,
            theta,
            -params.pavilion_height / 2.0,
        )));
        rings[1].push(mesh.add_vertex(polar(params.pavilion_radius, phi, 0.0)));
        rings[2].push(mesh.add_vertex(polar(params.crown_radius, theta, params.crown_height / 2.0)));
        rings[3].push(mesh.add_vertex(polar(params.crown_radius / 2.0, phi, params.crown_height)));
    }

    let [r0, r1, r2, r3] = &rings;
    for i in 0..n {
        let j = (i + 1) % n;
        mesh.extend_faces([
            vec![bottom, r0[j], r0[i]],
            vec![r0[i], r0[j], r1[i]],
            vec![r1[i], r0[j], r1[j]],
            vec![r1[i], r1[j], r2[j]],
            vec![r1[i], r2[j], r3[i], r2[i]],
            vec![top, r3[i], r2[j], r3[j]],
        ]);
    }

    Ok(finish::<GemParams>(mesh))
}

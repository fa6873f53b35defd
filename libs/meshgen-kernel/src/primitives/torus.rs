//! Torus whose cross-section turns as it sweeps around the major circle.

use super::{finish, prepare, step_angle, PrimitiveParams};
use crate::assembly::bridge;
use crate::error::{require_at_least, require_positive, KernelResult};
use crate::math::{axis_angle, rotate, Vector3};
use crate::mesh::Mesh;
use config::constants::MIN_SEGMENTS;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Parameters of [`twisted_torus`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TwistedTorusParams {
    pub major_radius: f64,
    pub minor_radius: f64,
    pub major_segments: u32,
    pub minor_segments: u32,
    /// Full turns of the cross-section over one sweep.
    pub twists: u32,
}

impl Default for TwistedTorusParams {
    fn default() -> Self {
        Self {
            major_radius: 1.0,
            minor_radius: 0.25,
            major_segments: 48,
            minor_segments: 12,
            twists: 1,
        }
    }
}

impl PrimitiveParams for TwistedTorusParams {
    const NAME: &'static str = "twisted torus";

    fn validate(&self) -> KernelResult<()> {
        require_positive("major_radius", self.major_radius)?;
        require_positive("minor_radius", self.minor_radius)?;
        require_at_least("major_segments", self.major_segments, MIN_SEGMENTS)?;
        require_at_least("minor_segments", self.minor_segments, MIN_SEGMENTS)
    }

    fn vertex_count(&self) -> usize {
        self.major_segments as usize * self.minor_segments as usize
    }

    fn face_count(&self) -> usize {
        self.vertex_count()
    }

    fn build(&self) -> KernelResult<Mesh> {
        twisted_torus(self)
    }
}

/// Builds a twisted torus around the Z axis.
///
/// Ring `i` is the minor circle in the XZ plane, phase-shifted by
/// `2π·i·twists/major_segments`, then swept to `2π·i/major_segments`.
/// Rings are stored one after another; consecutive rings are bridged and
/// the last ring closes onto the first.
pub fn twisted_torus(params: &TwistedTorusParams) -> KernelResult<Mesh> {
    let mut mesh = prepare(params)?;
    let major = params.major_segments;
    let minor = params.minor_segments;

    let mut rings = Vec::with_capacity(major as usize);
    for i in 0..major {
        let sweep = axis_angle(Vector3::Z, step_angle(i, major));
        let twist = TAU * f64::from(i) * f64::from(params.twists) / f64::from(major);
        let ring: Vec<usize> = (0..minor)
            .map(|j| {
                let t = step_angle(j, minor) + twist;
                let section = Vector3::new(
                    params.major_radius + params.minor_radius * t.cos(),
                    0.0,
                    params.minor_radius * t.sin(),
                );
                mesh.add_vertex(rotate(section, sweep))
            })
            .collect();
        rings.push(ring);
    }

    for pair in rings.windows(2) {
        mesh.extend_faces(bridge(&pair[0], &pair[1], true, false)?);
    }
    if let (Some(last), Some(first)) = (rings.last(), rings.first()) {
        mesh.extend_faces(bridge(last, first, true, false)?);
    }

    Ok(finish::<TwistedTorusParams>(mesh))
}

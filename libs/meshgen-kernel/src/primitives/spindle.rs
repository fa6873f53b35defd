//! Spindle: a cylindrical band capped by a cone at each end.

use super::{finish, prepare, step_angle, PrimitiveParams};
use crate::assembly::bridge;
use crate::error::{require_at_least, require_positive, KernelError, KernelResult};
use crate::math::{polar, Vector3};
use crate::mesh::Mesh;
use config::constants::MIN_SEGMENTS;
use serde::{Deserialize, Serialize};

/// Parameters of [`spindle`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpindleParams {
    pub segments: u32,
    pub radius: f64,
    /// Height of the cylindrical band. Zero drops the band.
    pub height: f64,
    /// Height of each cone. Negative values sink the tips into the band.
    pub cap_height: f64,
}

impl Default for SpindleParams {
    fn default() -> Self {
        Self {
            segments: 32,
            radius: 0.5,
            height: 1.0,
            cap_height: 0.5,
        }
    }
}

impl SpindleParams {
    fn has_band(&self) -> bool {
        self.height > 0.0
    }
}

impl PrimitiveParams for SpindleParams {
    const NAME: &'static str = "spindle";

    fn validate(&self) -> KernelResult<()> {
        require_at_least("segments", self.segments, MIN_SEGMENTS)?;
        require_positive("radius", self.radius)?;
        if !self.height.is_finite() || self.height < 0.0 {
            return Err(KernelError::invalid_argument(format!(
                "height must be >= 0, got {}",
                self.height
            )));
        }
        if !self.cap_height.is_finite() {
            return Err(KernelError::invalid_argument(format!(
                "cap_height must be finite, got {}",
                self.cap_height
            )));
        }
        Ok(())
    }

    fn vertex_count(&self) -> usize {
        let rings = if self.has_band() { 2 } else { 1 };
        2 + rings * self.segments as usize
    }

    fn face_count(&self) -> usize {
        let bands = if self.has_band() { 3 } else { 2 };
        bands * self.segments as usize
    }

    fn build(&self) -> KernelResult<Mesh> {
        spindle(self)
    }
}

/// Builds a spindle centered on the origin.
///
/// Vertex layout: upper tip, lower tip, then per segment the upper ring
/// vertex followed by the lower ring vertex. With `height == 0` there is a
/// single ring at `z = 0` and the lower tip fans straight onto it.
///
/// ## Example
///
/// ```rust
/// use meshgen_kernel::primitives::{spindle, SpindleParams};
///
/// let params = SpindleParams { segments: 8, height: 0.0, ..SpindleParams::default() };
/// let mesh = spindle(&params).unwrap();
/// assert_eq!(mesh.vertex_count(), 10);
/// assert_eq!(mesh.face_count(), 16);
/// ```
pub fn spindle(params: &SpindleParams) -> KernelResult<Mesh> {
    let mut mesh = prepare(params)?;
    let half = params.height / 2.0;
    let reach = half + params.cap_height;

    let upper_tip = mesh.add_vertex(Vector3::new(0.0, 0.0, reach));
    let lower_tip = mesh.add_vertex(Vector3::new(0.0, 0.0, -reach));

    let mut upper = Vec::with_capacity(params.segments as usize);
    let mut lower = Vec::with_capacity(params.segments as usize);
    for i in 0..params.segments {
        let angle = step_angle(i, params.segments);
        upper.push(mesh.add_vertex(polar(params.radius, angle, half)));
        if params.has_band() {
            lower.push(mesh.add_vertex(polar(params.radius, angle, -half)));
        }
    }

    mesh.extend_faces(bridge(&[upper_tip], &upper, true, false)?);
    if params.has_band() {
        mesh.extend_faces(bridge(&upper, &lower, true, false)?);
        mesh.extend_faces(bridge(&[lower_tip], &lower, true, true)?);
    } else {
        mesh.extend_faces(bridge(&[lower_tip], &upper, true, true)?);
    }

    Ok(finish::<SpindleParams>(mesh))
}

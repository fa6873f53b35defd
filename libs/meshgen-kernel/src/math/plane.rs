//! # Planes
//!
//! `n·p + d = 0`. As a half-space the plane keeps `n·p + d <= 0`, so the
//! normal points away from the kept side.

use crate::math::Vector3;
use serde::{Deserialize, Serialize};

/// Plane `normal·p + d = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vector3,
    pub d: f64,
}

impl Plane {
    pub const fn new(normal: Vector3, d: f64) -> Self {
        Self { normal, d }
    }

    /// Plane through `point` with the given normal.
    pub fn from_point_normal(point: Vector3, normal: Vector3) -> Self {
        Self::new(normal, -normal.dot(point))
    }

    /// Perpendicular bisector of `q` and `r`, expressed in `q`'s local
    /// space, keeping the side nearer `q`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use meshgen_kernel::math::{Plane, Vector3};
    ///
    /// let plane = Plane::bisector(Vector3::ZERO, Vector3::new(2.0, 0.0, 0.0));
    /// assert_eq!(plane.normal, Vector3::X);
    /// assert_eq!(plane.d, -1.0);
    /// ```
    pub fn bisector(q: Vector3, r: Vector3) -> Self {
        let delta = r - q;
        let distance = delta.length();
        Self::new(delta / distance, -distance / 2.0)
    }

    /// Signed distance scaled by `|normal|`; negative on the kept side.
    #[inline]
    pub fn signed_distance(&self, p: Vector3) -> f64 {
        self.normal.dot(p) + self.d
    }

    /// The same plane seen from a frame whose origin sits at `origin`.
    pub fn translated_to_local(&self, origin: Vector3) -> Self {
        Self::new(self.normal, self.d + self.normal.dot(origin))
    }

    /// Moves the plane `distance` toward the kept side.
    pub fn offset_inward(&self, distance: f64) -> Self {
        Self::new(self.normal, self.d + distance * self.normal.length())
    }

    /// Half-space test `n·p + d <= epsilon`.
    #[inline]
    pub fn contains(&self, p: Vector3, epsilon: f64) -> bool {
        self.signed_distance(p) <= epsilon
    }

    /// Point shared by three planes, or `None` when any two are parallel
    /// within `epsilon`.
    pub fn intersect_three(a: &Plane, b: &Plane, c: &Plane, epsilon: f64) -> Option<Vector3> {
        let bc = b.normal.cross(c.normal);
        let det = a.normal.dot(bc);
        if det.abs() < epsilon {
            return None;
        }
        let ca = c.normal.cross(a.normal);
        let ab = a.normal.cross(b.normal);
        Some((bc * -a.d + ca * -b.d + ab * -c.d) / det)
    }
}

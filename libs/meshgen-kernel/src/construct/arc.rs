//! # Three-Point Arcs
//!
//! Circumscribed circle of three points in space.

use crate::error::{KernelError, KernelResult};
use crate::math::Vector3;
use serde::{Deserialize, Serialize};

/// Circle through three points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcRecord {
    pub center: Vector3,
    pub radius: f64,
    /// Unit normal of the plane through the points, right-handed in input order.
    pub normal: Vector3,
}

/// Circumcenter of `a`, `b` and `c` within their common plane.
///
/// With `u = a - c` and `v = b - c` the center is
/// `c + ((|u|²v - |v|²u) × (u × v)) / (2|u × v|²)`.
///
/// # Errors
///
/// `Degenerate` when the points are collinear or coincident, measured as
/// `|u × v| < epsilon`.
///
/// # Example
///
/// ```rust
/// use meshgen_kernel::construct::arc_center;
/// use glam::DVec3;
///
/// let arc = arc_center(DVec3::X, DVec3::Y, -DVec3::X, 1e-9).unwrap();
/// assert!(arc.center.length() < 1e-12);
/// assert!((arc.radius - 1.0).abs() < 1e-12);
/// ```
pub fn arc_center(a: Vector3, b: Vector3, c: Vector3, epsilon: f64) -> KernelResult<ArcRecord> {
    let u = a - c;
    let v = b - c;
    let normal = u.cross(v);
    let area2 = normal.length_squared();
    if !area2.is_finite() || area2.sqrt() < epsilon {
        return Err(KernelError::degenerate(format!(
            "points {a}, {b} and {c} are collinear"
        )));
    }

    let offset = (v * u.length_squared() - u * v.length_squared()).cross(normal) / (2.0 * area2);
    let center = c + offset;
    Ok(ArcRecord {
        center,
        radius: center.distance(a),
        normal: normal / area2.sqrt(),
    })
}

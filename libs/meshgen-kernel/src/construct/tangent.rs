//! # Circle Tangents
//!
//! Tangent points from a pole, and the common tangents of two coplanar
//! circles found through their homothety centers. Everything is computed in
//! the XY plane; output points take the z of their circle's center.

use crate::error::{require_positive, KernelError, KernelResult};
use crate::math::{normalize_or_zero, Vector3};
use config::constants::approx_equal;
use serde::{Deserialize, Serialize};

/// A circle in a plane parallel to XY.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vector3,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Vector3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Distance between centers in the XY plane.
    pub fn planar_distance(&self, other: &Circle) -> f64 {
        (other.center - self.center).truncate().length()
    }
}

/// Segment of a common tangent, from its touch point on the first circle to
/// its touch point on the second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TangentLine {
    pub start: Vector3,
    pub end: Vector3,
}

/// Common tangents of two circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleTangents {
    /// Tangents that keep both circles on one side.
    pub external: [TangentLine; 2],
    /// Where the external tangents meet; `None` when they are parallel.
    pub external_point: Option<Vector3>,
    /// Tangents that cross between the circles, present only when the
    /// circles are disjoint.
    pub internal: Option<[TangentLine; 2]>,
    /// Where the internal tangents cross.
    pub internal_point: Option<Vector3>,
}

/// Touch points of the two tangents from `pole` to `circle`.
///
/// Each returned point `t` satisfies `(t - center) · (t - pole) = 0`. A
/// pole on the circle returns itself twice.
///
/// # Errors
///
/// `InvalidArgument` for a radius that is not positive; `NoTangent` when the
/// pole lies inside the circle or on its center.
///
/// # Example
///
/// ```rust
/// use meshgen_kernel::construct::{tangent_points_from_pole, Circle};
/// use glam::DVec3;
///
/// let circle = Circle::new(DVec3::ZERO, 1.0);
/// let (a, b) = tangent_points_from_pole(&circle, DVec3::new(2.0, 0.0, 0.0)).unwrap();
/// assert!((a.x - 0.5).abs() < 1e-12 && (b.x - 0.5).abs() < 1e-12);
/// assert!((a.y + b.y).abs() < 1e-12);
/// ```
pub fn tangent_points_from_pole(circle: &Circle, pole: Vector3) -> KernelResult<(Vector3, Vector3)> {
    require_positive("radius", circle.radius)?;
    let c = circle.center;
    let r = circle.radius;
    let dx = pole.x - c.x;
    let dy = pole.y - c.y;
    let d2 = dx * dx + dy * dy;
    if d2 <= 0.0 {
        return Err(KernelError::no_tangent(format!(
            "pole {pole} is the center of the circle"
        )));
    }
    let discriminant = d2 - r * r;
    if discriminant < 0.0 {
        return Err(KernelError::no_tangent(format!(
            "pole {pole} lies inside the circle at {c} with radius {r}"
        )));
    }
    let root = discriminant.sqrt();
    let r2 = r * r;

    let first = Vector3::new(
        (r2 * dx + r * dy * root) / d2 + c.x,
        (r2 * dy - r * dx * root) / d2 + c.y,
        c.z,
    );
    let second = Vector3::new(
        (r2 * dx - r * dy * root) / d2 + c.x,
        (r2 * dy + r * dx * root) / d2 + c.y,
        c.z,
    );
    Ok((first, second))
}

/// Common tangents of `c0` and `c1`.
///
/// With `d` the distance between centers:
///
/// - `d > r0 + r1`: external and internal tangents.
/// - `max(r0, r1) < d <= r0 + r1`: external tangents only.
/// - otherwise the circles are nested or coincident and this fails with
///   `NoTangent`.
///
/// Radii closer than `epsilon` give parallel external tangents.
pub fn tangents_of_two_circles(c0: &Circle, c1: &Circle, epsilon: f64) -> KernelResult<CircleTangents> {
    require_positive("radius", c0.radius)?;
    require_positive("radius", c1.radius)?;
    let d = c0.planar_distance(c1);
    let (r0, r1) = (c0.radius, c1.radius);

    if d <= r0.max(r1) {
        return Err(KernelError::no_tangent(format!(
            "circles at {} and {} are nested or coincident (d = {d}, r0 = {r0}, r1 = {r1})",
            c0.center, c1.center
        )));
    }

    let (external, external_point) = if approx_equal(r0, r1, epsilon) {
        (parallel_tangents(c0, c1), None)
    } else {
        let pole = (c1.center * r0 - c0.center * r1) / (r0 - r1);
        (tangents_through(c0, c1, pole)?, Some(pole))
    };

    let (internal, internal_point) = if d > r0 + r1 {
        let pole = (c1.center * r0 + c0.center * r1) / (r0 + r1);
        (Some(tangents_through(c0, c1, pole)?), Some(pole))
    } else {
        (None, None)
    };

    log::trace!(
        "tangents of circles at {} and {}: internal = {}",
        c0.center,
        c1.center,
        internal.is_some()
    );

    Ok(CircleTangents {
        external,
        external_point,
        internal,
        internal_point,
    })
}

/// Pairs the touch points from a shared homothety center, sign with sign.
fn tangents_through(c0: &Circle, c1: &Circle, pole: Vector3) -> KernelResult<[TangentLine; 2]> {
    let (a0, b0) = tangent_points_from_pole(c0, pole)?;
    let (a1, b1) = tangent_points_from_pole(c1, pole)?;
    Ok([
        TangentLine { start: a0, end: a1 },
        TangentLine { start: b0, end: b1 },
    ])
}

/// Equal radii: the external tangents run parallel to the center line.
fn parallel_tangents(c0: &Circle, c1: &Circle) -> [TangentLine; 2] {
    let along = normalize_or_zero((c1.center - c0.center).truncate().extend(0.0));
    let side = Vector3::new(along.y, -along.x, 0.0);
    [
        TangentLine {
            start: c0.center + side * c0.radius,
            end: c1.center + side * c1.radius,
        },
        TangentLine {
            start: c0.center - side * c0.radius,
            end: c1.center - side * c1.radius,
        },
    ]
}

//! # Bezier Sampling
//!
//! Cubic Bezier splines given as control points with left and right
//! handles, sampled into polylines.

use crate::error::{KernelError, KernelResult};
use crate::math::Vector3;
use crate::mesh::Mesh;
use config::constants::MIN_BEZIER_RESOLUTION;
use serde::{Deserialize, Serialize};

/// Spline control point with its two handles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BezierPoint {
    pub co: Vector3,
    pub handle_left: Vector3,
    pub handle_right: Vector3,
}

impl BezierPoint {
    pub fn new(co: Vector3, handle_left: Vector3, handle_right: Vector3) -> Self {
        Self {
            co,
            handle_left,
            handle_right,
        }
    }

    /// Control point whose handles sit on the point itself.
    pub fn vector(co: Vector3) -> Self {
        Self::new(co, co, co)
    }
}

/// Samples `resolution + 1` positions per segment.
///
/// An open spline of `n` points has `n - 1` segments, a cyclic one `n`.
/// The last sample of a segment equals the first of the next; callers
/// deduplicate if they need to (see [`polyline_mesh`]).
///
/// # Example
///
/// ```rust
/// use meshgen_kernel::assembly::{sample_bezier, BezierPoint};
/// use glam::DVec3;
///
/// let points = [BezierPoint::vector(DVec3::ZERO), BezierPoint::vector(DVec3::X)];
/// let samples = sample_bezier(&points, 4, false).unwrap();
/// assert_eq!(samples.len(), 5);
/// assert_eq!(samples[4], DVec3::X);
/// ```
pub fn sample_bezier(points: &[BezierPoint], resolution: u32, cyclic: bool) -> KernelResult<Vec<Vector3>> {
    if resolution < MIN_BEZIER_RESOLUTION {
        return Err(KernelError::invalid_argument(format!(
            "bezier resolution must be >= {MIN_BEZIER_RESOLUTION}, got {resolution}"
        )));
    }
    let n = points.len();
    let segments = if cyclic { n } else { n.saturating_sub(1) };
    if segments == 0 {
        return Err(KernelError::invalid_argument(format!(
            "{} spline needs at least {} control point(s), got {n}",
            if cyclic { "a cyclic" } else { "an open" },
            if cyclic { 1 } else { 2 },
        )));
    }

    let steps = resolution as usize;
    let mut samples = Vec::with_capacity(segments * (steps + 1));
    for i in 0..segments {
        let start = &points[i];
        let end = &points[(i + 1) % n];
        for k in 0..=steps {
            let t = k as f64 / steps as f64;
            samples.push(cubic(
                start.co,
                start.handle_right,
                end.handle_left,
                end.co,
                t,
            ));
        }
    }
    Ok(samples)
}

/// Point on the cubic Bezier `p0 p1 p2 p3` at `t`.
pub fn cubic(p0: Vector3, p1: Vector3, p2: Vector3, p3: Vector3, t: f64) -> Vector3 {
    let u = 1.0 - t;
    p0 * (u * u * u) + p1 * (3.0 * u * u * t) + p2 * (3.0 * u * t * t) + p3 * (t * t * t)
}

/// Turns sampled positions into an edge-only mesh, merging consecutive
/// samples closer than `epsilon` (segment joins).
///
/// When `cyclic`, a last sample coinciding with the first is merged too and
/// a closing edge is added.
pub fn polyline_mesh(samples: &[Vector3], cyclic: bool, epsilon: f64) -> KernelResult<Mesh> {
    let mut verts: Vec<Vector3> = Vec::with_capacity(samples.len());
    for &p in samples {
        if verts.last().is_some_and(|&q| q.distance(p) < epsilon) {
            continue;
        }
        verts.push(p);
    }
    if cyclic && verts.len() > 1 {
        if let (Some(&first), Some(&last)) = (verts.first(), verts.last()) {
            if first.distance(last) < epsilon {
                verts.pop();
            }
        }
    }
    if verts.len() < 2 {
        return Err(KernelError::degenerate(
            "polyline collapses to a single point",
        ));
    }

    let count = verts.len();
    let mut mesh = Mesh::with_capacity(count, 0);
    mesh.verts = verts;
    for i in 0..count - 1 {
        mesh.add_edge(i, i + 1)?;
    }
    if cyclic && count > 2 {
        mesh.add_edge(count - 1, 0)?;
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn arc_points() -> Vec<BezierPoint> {
        vec![
            BezierPoint::new(
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(-1.0, 0.0, 0.0),
                Vector3::new(1.0, 0.0, 0.0),
            ),
            BezierPoint::new(
                Vector3::new(2.0, 2.0, 0.0),
                Vector3::new(2.0, 1.0, 0.0),
                Vector3::new(2.0, 3.0, 0.0),
            ),
            BezierPoint::new(
                Vector3::new(0.0, 4.0, 0.0),
                Vector3::new(1.0, 4.0, 0.0),
                Vector3::new(-1.0, 4.0, 0.0),
            ),
        ]
    }

    #[test]
    fn test_sample_counts() {
        let points = arc_points();
        assert_eq!(sample_bezier(&points, 8, false).unwrap().len(), 2 * 9);
        assert_eq!(sample_bezier(&points, 8, true).unwrap().len(), 3 * 9);
        assert_eq!(sample_bezier(&points, 1, false).unwrap().len(), 2 * 2);
    }

    #[test]
    fn test_sample_joins_coincide() {
        let samples = sample_bezier(&arc_points(), 4, false).unwrap();
        assert_eq!(samples[4], samples[5]);
        assert_eq!(samples[0], Vector3::ZERO);
        assert_eq!(samples[9], Vector3::new(0.0, 4.0, 0.0));
    }

    #[test]
    fn test_sample_midpoint() {
        let samples = sample_bezier(&arc_points(), 2, false).unwrap();
        // B(0.5) = (p0 + 3p1 + 3p2 + p3) / 8
        let expected = (Vector3::ZERO
            + Vector3::new(1.0, 0.0, 0.0) * 3.0
            + Vector3::new(2.0, 1.0, 0.0) * 3.0
            + Vector3::new(2.0, 2.0, 0.0))
            / 8.0;
        assert_relative_eq!(samples[1].x, expected.x, epsilon = 1e-12);
        assert_relative_eq!(samples[1].y, expected.y, epsilon = 1e-12);
    }

    #[test]
    fn test_sample_rejects_bad_input() {
        assert!(sample_bezier(&arc_points(), 0, false).is_err());
        assert!(sample_bezier(&[], 4, true).is_err());
        assert!(sample_bezier(&arc_points()[..1], 4, false).is_err());
        assert_eq!(sample_bezier(&arc_points()[..1], 4, true).unwrap().len(), 5);
    }

    #[test]
    fn test_polyline_merges_joins() {
        let samples = sample_bezier(&arc_points(), 4, false).unwrap();
        let mesh = polyline_mesh(&samples, false, 1e-9).unwrap();
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(mesh.edge_count(), 8);
        assert!(mesh.faces.is_empty());
    }

    #[test]
    fn test_polyline_cyclic_closes() {
        let samples = sample_bezier(&arc_points(), 4, true).unwrap();
        let mesh = polyline_mesh(&samples, true, 1e-9).unwrap();
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.edge_count(), 12);
        assert_eq!(mesh.edges.last(), Some(&[0, 11]));
    }

    #[test]
    fn test_polyline_degenerate() {
        assert!(polyline_mesh(&[Vector3::ZERO, Vector3::ZERO], false, 1e-9).is_err());
    }
}

//! # Half-Space Intersection
//!
//! Vertices of the convex polytope `{p : n·p + d <= 0 for every plane}`,
//! found by intersecting every triple of planes and keeping the corners
//! that satisfy all constraints. Cubic in the plane count, which stays
//! small for Voronoi cells since redundant planes are pruned as they go.

use crate::math::{Plane, Vector3};
use config::constants::HALFSPACE_EPSILON;

/// Result of intersecting a set of half-spaces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polytope {
    /// Unique corner positions.
    pub vertices: Vec<Vector3>,
    /// Indices of input planes touching at least one corner.
    pub active: Vec<usize>,
}

impl Polytope {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Largest distance from the origin to a corner.
    pub fn circumradius(&self) -> f64 {
        self.vertices
            .iter()
            .map(|v| v.length())
            .fold(0.0, f64::max)
    }
}

/// Intersects half-spaces.
///
/// Returns an empty polytope when the region is empty or has no corners
/// (fewer than three independent planes).
///
/// # Example
///
/// ```rust
/// use meshgen_kernel::assembly::intersect_halfspaces;
/// use meshgen_kernel::math::{Plane, Vector3};
///
/// let cube: Vec<Plane> = [Vector3::X, Vector3::Y, Vector3::Z]
///     .into_iter()
///     .flat_map(|n| [Plane::new(n, -1.0), Plane::new(-n, -1.0)])
///     .collect();
/// let polytope = intersect_halfspaces(&cube);
/// assert_eq!(polytope.vertices.len(), 8);
/// assert_eq!(polytope.active.len(), 6);
/// ```
pub fn intersect_halfspaces(planes: &[Plane]) -> Polytope {
    let scale = planes.iter().map(|p| p.d.abs()).fold(1.0, f64::max);
    let tolerance = HALFSPACE_EPSILON * scale;

    let mut vertices: Vec<Vector3> = Vec::new();
    let n = planes.len();
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let Some(point) =
                    Plane::intersect_three(&planes[i], &planes[j], &planes[k], HALFSPACE_EPSILON)
                else {
                    continue;
                };
                if !point.is_finite() || !planes.iter().all(|p| p.contains(point, tolerance)) {
                    continue;
                }
                if vertices
                    .iter()
                    .all(|v| v.distance(point) > tolerance * 10.0)
                {
                    vertices.push(point);
                }
            }
        }
    }

    let active = planes
        .iter()
        .enumerate()
        .filter(|(_, plane)| {
            vertices
                .iter()
                .any(|&v| plane.signed_distance(v).abs() <= tolerance * 10.0)
        })
        .map(|(index, _)| index)
        .collect();

    Polytope { vertices, active }
}

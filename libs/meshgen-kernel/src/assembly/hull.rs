//! # Convex Hull (QuickHull Algorithm)
//!
//! Recovers the faces of a convex point set, such as the corners of a
//! Voronoi cell.
//!
//! ## Algorithm
//!
//! 1. Find an initial tetrahedron from extremal points
//! 2. Assign each remaining point to the outside set of the face it is farthest from
//! 3. For each face with a non-empty outside set:
//!    a. Take the farthest point in that outside set
//!    b. Flood the faces visible from that point
//!    c. Extract the horizon (boundary of the visible region)
//!    d. Fan new faces from the horizon to the point
//!    e. Redistribute the orphaned outside points

use crate::error::{KernelError, KernelResult};
use crate::math::Vector3;
use crate::mesh::Mesh;
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// PUBLIC API
// =============================================================================

/// Convex hull of `points` as an outward-wound triangle mesh.
///
/// Points closer than `epsilon` are merged. Fails with `Degenerate` when
/// the points do not span a volume.
///
/// # Example
///
/// ```rust
/// use meshgen_kernel::assembly::convex_hull;
/// use glam::DVec3;
///
/// let points = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z, DVec3::splat(0.1)];
/// let hull = convex_hull(&points, 1e-9).unwrap();
/// assert_eq!(hull.vertex_count(), 4);
/// assert_eq!(hull.face_count(), 4);
/// ```
pub fn convex_hull(points: &[Vector3], epsilon: f64) -> KernelResult<Mesh> {
    let unique = deduplicate(points, epsilon);
    let mut hull = QuickHull::new(&unique, epsilon);
    if !hull.build() {
        return Err(KernelError::degenerate(format!(
            "{} point(s) do not span a volume",
            unique.len()
        )));
    }
    Ok(hull.to_mesh())
}

fn deduplicate(points: &[Vector3], epsilon: f64) -> Vec<Vector3> {
    let mut unique: Vec<Vector3> = Vec::with_capacity(points.len());
    for &p in points {
        if unique.iter().all(|q| q.distance(p) > epsilon) {
            unique.push(p);
        }
    }
    unique
}

// =============================================================================
// FACE STRUCTURE
// =============================================================================

#[derive(Clone)]
struct Face {
    /// Vertex indices, counter-clockwise seen from outside.
    vertices: [usize; 3],
    /// Outward normal (unnormalized).
    normal: Vector3,
    /// Plane offset: `normal · p == offset` on the face.
    offset: f64,
    /// Points outside this face.
    outside: Vec<usize>,
    active: bool,
}

impl Face {
    /// Face through three points, wound away from `interior`.
    fn new(points: &[Vector3], v0: usize, v1: usize, v2: usize, interior: Vector3) -> Self {
        let (p0, p1, p2) = (points[v0], points[v1], points[v2]);
        let mut normal = (p1 - p0).cross(p2 - p0);
        let mut vertices = [v0, v1, v2];
        if normal.dot(interior - p0) > 0.0 {
            vertices = [v0, v2, v1];
            normal = -normal;
        }
        Self {
            vertices,
            normal,
            offset: normal.dot(p0),
            outside: Vec::new(),
            active: true,
        }
    }

    /// Positive when `p` is outside.
    fn distance(&self, p: Vector3) -> f64 {
        let length = self.normal.length();
        if length == 0.0 {
            return 0.0;
        }
        (self.normal.dot(p) - self.offset) / length
    }

    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.vertices;
        [(a, b), (b, c), (c, a)]
    }
}

// =============================================================================
// QUICKHULL
// =============================================================================

struct QuickHull<'a> {
    points: &'a [Vector3],
    faces: Vec<Face>,
    epsilon: f64,
    /// Centroid of the seed tetrahedron; stays strictly inside the hull.
    interior: Vector3,
}

impl<'a> QuickHull<'a> {
    fn new(points: &'a [Vector3], epsilon: f64) -> Self {
        Self {
            points,
            faces: Vec::new(),
            epsilon,
            interior: Vector3::ZERO,
        }
    }

    /// Builds the hull. Returns false if the input is degenerate.
    fn build(&mut self) -> bool {
        let Some([p0, p1, p2, p3]) = self.initial_tetrahedron() else {
            return false;
        };
        self.interior =
            (self.points[p0] + self.points[p1] + self.points[p2] + self.points[p3]) / 4.0;

        for [a, b, c] in [[p0, p1, p2], [p0, p2, p3], [p0, p3, p1], [p1, p3, p2]] {
            self.faces.push(Face::new(self.points, a, b, c, self.interior));
        }

        let seed = [p0, p1, p2, p3];
        for point in 0..self.points.len() {
            if !seed.contains(&point) {
                self.assign(point);
            }
        }

        while let Some(face) = self
            .faces
            .iter()
            .position(|f| f.active && !f.outside.is_empty())
        {
            self.expand(face);
        }
        true
    }

    /// Adds `point` to the outside set of the face it is farthest above.
    fn assign(&mut self, point: usize) {
        let p = self.points[point];
        let mut best = None;
        let mut best_distance = self.epsilon;
        for (index, face) in self.faces.iter().enumerate() {
            if !face.active {
                continue;
            }
            let distance = face.distance(p);
            if distance > best_distance {
                best_distance = distance;
                best = Some(index);
            }
        }
        if let Some(index) = best {
            self.faces[index].outside.push(point);
        }
    }

    fn expand(&mut self, face_index: usize) {
        let eye = {
            let face = &self.faces[face_index];
            face.outside
                .iter()
                .copied()
                .max_by(|&a, &b| {
                    face.distance(self.points[a])
                        .total_cmp(&face.distance(self.points[b]))
                })
                .unwrap_or(face.outside[0])
        };
        let eye_point = self.points[eye];

        let visible: BTreeSet<usize> = self
            .faces
            .iter()
            .enumerate()
            .filter(|(_, f)| f.active && f.distance(eye_point) > self.epsilon)
            .map(|(i, _)| i)
            .chain(std::iter::once(face_index))
            .collect();

        let horizon = self.horizon(&visible);

        let mut orphans = Vec::new();
        for &index in &visible {
            let face = &mut self.faces[index];
            face.active = false;
            orphans.extend(face.outside.drain(..).filter(|&p| p != eye));
        }

        for (a, b) in horizon {
            self.faces
                .push(Face::new(self.points, a, b, eye, self.interior));
        }
        for point in orphans {
            self.assign(point);
        }
    }

    /// Edges of the visible region that border a hidden face, in the
    /// winding of the visible face that owns them.
    fn horizon(&self, visible: &BTreeSet<usize>) -> Vec<(usize, usize)> {
        let mut count: BTreeMap<(usize, usize), usize> = BTreeMap::new();
        for &index in visible {
            for (a, b) in self.faces[index].edges() {
                *count.entry((a.min(b), a.max(b))).or_insert(0) += 1;
            }
        }
        visible
            .iter()
            .flat_map(|&index| self.faces[index].edges())
            .filter(|&(a, b)| count.get(&(a.min(b), a.max(b))) == Some(&1))
            .collect()
    }

    fn initial_tetrahedron(&self) -> Option<[usize; 4]> {
        let points = self.points;
        if points.len() < 4 {
            return None;
        }

        // Widest pair among the axis extremes.
        let mut extremes = Vec::with_capacity(6);
        for axis in 0..3 {
            let by_axis = |&a: &usize, &b: &usize| points[a][axis].total_cmp(&points[b][axis]);
            let indices = 0..points.len();
            extremes.extend(indices.clone().min_by(by_axis));
            extremes.extend(indices.max_by(by_axis));
        }
        let mut best = (0.0, 0, 0);
        for &a in &extremes {
            for &b in &extremes {
                let d = points[a].distance(points[b]);
                if d > best.0 {
                    best = (d, a, b);
                }
            }
        }
        let (span, p0, p1) = best;
        if span <= self.epsilon {
            return None;
        }

        // Farthest from the line p0-p1.
        let axis = (points[p1] - points[p0]) / span;
        let (line_distance, p2) = (0..points.len())
            .map(|i| {
                let offset = points[i] - points[p0];
                ((offset - axis * offset.dot(axis)).length(), i)
            })
            .max_by(|a, b| a.0.total_cmp(&b.0))?;
        if line_distance <= self.epsilon {
            return None;
        }

        // Farthest from the plane p0-p1-p2.
        let normal = (points[p1] - points[p0])
            .cross(points[p2] - points[p0])
            .normalize();
        let (plane_distance, p3) = (0..points.len())
            .map(|i| ((points[i] - points[p0]).dot(normal).abs(), i))
            .max_by(|a, b| a.0.total_cmp(&b.0))?;
        if plane_distance <= self.epsilon {
            return None;
        }

        Some([p0, p1, p2, p3])
    }

    /// Converts active faces into a mesh over the hull's own vertices.
    fn to_mesh(&self) -> Mesh {
        let mut remap: BTreeMap<usize, usize> = BTreeMap::new();
        let mut mesh = Mesh::new();
        for face in self.faces.iter().filter(|f| f.active) {
            let indices = face
                .vertices
                .iter()
                .map(|&v| {
                    *remap
                        .entry(v)
                        .or_insert_with(|| mesh.add_vertex(self.points[v]))
                })
                .collect();
            mesh.faces.push(indices);
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_points() -> Vec<Vector3> {
        let mut points = Vec::new();
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    points.push(Vector3::new(x, y, z));
                }
            }
        }
        points
    }

    fn assert_outward(mesh: &Mesh) {
        let (min, max) = mesh.bounding_box();
        let center = (min + max) / 2.0;
        for face in 0..mesh.face_count() {
            let normal = mesh.face_normal(face).unwrap_or_default();
            let outward = mesh.face_center(face).unwrap_or_default() - center;
            assert!(normal.dot(outward) > 0.0, "face {face} points inward");
        }
    }

    #[test]
    fn test_hull_cube() {
        let mut points = cube_points();
        points.push(Vector3::ZERO);
        points.push(Vector3::new(0.5, -0.25, 0.1));
        let hull = convex_hull(&points, 1e-9).unwrap();
        assert_eq!(hull.vertex_count(), 8);
        assert_eq!(hull.face_count(), 12);
        assert!(hull.validate().is_ok());
        assert_outward(&hull);
    }

    #[test]
    fn test_hull_closed_manifold() {
        let hull = convex_hull(&cube_points(), 1e-9).unwrap();
        // Every edge of a closed triangle mesh is shared by two faces.
        let edges = hull.edges_from_faces();
        assert_eq!(edges.len() * 2, hull.face_count() * 3);
        let euler = hull.vertex_count() as i64 - edges.len() as i64 + hull.face_count() as i64;
        assert_eq!(euler, 2);
    }

    #[test]
    fn test_hull_merges_duplicates() {
        let mut points = cube_points();
        points.extend(cube_points());
        let hull = convex_hull(&points, 1e-9).unwrap();
        assert_eq!(hull.vertex_count(), 8);
    }

    #[test]
    fn test_hull_degenerate() {
        let flat = [Vector3::ZERO, Vector3::X, Vector3::Y, Vector3::new(1.0, 1.0, 0.0)];
        assert!(matches!(convex_hull(&flat, 1e-9), Err(KernelError::Degenerate { .. })));
        assert!(convex_hull(&[Vector3::ZERO, Vector3::X], 1e-9).is_err());
    }
}

//! # Mesh Data Structure
//!
//! Polygon mesh record returned by every builder: vertices, optional
//! explicit edges, and faces of three or more vertex indices.

use crate::error::{KernelError, KernelResult};
use crate::math::{normalize_or_zero, Matrix4, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A polygon mesh.
///
/// Faces are ordered so the right-hand rule gives the outward normal.
/// Indices never change once assigned.
///
/// # Example
///
/// ```rust
/// use meshgen_kernel::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_face(vec![0, 1, 2]).unwrap();
/// assert_eq!(mesh.face_normal(0), Some(DVec3::Z));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Vertex positions.
    pub verts: Vec<Vector3>,
    /// Explicit edges, each stored with `i < j`.
    pub edges: Vec<[usize; 2]>,
    /// Faces as vertex index loops.
    pub faces: Vec<Vec<usize>>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            verts: Vec::with_capacity(vertex_count),
            edges: Vec::new(),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Wraps vertex and face lists without validating them.
    pub fn from_parts(verts: Vec<Vector3>, faces: Vec<Vec<usize>>) -> Self {
        Self {
            verts,
            edges: Vec::new(),
            faces,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: Vector3) -> usize {
        self.verts.push(position);
        self.verts.len() - 1
    }

    /// Adds a face after checking it against the current vertex list.
    pub fn add_face(&mut self, face: Vec<usize>) -> KernelResult<usize> {
        check_face(&face, self.verts.len())?;
        self.faces.push(face);
        Ok(self.faces.len() - 1)
    }

    /// Adds an edge, storing it as `(min, max)`.
    pub fn add_edge(&mut self, a: usize, b: usize) -> KernelResult<usize> {
        if a == b {
            return Err(KernelError::invalid_argument(format!(
                "edge ({a}, {b}) joins a vertex to itself"
            )));
        }
        let count = self.verts.len();
        if a >= count || b >= count {
            return Err(KernelError::invalid_argument(format!(
                "edge ({a}, {b}) references a vertex outside 0..{count}"
            )));
        }
        self.edges.push([a.min(b), a.max(b)]);
        Ok(self.edges.len() - 1)
    }

    /// Appends faces without checking them; run [`Mesh::validate`] after.
    pub fn extend_faces(&mut self, faces: impl IntoIterator<Item = Vec<usize>>) {
        self.faces.extend(faces);
    }

    /// Checks every face and edge invariant.
    pub fn validate(&self) -> KernelResult<()> {
        let count = self.verts.len();
        for face in &self.faces {
            check_face(face, count)?;
        }
        for &[a, b] in &self.edges {
            if a >= b || b >= count {
                return Err(KernelError::invalid_argument(format!(
                    "edge ({a}, {b}) is not an ordered pair of vertices in 0..{count}"
                )));
            }
        }
        Ok(())
    }

    /// Median (vertex average) of a face.
    pub fn face_center(&self, face: usize) -> Option<Vector3> {
        let face = self.faces.get(face)?;
        let sum: Vector3 = face.iter().map(|&i| self.verts[i]).sum();
        Some(sum / face.len() as f64)
    }

    /// Unit face normal by Newell's method; zero for degenerate faces.
    pub fn face_normal(&self, face: usize) -> Option<Vector3> {
        self.faces
            .get(face)
            .map(|face| normalize_or_zero(newell(&self.verts, face)))
    }

    /// Per-vertex normals, area-weighted over incident faces.
    pub fn vertex_normals(&self) -> Vec<Vector3> {
        let mut normals = vec![Vector3::ZERO; self.verts.len()];
        for face in &self.faces {
            // Newell's vector has length 2·area.
            let weighted = newell(&self.verts, face);
            for &i in face {
                normals[i] += weighted;
            }
        }
        normals.into_iter().map(normalize_or_zero).collect()
    }

    /// Sorted, unique edges implied by the face loops.
    pub fn edges_from_faces(&self) -> Vec<[usize; 2]> {
        let mut edges = BTreeSet::new();
        for face in &self.faces {
            for (k, &a) in face.iter().enumerate() {
                let b = face[(k + 1) % face.len()];
                edges.insert([a.min(b), a.max(b)]);
            }
        }
        edges.into_iter().collect()
    }

    /// Vertices sharing an edge with each vertex, in ascending order.
    ///
    /// Covers both the explicit edges and the edges of the face loops.
    pub fn vertex_neighbours(&self) -> Vec<Vec<usize>> {
        let mut neighbours = vec![BTreeSet::new(); self.verts.len()];
        for [a, b] in self.edges.iter().copied().chain(self.edges_from_faces()) {
            neighbours[a].insert(b);
            neighbours[b].insert(a);
        }
        neighbours
            .into_iter()
            .map(|set| set.into_iter().collect())
            .collect()
    }

    /// Axis-aligned bounds as `(min, max)`; zero for an empty mesh.
    pub fn bounding_box(&self) -> (Vector3, Vector3) {
        let Some(&first) = self.verts.first() else {
            return (Vector3::ZERO, Vector3::ZERO);
        };
        self.verts[1..]
            .iter()
            .fold((first, first), |(min, max), &v| (min.min(v), max.max(v)))
    }

    /// Extent along each axis.
    pub fn dimensions(&self) -> Vector3 {
        let (min, max) = self.bounding_box();
        max - min
    }

    /// Copy with every vertex transformed by `matrix`.
    pub fn transformed(&self, matrix: &Matrix4) -> Self {
        Self {
            verts: self
                .verts
                .iter()
                .map(|&v| matrix.transform_point3(v))
                .collect(),
            edges: self.edges.clone(),
            faces: self.faces.clone(),
        }
    }

    /// Appends `other`, offsetting its indices.
    pub fn merge(&mut self, other: &Mesh) {
        let offset = self.verts.len();
        self.verts.extend_from_slice(&other.verts);
        self.edges
            .extend(other.edges.iter().map(|[a, b]| [a + offset, b + offset]));
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|face| face.iter().map(|i| i + offset).collect()),
        );
    }
}

/// Newell's normal (unnormalized, length twice the face area).
fn newell(verts: &[Vector3], face: &[usize]) -> Vector3 {
    let mut normal = Vector3::ZERO;
    for (k, &i) in face.iter().enumerate() {
        let a = verts[i];
        let b = verts[face[(k + 1) % face.len()]];
        normal.x += (a.y - b.y) * (a.z + b.z);
        normal.y += (a.z - b.z) * (a.x + b.x);
        normal.z += (a.x - b.x) * (a.y + b.y);
    }
    normal
}

fn check_face(face: &[usize], vertex_count: usize) -> KernelResult<()> {
    if face.len() < 3 {
        return Err(KernelError::invalid_argument(format!(
            "face {face:?} has fewer than 3 vertices"
        )));
    }
    if let Some(&bad) = face.iter().find(|&&i| i >= vertex_count) {
        return Err(KernelError::invalid_argument(format!(
            "face {face:?} references vertex {bad} outside 0..{vertex_count}"
        )));
    }
    let unique: BTreeSet<_> = face.iter().collect();
    if unique.len() != face.len() {
        return Err(KernelError::invalid_argument(format!(
            "face {face:?} repeats a vertex"
        )));
    }
    Ok(())
}

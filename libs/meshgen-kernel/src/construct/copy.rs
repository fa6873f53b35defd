//! # Template Copies
//!
//! Places a copy of a template mesh on every selected vertex, edge or face
//! of a target mesh. Each element yields a frame (position, normal-like
//! `zdir`, tangential `xdir`) handed to [`copyto`].

use crate::assembly::{copyto, Placement};
use crate::error::{require_positive, KernelError, KernelResult};
use crate::math::{normalize_or_zero, AxisPair, Matrix4, Vector3};
use crate::mesh::Mesh;
use config::constants::{approx_zero, KernelConfig, DEFAULT_EPSILON};
use serde::{Deserialize, Serialize};

/// Elements of the target to copy onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    Vertices(Vec<usize>),
    Edges(Vec<[usize; 2]>),
    Faces(Vec<usize>),
}

impl Selection {
    pub fn len(&self) -> usize {
        match self {
            Self::Vertices(v) => v.len(),
            Self::Edges(e) => e.len(),
            Self::Faces(f) => f.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Target mesh with its object-to-world transform and vertex normals.
#[derive(Debug, Clone)]
pub struct TargetMesh<'a> {
    mesh: &'a Mesh,
    world: Matrix4,
    normals: Vec<Vector3>,
}

impl<'a> TargetMesh<'a> {
    /// Wraps `mesh`, deriving vertex normals from its faces.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if a face or edge of `mesh` refers to a missing vertex.
    pub fn new(mesh: &'a Mesh, world: Matrix4) -> KernelResult<Self> {
        mesh.validate()?;
        Ok(Self {
            mesh,
            world,
            normals: mesh.vertex_normals(),
        })
    }

    /// Replaces the derived normals with host-supplied ones.
    pub fn with_vertex_normals(mut self, normals: Vec<Vector3>) -> KernelResult<Self> {
        if normals.len() != self.mesh.vertex_count() {
            return Err(KernelError::invalid_argument(format!(
                "expected {} vertex normals, got {}",
                self.mesh.vertex_count(),
                normals.len()
            )));
        }
        self.normals = normals;
        Ok(self)
    }

    fn point(&self, local: Vector3) -> Vector3 {
        self.world.transform_point3(local)
    }

    fn vertex(&self, index: usize) -> KernelResult<Vector3> {
        self.mesh
            .verts
            .get(index)
            .copied()
            .ok_or_else(|| out_of_range("vertex", index, self.mesh.vertex_count()))
    }

    /// World-space direction of the normal at `local`.
    fn normal_dir(&self, local: Vector3, normal: Vector3) -> Vector3 {
        self.point(local + normal) - self.point(local)
    }
}

/// How copies are oriented and sized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CopyOptions {
    pub axes: AxisPair,
    /// In edge mode, stretch the template along its secondary axis so it
    /// spans the edge length times this factor.
    pub edge_fit: Option<f64>,
    pub epsilon: f64,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            axes: AxisPair::default(),
            edge_fit: None,
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl From<&KernelConfig> for CopyOptions {
    fn from(config: &KernelConfig) -> Self {
        Self {
            epsilon: config.epsilon,
            ..Self::default()
        }
    }
}

/// One copy of `source` per element in `selection`, in selection order.
///
/// - **Vertices**: at the vertex, `zdir` along its normal, `xdir` pointing
///   from the vertex toward its lowest-index neighbour, projected into the
///   normal's plane.
/// - **Edges**: at the midpoint, `xdir` along `v0 - v1`, `zdir` the sum of
///   both vertex normals projected off the edge.
/// - **Faces**: at the face median, `zdir` along the face normal, `xdir`
///   toward the first face vertex.
///
/// # Errors
///
/// `InvalidArgument` for out-of-range indices or an isolated vertex;
/// `Degenerate` for a zero-length edge, an unpatchable frame, or an edge
/// fit against a template that is flat along its secondary axis.
pub fn copy_template_onto_selection(
    target: &TargetMesh<'_>,
    source: &Mesh,
    selection: &Selection,
    options: &CopyOptions,
) -> KernelResult<Vec<Placement>> {
    if let Some(factor) = options.edge_fit {
        require_positive("edge fit scale", factor)?;
    }

    let placements = match selection {
        Selection::Vertices(indices) => {
            let neighbours = target.mesh.vertex_neighbours();
            indices
                .iter()
                .map(|&v| on_vertex(target, &neighbours, source, v, options))
                .collect::<KernelResult<Vec<_>>>()?
        }
        Selection::Edges(edges) => edges
            .iter()
            .map(|&edge| on_edge(target, source, edge, options))
            .collect::<KernelResult<Vec<_>>>()?,
        Selection::Faces(faces) => faces
            .iter()
            .map(|&face| on_face(target, source, face, options))
            .collect::<KernelResult<Vec<_>>>()?,
    };

    log::debug!(
        "copied template ({} vertices) onto {} elements",
        source.vertex_count(),
        placements.len()
    );
    Ok(placements)
}

fn on_vertex(
    target: &TargetMesh<'_>,
    neighbours: &[Vec<usize>],
    source: &Mesh,
    index: usize,
    options: &CopyOptions,
) -> KernelResult<Placement> {
    let local = target.vertex(index)?;
    let Some(&other) = neighbours[index].first() else {
        return Err(KernelError::invalid_argument(format!(
            "vertex {index} has no connected vertex"
        )));
    };
    let pos = target.point(local);
    let zdir = normalize_or_zero(target.normal_dir(local, target.normals[index]));
    let edir = pos - target.point(target.mesh.verts[other]);
    let xdir = -(edir - zdir * edir.dot(zdir));
    copyto(source, pos, xdir, zdir, options.axes, None, options.epsilon)
}

fn on_edge(
    target: &TargetMesh<'_>,
    source: &Mesh,
    [a, b]: [usize; 2],
    options: &CopyOptions,
) -> KernelResult<Placement> {
    let (v0, v1) = (target.vertex(a)?, target.vertex(b)?);
    let (w0, w1) = (target.point(v0), target.point(v1));
    let pos = (w0 + w1) / 2.0;
    let along = w0 - w1;
    let length = along.length();
    if approx_zero(length, options.epsilon) {
        return Err(KernelError::degenerate(format!(
            "edge ({a}, {b}) has zero length"
        )));
    }
    let xdir = along / length;

    let projected = |local: Vector3, normal: Vector3| {
        let n = target.normal_dir(local, normal);
        normalize_or_zero(n - xdir * n.dot(xdir))
    };
    let zdir = projected(v0, target.normals[a]) + projected(v1, target.normals[b]);

    let scale = match options.edge_fit {
        Some(factor) => Some(edge_fit_scale(source, options.axes, factor * length, options.epsilon)?),
        None => None,
    };
    copyto(source, pos, xdir, zdir, options.axes, scale, options.epsilon)
}

fn on_face(
    target: &TargetMesh<'_>,
    source: &Mesh,
    index: usize,
    options: &CopyOptions,
) -> KernelResult<Placement> {
    let (Some(center), Some(normal)) = (target.mesh.face_center(index), target.mesh.face_normal(index))
    else {
        return Err(out_of_range("face", index, target.mesh.face_count()));
    };
    let pos = target.point(center);
    let zdir = target.normal_dir(center, normal);
    let first = target.mesh.faces[index][0];
    let xdir = target.point(target.mesh.verts[first]) - pos;
    copyto(source, pos, xdir, zdir, options.axes, None, options.epsilon)
}

/// Per-axis scale stretching `source` to `span` along the secondary axis.
fn edge_fit_scale(source: &Mesh, axes: AxisPair, span: f64, epsilon: f64) -> KernelResult<Vector3> {
    let axis = axes.secondary();
    let extent = source.dimensions()[axis];
    if extent < epsilon {
        return Err(KernelError::degenerate(format!(
            "template has no extent along its {axes} secondary axis"
        )));
    }
    let mut scale = Vector3::ONE;
    scale[axis] = span / extent;
    Ok(scale)
}

fn out_of_range(what: &str, index: usize, count: usize) -> KernelError {
    KernelError::invalid_argument(format!("{what} {index} out of range (count: {count})"))
}

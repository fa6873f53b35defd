//! Flat triangles in the XY plane, optionally subdivided.

use super::{finish, prepare, PrimitiveParams};
use crate::error::{require_positive, KernelError, KernelResult};
use crate::math::Vector3;
use crate::mesh::Mesh;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Corner layout of the triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TriangleKind {
    /// Apex twice as high as the base is wide.
    #[default]
    Isosceles,
    Equilateral,
    IsoscelesRight,
    /// Legs in a 4:3 ratio.
    ScaleneRight,
}

/// How the triangle is split into faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TriangleTopology {
    #[default]
    OneTri,
    /// Three triangles meeting at the centroid `D`.
    ThreeTris,
    /// Three quads meeting at the centroid `D`.
    ThreeQuads,
    /// Six quads fanned around `E`, halfway from `A` to the centroid.
    SixQuads,
}

impl TriangleTopology {
    /// Topology names as accepted by [`TriangleTopology::from_str`].
    pub const NAMES: [&'static str; 4] = ["1tri", "3tri", "3quad", "6quad"];

    fn vertex_count(self) -> usize {
        match self {
            Self::OneTri => 3,
            Self::ThreeTris => 4,
            Self::ThreeQuads => 7,
            Self::SixQuads => 13,
        }
    }

    fn faces(self) -> &'static [&'static [usize]] {
        match self {
            Self::OneTri => &[&[0, 1, 2]],
            Self::ThreeTris => &[&[0, 1, 3], &[1, 2, 3], &[2, 0, 3]],
            Self::ThreeQuads => &[&[0, 4, 3, 5], &[1, 6, 3, 4], &[2, 5, 3, 6]],
            Self::SixQuads => &[
                &[12, 6, 3, 7],
                &[12, 7, 1, 8],
                &[12, 8, 5, 9],
                &[12, 9, 2, 10],
                &[12, 10, 4, 11],
                &[12, 11, 0, 6],
            ],
        }
    }
}

impl fmt::Display for TriangleTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let index = match self {
            Self::OneTri => 0,
            Self::ThreeTris => 1,
            Self::ThreeQuads => 2,
            Self::SixQuads => 3,
        };
        f.write_str(Self::NAMES[index])
    }
}

impl FromStr for TriangleTopology {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1tri" => Ok(Self::OneTri),
            "3tri" => Ok(Self::ThreeTris),
            "3quad" => Ok(Self::ThreeQuads),
            "6quad" => Ok(Self::SixQuads),
            other => Err(KernelError::invalid_argument(format!(
                "unknown triangle topology '{other}' (expected one of {})",
                Self::NAMES.join(", ")
            ))),
        }
    }
}

/// Parameters of [`triangle`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangleParams {
    pub kind: TriangleKind,
    pub topology: TriangleTopology,
    pub scale: f64,
    /// Mirror across the YZ plane.
    pub flip_x: bool,
    /// Mirror across the XZ plane.
    pub flip_y: bool,
}

impl Default for TriangleParams {
    fn default() -> Self {
        Self {
            kind: TriangleKind::default(),
            topology: TriangleTopology::default(),
            scale: 1.0,
            flip_x: false,
            flip_y: false,
        }
    }
}

impl TriangleParams {
    /// Corners `A` (apex), `B` and `C`.
    pub fn corners(&self) -> [Vector3; 3] {
        let xs = if self.flip_x { -1.0 } else { 1.0 };
        let ys = if self.flip_y { -1.0 } else { 1.0 };
        let s = self.scale;
        let apex = match self.kind {
            TriangleKind::Equilateral => 0.75_f64.sqrt() * ys * s,
            _ => ys * s,
        };
        let a = Vector3::new(0.0, apex, 0.0);
        let (b, c) = match self.kind {
            TriangleKind::Isosceles | TriangleKind::Equilateral => (
                Vector3::new(0.5 * xs * s, 0.0, 0.0),
                Vector3::new(-0.5 * xs * s, 0.0, 0.0),
            ),
            TriangleKind::IsoscelesRight => (Vector3::ZERO, Vector3::new(xs * s, 0.0, 0.0)),
            TriangleKind::ScaleneRight => (Vector3::ZERO, Vector3::new(0.75 * xs * s, 0.0, 0.0)),
        };
        [a, b, c]
    }
}

impl PrimitiveParams for TriangleParams {
    const NAME: &'static str = "triangle";

    fn validate(&self) -> KernelResult<()> {
        require_positive("scale", self.scale)
    }

    fn vertex_count(&self) -> usize {
        self.topology.vertex_count()
    }

    fn face_count(&self) -> usize {
        self.topology.faces().len()
    }

    fn build(&self) -> KernelResult<Mesh> {
        triangle(self)
    }
}

/// Builds a flat triangle mesh.
///
/// Vertex layout by topology, each extending the previous where shared:
///
/// | topology | vertices                                                |
/// |----------|---------------------------------------------------------|
/// | 1tri     | `A B C`                                                 |
/// | 3tri     | `A B C D`                                               |
/// | 3quad    | `A B C D AB AC BC`                                      |
/// | 6quad    | `A B C AB AC BC AAB BBA BBC BCC CCA AAC E`              |
///
/// `D` is the centroid, two-letter names are edge midpoints, and `AAB` is
/// the midpoint of `A` and `AB` (likewise for the rest). Mirroring along
/// exactly one axis reverses every face so the normal keeps its side.
///
/// The 6quad fan walks the whole boundary around `E`, so the quads centred
/// on `AB`, `BC` and `AC` have a straight corner there. With `E` the only
/// interior vertex, six faces leave six interior edges for nine vertices in
/// the middle of a side, so some straight corner is unavoidable.
///
/// ## Example
///
/// ```rust
/// use meshgen_kernel::primitives::{triangle, TriangleKind, TriangleParams};
///
/// let params = TriangleParams { kind: TriangleKind::Equilateral, ..TriangleParams::default() };
/// let mesh = triangle(&params).unwrap();
/// assert_eq!(mesh.faces, vec![vec![0, 1, 2]]);
/// assert_eq!(mesh.verts[1].x, 0.5);
/// ```
pub fn triangle(params: &TriangleParams) -> KernelResult<Mesh> {
    let mut mesh = prepare(params)?;
    let [a, b, c] = params.corners();
    let d = (a + b + c) / 3.0;
    let ab = a.lerp(b, 0.5);
    let ac = a.lerp(c, 0.5);
    let bc = b.lerp(c, 0.5);

    let verts = match params.topology {
        TriangleTopology::OneTri => vec![a, b, c],
        TriangleTopology::ThreeTris => vec![a, b, c, d],
        TriangleTopology::ThreeQuads => vec![a, b, c, d, ab, ac, bc],
        TriangleTopology::SixQuads => vec![
            a,
            b,
            c,
            ab,
            ac,
            bc,
            a.lerp(ab, 0.5),
            b.lerp(ab, 0.5),
            b.lerp(bc, 0.5),
            c.lerp(bc, 0.5),
            c.lerp(ac, 0.5),
            a.lerp(ac, 0.5),
            a.lerp(d, 0.5),
        ],
    };
    for v in verts {
        mesh.add_vertex(v);
    }

    let mirrored = params.flip_x != params.flip_y;
    for face in params.topology.faces() {
        let mut face = face.to_vec();
        if mirrored {
            face.reverse();
        }
        mesh.add_face(face)?;
    }

    Ok(finish::<TriangleParams>(mesh))
}

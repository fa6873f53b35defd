//! # Constructions
//!
//! Geometric queries and placements built on the assembly layer: circle
//! tangents, three-point arcs, bounded Voronoi cells, template copies onto
//! mesh selections, and armature/lattice helpers.

mod arc;
mod copy;
mod rig;
mod tangent;
mod voronoi;

pub use arc::{arc_center, ArcRecord};
pub use copy::{copy_template_onto_selection, CopyOptions, Selection, TargetMesh};
pub use rig::{bones_from_faces, lattice_from_points, Bone, LatticePlacement};
pub use tangent::{tangent_points_from_pole, tangents_of_two_circles, Circle, CircleTangents, TangentLine};
pub use voronoi::{voronoi_cells, voronoi_cells_with, VoronoiCell, VoronoiOptions};

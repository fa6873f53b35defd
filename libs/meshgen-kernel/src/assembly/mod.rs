//! # Mesh Assembly
//!
//! Building blocks shared by the primitive builders and constructions:
//! ring bridging, Bezier sampling, local frames, half-space intersection
//! and convex hulls.

mod bezier;
mod bridge;
mod frame;
mod halfspace;
mod hull;

pub use bezier::{cubic, polyline_mesh, sample_bezier, BezierPoint};
pub use bridge::bridge;
pub use frame::{copyto, Frame, Placement};
pub use halfspace::{intersect_halfspaces, Polytope};
pub use hull::convex_hull;

//! # Meshgen Kernel
//!
//! Pure geometry for parametric mesh generation.
//! Turns small parameter records into polygon meshes and answers a handful
//! of geometric construction queries.
//!
//! ## Architecture
//!
//! ```text
//! math → mesh → assembly → primitives
//!                        ↘ construct
//! ```
//!
//! ## Layers
//!
//! - **Math**: glam vectors, planes, axis-pair frames
//! - **Assembly**: ring bridging, Bezier sampling, placement frames, hulls
//! - **Primitives**: diamond, gem, spindle, star, wedge, twisted torus,
//!   function surface, triangle
//! - **Construct**: tangents, arc centers, Voronoi cells, template copies,
//!   armatures and lattices
//!
//! Every routine is a pure function: it returns a full record or a
//! [`KernelError`], never a partial mesh.
//!
//! ## Usage
//!
//! ```rust
//! use meshgen_kernel::primitives::{wedge, WedgeParams};
//!
//! let mesh = wedge(&WedgeParams::default()).unwrap();
//! assert_eq!(mesh.vertex_count(), 6);
//! assert_eq!(mesh.face_count(), 5);
//! ```

pub mod assembly;
pub mod construct;
pub mod error;
pub mod math;
pub mod mesh;
pub mod primitives;

pub use error::{KernelError, KernelResult};
pub use mesh::Mesh;
pub use primitives::PrimitiveParams;

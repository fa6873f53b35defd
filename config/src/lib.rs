//! # Config Crate
//!
//! Centralized tolerances and limits for the meshgen geometry kernel.
//! Every magic number the kernel and the expression language rely on is
//! defined here so both crates agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{approx_zero, DEFAULT_EPSILON, MIN_SEGMENTS};
//!
//! // Topology-deciding comparisons use DEFAULT_EPSILON unless the caller
//! // supplies its own tolerance.
//! assert!(approx_zero(1e-9, DEFAULT_EPSILON));
//!
//! // Ring-based builders need at least a triangle's worth of segments.
//! let segments = 2_u32.max(MIN_SEGMENTS);
//! assert_eq!(segments, 3);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Pure values, usable from any layer
//! - **Validated Snapshots**: `KernelConfig` rejects nonsensical tolerances

pub mod constants;

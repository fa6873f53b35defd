//! # Configuration Constants
//!
//! Tolerances, parameter minima and evaluation budgets shared by the
//! geometry kernel and the expression language.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Parameter Minima**: Hard lower bounds for builder parameters
//! - **Limits**: Safety bounds on output size and evaluation effort

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Default tolerance for comparisons that decide topology.
///
/// Coincident points, collinearity and zero-length vectors are all gated on
/// this value unless a caller supplies its own through [`KernelConfig`].
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_EPSILON;
///
/// let gap: f64 = 1e-8;
/// assert!(gap.abs() < DEFAULT_EPSILON);
/// ```
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Tolerance used when checking a point against a half-space during
/// polytope vertex enumeration.
///
/// Kept tighter than [`DEFAULT_EPSILON`] so cells of nearby sites do not
/// swallow each other's corners.
pub const HALFSPACE_EPSILON: f64 = 1e-9;

/// Vectors shorter than this normalize to zero instead of blowing up.
///
/// # Example
///
/// ```rust
/// use config::constants::NORMALIZE_EPSILON;
/// assert!(NORMALIZE_EPSILON < 1e-9);
/// ```
pub const NORMALIZE_EPSILON: f64 = 1e-12;

// =============================================================================
// PARAMETER MINIMA
// =============================================================================

/// Minimum segment count for ring-based builders (diamond, gem, spindle,
/// torus sections).
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_SEGMENTS;
/// assert_eq!(MIN_SEGMENTS, 3);
/// ```
pub const MIN_SEGMENTS: u32 = 3;

/// Minimum number of star points.
pub const MIN_STAR_POINTS: u32 = 2;

/// Minimum grid divisions per axis for the function surface.
pub const MIN_GRID_DIVISIONS: u32 = 3;

/// Minimum Bezier sampling resolution.
pub const MIN_BEZIER_RESOLUTION: u32 = 1;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of vertices a single builder call may produce.
///
/// Builders compute their declared vertex count up front and refuse to
/// allocate past this bound.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_VERTICES;
///
/// let declared = 64 * 64;
/// assert!(declared < MAX_VERTICES);
/// ```
pub const MAX_VERTICES: usize = 10_000_000;

/// Maximum nesting depth of a function-surface expression.
///
/// Bounds recursion in both the parser and the evaluator.
pub const MAX_EXPRESSION_DEPTH: usize = 64;

/// Maximum length, in bytes, of a function-surface expression.
pub const MAX_EXPRESSION_LENGTH: usize = 4096;

/// Remaining stack, in bytes, below which recursive descent grows the stack
/// through the `stacker` crate.
pub const STACKER_RED_ZONE_BYTES: usize = 64 * 1024;

/// Size of each stack segment allocated by `stacker` when growing.
///
/// # Example
///
/// ```rust
/// use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
/// assert!(STACKER_STACK_SIZE_BYTES > STACKER_RED_ZONE_BYTES);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 1024 * 1024;

// =============================================================================
// KERNEL CONFIG
// =============================================================================

/// Immutable snapshot of the tunables a kernel call may override.
///
/// # Examples
/// ```
/// use config::constants::KernelConfig;
/// let config = KernelConfig::default();
/// assert!(config.epsilon > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelConfig {
    /// Tolerance for topology-deciding comparisons.
    pub epsilon: f64,
    /// Nesting budget for function-surface expressions.
    pub max_expression_depth: usize,
}

impl KernelConfig {
    /// Builds a configuration, rejecting non-positive tolerances and a zero
    /// expression budget.
    ///
    /// # Examples
    /// ```
    /// use config::constants::KernelConfig;
    /// let cfg = KernelConfig::new(1.0e-9, 32).expect("valid config");
    /// assert_eq!(cfg.max_expression_depth, 32);
    /// ```
    pub fn new(epsilon: f64, max_expression_depth: usize) -> Result<Self, ConfigError> {
        if !epsilon.is_finite() || epsilon <= 0.0 {
            return Err(ConfigError::InvalidEpsilon(epsilon));
        }
        if max_expression_depth == 0 {
            return Err(ConfigError::InvalidDepth(max_expression_depth));
        }
        Ok(Self {
            epsilon,
            max_expression_depth,
        })
    }

    /// Returns a copy with a different tolerance, keeping the other fields.
    pub fn with_epsilon(self, epsilon: f64) -> Result<Self, ConfigError> {
        Self::new(epsilon, self.max_expression_depth)
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_expression_depth: MAX_EXPRESSION_DEPTH,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the tolerance is zero, negative or not finite.
    InvalidEpsilon(f64),
    /// Raised when the expression depth budget is zero.
    InvalidDepth(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidEpsilon(value) => {
                write!(f, "epsilon must be positive and finite: {value}")
            }
            ConfigError::InvalidDepth(value) => {
                write!(f, "max_expression_depth must be >= 1: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPERS
// =============================================================================

/// Checks if two values are equal within `epsilon`.
///
/// # Example
///
/// ```rust
/// use config::constants::{approx_equal, DEFAULT_EPSILON};
///
/// assert!(approx_equal(1.0, 1.0 + 1e-9, DEFAULT_EPSILON));
/// assert!(!approx_equal(1.0, 1.1, DEFAULT_EPSILON));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

/// Checks if a value is zero within `epsilon`.
///
/// # Example
///
/// ```rust
/// use config::constants::{approx_zero, DEFAULT_EPSILON};
///
/// assert!(approx_zero(1e-9, DEFAULT_EPSILON));
/// assert!(!approx_zero(0.1, DEFAULT_EPSILON));
/// ```
#[inline]
pub fn approx_zero(value: f64, epsilon: f64) -> bool {
    value.abs() < epsilon
}

//! # Kernel Errors
//!
//! Typed failures returned by every kernel routine. No routine returns a
//! partial mesh: either the full record is built or one of these is.

use meshgen_expr::ExprError;
use thiserror::Error;

/// Errors that can occur in a kernel call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KernelError {
    /// Parameter outside its declared range.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Computation would divide by zero or produce non-finite values.
    #[error("Degenerate geometry: {message}")]
    Degenerate { message: String },

    /// Tangent request with incompatible geometry.
    #[error("No tangent: {message}")]
    NoTangent { message: String },

    /// Surface expression failed to compile or evaluate.
    #[error("Math error in `{fragment}`: {source}")]
    MathError {
        /// Offending expression fragment, for display.
        fragment: String,
        /// Underlying expression error.
        source: ExprError,
    },
}

impl KernelError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::Degenerate {
            message: message.into(),
        }
    }

    /// Creates a no-tangent error.
    pub fn no_tangent(message: impl Into<String>) -> Self {
        Self::NoTangent {
            message: message.into(),
        }
    }
}

impl From<ExprError> for KernelError {
    fn from(err: ExprError) -> Self {
        Self::MathError {
            fragment: err.fragment().to_string(),
            source: err,
        }
    }
}

/// Result alias used throughout the kernel.
pub type KernelResult<T> = Result<T, KernelError>;

/// Fails with `InvalidArgument` unless `value > 0` and finite.
pub(crate) fn require_positive(name: &str, value: f64) -> KernelResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(KernelError::invalid_argument(format!(
            "{name} must be > 0, got {value}"
        )))
    }
}

/// Fails with `InvalidArgument` unless `value >= min`.
pub(crate) fn require_at_least(name: &str, value: u32, min: u32) -> KernelResult<()> {
    if value >= min {
        Ok(())
    } else {
        Err(KernelError::invalid_argument(format!(
            "{name} must be >= {min}, got {value}"
        )))
    }
}

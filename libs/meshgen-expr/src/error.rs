//! # Expression Errors
//!
//! Every failure carries enough context to show the user which part of the
//! expression was at fault.

use crate::span::Span;
use thiserror::Error;

/// Errors raised while compiling or evaluating an expression.
///
/// ## Example
///
/// ```rust
/// use meshgen_expr::{Expression, ExprError};
///
/// match Expression::compile("open(x)") {
///     Err(ExprError::UnknownName { name, .. }) => assert_eq!(name, "open"),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExprError {
    /// Malformed input (unexpected character, token or end of input).
    #[error("parse error: {message} (near `{fragment}`)")]
    Parse {
        /// What went wrong.
        message: String,
        /// Source text at the failure point.
        fragment: String,
        /// Location of the failure.
        span: Span,
    },

    /// A name outside the sandbox was referenced.
    #[error("name `{name}` is not available in surface expressions")]
    UnknownName {
        /// The rejected identifier.
        name: String,
        /// Where it appeared.
        span: Span,
    },

    /// A function was called with the wrong number of arguments.
    #[error("`{name}` expects {expected} argument(s), got {found}")]
    Arity {
        /// Function name.
        name: String,
        /// Accepted argument count description.
        expected: String,
        /// Supplied argument count.
        found: usize,
    },

    /// A value of the wrong shape was used (indexing a number, scalar
    /// expected but a pair produced).
    #[error("type error: {message} in `{fragment}`")]
    Type {
        /// What went wrong.
        message: String,
        /// Offending source text.
        fragment: String,
    },

    /// Evaluation produced a non-real or undefined value.
    #[error("`{fragment}` does not evaluate to a real number")]
    NotReal {
        /// Offending source text.
        fragment: String,
    },

    /// Nesting exceeded the evaluation budget.
    #[error("expression nesting exceeds the limit of {limit}")]
    DepthExceeded {
        /// Configured depth budget.
        limit: usize,
    },

    /// Source text exceeds the length limit.
    #[error("expression is {length} bytes long (max: {limit})")]
    TooLong {
        /// Actual length.
        length: usize,
        /// Maximum accepted length.
        limit: usize,
    },
}

impl ExprError {
    /// Creates a parse error quoting the source at `span`.
    pub fn parse(message: impl Into<String>, source: &str, span: Span) -> Self {
        Self::Parse {
            message: message.into(),
            fragment: span.slice(source).to_string(),
            span,
        }
    }

    /// Creates a non-real error quoting the source at `span`.
    pub fn not_real(source: &str, span: Span) -> Self {
        Self::NotReal {
            fragment: span.slice(source).to_string(),
        }
    }

    /// Creates a type error quoting the source at `span`.
    pub fn type_error(message: impl Into<String>, source: &str, span: Span) -> Self {
        Self::Type {
            message: message.into(),
            fragment: span.slice(source).to_string(),
        }
    }

    /// The expression fragment responsible for the error, for diagnostic
    /// display. Errors not tied to a location return the empty string.
    pub fn fragment(&self) -> &str {
        match self {
            Self::Parse { fragment, .. }
            | Self::Type { fragment, .. }
            | Self::NotReal { fragment } => fragment,
            Self::UnknownName { name, .. } | Self::Arity { name, .. } => name,
            Self::DepthExceeded { .. } | Self::TooLong { .. } => "",
        }
    }
}

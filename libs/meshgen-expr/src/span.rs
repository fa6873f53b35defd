//! # Source Spans
//!
//! Byte ranges into the expression source, used to quote the offending
//! fragment when parsing or evaluation fails.

/// Half-open byte range `[start, end)` into the source text.
///
/// ## Example
///
/// ```rust
/// use meshgen_expr::Span;
///
/// let span = Span::new(4, 7);
/// assert_eq!(span.slice("1 + sin(x)"), "sin");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// First byte of the range.
    pub start: usize,
    /// One past the last byte of the range.
    pub end: usize,
}

impl Span {
    /// Creates a span from byte offsets.
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Returns the covered text, or an empty string when the span does not
    /// fall on character boundaries of `source`.
    pub fn slice(self, source: &str) -> &str {
        source.get(self.start..self.end).unwrap_or("")
    }

    /// Length of the span in bytes.
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True for a zero-width span (used for end-of-input).
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

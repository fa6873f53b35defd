//! # Character Cursor
//!
//! Peekable character cursor over the expression source, tracking the byte
//! offset as it advances.
//!
//! ## Example
//!
//! ```rust
//! use meshgen_expr::lexer::Cursor;
//!
//! let mut cursor = Cursor::new("x**2");
//! assert_eq!(cursor.peek(), Some('x'));
//! cursor.advance();
//! assert_eq!(cursor.peek(), Some('*'));
//! assert_eq!(cursor.peek_next(), Some('*'));
//! ```

// =============================================================================
// CURSOR
// =============================================================================

/// Character cursor with byte-offset tracking.
pub struct Cursor<'a> {
    /// Source text.
    source: &'a str,
    /// Current byte offset.
    byte: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self { source, byte: 0 }
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.byte
    }

    /// Check if at end of input.
    pub fn is_eof(&self) -> bool {
        self.byte >= self.source.len()
    }

    /// Peek at the current character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.source[self.byte..].chars().next()
    }

    /// Peek one character past the current one.
    pub fn peek_next(&self) -> Option<char> {
        let mut chars = self.source[self.byte..].chars();
        chars.next();
        chars.next()
    }

    /// Consume and return the current character.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.byte += c.len_utf8();
        Some(c)
    }

    /// Advance while `predicate` holds.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use meshgen_expr::lexer::Cursor;
    ///
    /// let mut cursor = Cursor::new("atan2(y, x)");
    /// cursor.advance_while(|c| c.is_ascii_alphanumeric());
    /// assert_eq!(cursor.peek(), Some('('));
    /// ```
    pub fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }
            self.advance();
        }
    }

    /// Text between `start` and the current offset.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.byte]
    }
}

// =============================================================================
// TESTS
// =============================================================================

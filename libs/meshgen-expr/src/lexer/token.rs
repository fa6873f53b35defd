//! # Tokens
//!
//! Token kinds of the surface expression language: numbers, identifiers,
//! arithmetic operators and grouping punctuation.

use crate::span::Span;
use std::fmt;

/// Kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Numeric literal (`2`, `0.5`, `.5`, `1e-3`).
    Number,
    /// Identifier (`x`, `sin`, `pi`).
    Identifier,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `**`
    StarStar,
    /// `/`
    Slash,
    /// `//`
    SlashSlash,
    /// `%`
    Percent,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// End of input.
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Number => "number",
            Self::Identifier => "identifier",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::StarStar => "'**'",
            Self::Slash => "'/'",
            Self::SlashSlash => "'//'",
            Self::Percent => "'%'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Comma => "','",
            Self::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// A token with its source location and text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token kind.
    pub kind: TokenKind,
    /// Location in the source.
    pub span: Span,
    /// Source text of the token.
    pub text: String,
}

impl Token {
    /// Create a token.
    pub fn new(kind: TokenKind, span: Span, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }
}

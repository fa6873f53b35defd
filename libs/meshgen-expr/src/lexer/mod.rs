//! # Expression Lexer
//!
//! Tokenizes surface expressions. Unlike a general-purpose lexer it fails on
//! the first character outside the language, so strings, attribute access
//! and other escape hatches never reach the parser.
//!
//! ## Example
//!
//! ```rust
//! use meshgen_expr::lexer::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("1 - x**2").tokenize().unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         TokenKind::Number,
//!         TokenKind::Minus,
//!         TokenKind::Identifier,
//!         TokenKind::StarStar,
//!         TokenKind::Number,
//!         TokenKind::Eof,
//!     ]
//! );
//! ```

mod cursor;
mod token;

pub use cursor::Cursor;
pub use token::{Token, TokenKind};

use crate::error::ExprError;
use crate::span::Span;

// =============================================================================
// LEXER
// =============================================================================

/// Surface expression lexer.
pub struct Lexer<'a> {
    /// Source text being lexed.
    source: &'a str,
    /// Character cursor.
    cursor: Cursor<'a>,
    /// Collected tokens.
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: Cursor::new(source),
            tokens: Vec::new(),
        }
    }

    /// Tokenize the entire source, appending an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, ExprError> {
        loop {
            self.cursor.advance_while(char::is_whitespace);
            if self.cursor.is_eof() {
                break;
            }
            self.scan_token()?;
        }

        let end = self.cursor.offset();
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(end, end), String::new()));
        Ok(self.tokens)
    }

    /// Scan a single token.
    fn scan_token(&mut self) -> Result<(), ExprError> {
        let start = self.cursor.offset();
        let Some(c) = self.cursor.peek() else {
            return Ok(());
        };

        if c.is_ascii_digit() || (c == '.' && self.next_is_digit()) {
            return self.scan_number(start);
        }
        if c.is_ascii_alphabetic() || c == '_' {
            self.cursor
                .advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
            self.push(TokenKind::Identifier, start);
            return Ok(());
        }

        self.cursor.advance();
        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '%' => TokenKind::Percent,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            '*' => {
                if self.cursor.peek() == Some('*') {
                    self.cursor.advance();
                    TokenKind::StarStar
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                if self.cursor.peek() == Some('/') {
                    self.cursor.advance();
                    TokenKind::SlashSlash
                } else {
                    TokenKind::Slash
                }
            }
            other => {
                return Err(ExprError::parse(
                    format!("unexpected character '{other}'"),
                    self.source,
                    Span::new(start, self.cursor.offset()),
                ));
            }
        };
        self.push(kind, start);
        Ok(())
    }

    /// Scan a decimal literal with optional fraction and exponent.
    fn scan_number(&mut self, start: usize) -> Result<(), ExprError> {
        self.cursor.advance_while(|c| c.is_ascii_digit());
        if self.cursor.peek() == Some('.') {
            self.cursor.advance();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }
        if matches!(self.cursor.peek(), Some('e' | 'E')) {
            self.cursor.advance();
            if matches!(self.cursor.peek(), Some('+' | '-')) {
                self.cursor.advance();
            }
            let digits_start = self.cursor.offset();
            self.cursor.advance_while(|c| c.is_ascii_digit());
            if self.cursor.offset() == digits_start {
                return Err(ExprError::parse(
                    "exponent has no digits",
                    self.source,
                    Span::new(start, self.cursor.offset()),
                ));
            }
        }
        // `2x` or `1.5.3` are not numbers followed by something else.
        if matches!(self.cursor.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_' || c == '.')
        {
            self.cursor
                .advance_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
            return Err(ExprError::parse(
                "invalid number literal",
                self.source,
                Span::new(start, self.cursor.offset()),
            ));
        }
        self.push(TokenKind::Number, start);
        Ok(())
    }

    fn next_is_digit(&self) -> bool {
        self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
    }

    fn push(&mut self, kind: TokenKind, start: usize) {
        let text = self.cursor.slice_from(start);
        self.tokens.push(Token::new(
            kind,
            Span::new(start, self.cursor.offset()),
            text,
        ));
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_lex_operators() {
        assert_eq!(
            kinds("+ - * ** / // %"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::StarStar,
                TokenKind::Slash,
                TokenKind::SlashSlash,
                TokenKind::Percent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_numbers() {
        let tokens = Lexer::new("2 0.25 .5 1e-3 3.E2").tokenize().unwrap();
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["2", "0.25", ".5", "1e-3", "3.E2", ""]);
    }

    #[test]
    fn test_lex_call() {
        assert_eq!(
            kinds("atan2(y, x)[0]"),
            vec![
                TokenKind::Identifier,
                TokenKind::LParen,
                TokenKind::Identifier,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::RParen,
                TokenKind::LBracket,
                TokenKind::Number,
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lex_rejects_strings_and_attributes() {
        assert!(Lexer::new("'rm'").tokenize().is_err());
        assert!(Lexer::new("x.real").tokenize().is_err());
        assert!(Lexer::new("x; y").tokenize().is_err());
    }

    #[test]
    fn test_lex_rejects_bad_numbers() {
        assert!(Lexer::new("1e").tokenize().is_err());
        assert!(Lexer::new("2x").tokenize().is_err());
        assert!(Lexer::new("1.2.3").tokenize().is_err());
    }

    #[test]
    fn test_lex_spans() {
        let tokens = Lexer::new("  sin(x)").tokenize().unwrap();
        assert_eq!(tokens[0].span, Span::new(2, 5));
        assert_eq!(tokens.last().map(|t| t.span), Some(Span::new(8, 8)));
    }
}

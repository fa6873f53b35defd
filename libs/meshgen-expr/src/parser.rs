//! # Expression Parser
//!
//! Precedence-climbing parser for surface expressions.
//!
//! ## Operator Precedence
//!
//! | Precedence | Operators | Associativity |
//! |------------|-----------|---------------|
//! | 1 | + - | Left |
//! | 2 | * / // % | Left |
//! | 3 | - + (unary) | Right |
//! | 4 | ** | Right |
//! | 5 | call `f(..)`, index `[..]` | Left |
//!
//! As in Python, `**` binds tighter than a unary minus on its left but
//! accepts one on its right: `-x**2 == -(x**2)` and `2**-1 == 0.5`.
//!
//! ## Example
//!
//! ```rust
//! use meshgen_expr::parser::Parser;
//! use meshgen_expr::ast::{BinaryOp, Expr};
//!
//! let ast = Parser::new("1 + x * y", 64).unwrap().parse().unwrap();
//! assert!(matches!(ast, Expr::Binary { op: BinaryOp::Add, .. }));
//! ```

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::ExprError;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::span::Span;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use stacker::maybe_grow;

// =============================================================================
// PRECEDENCE
// =============================================================================

/// Binding strength of binary operators. Higher values bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    /// Sentinel for the outermost call.
    None = 0,
    /// `+ -`
    Term = 1,
    /// `* / // %`
    Factor = 2,
}

impl Precedence {
    fn of_binary(kind: TokenKind) -> Option<(Self, BinaryOp)> {
        match kind {
            TokenKind::Plus => Some((Self::Term, BinaryOp::Add)),
            TokenKind::Minus => Some((Self::Term, BinaryOp::Sub)),
            TokenKind::Star => Some((Self::Factor, BinaryOp::Mul)),
            TokenKind::Slash => Some((Self::Factor, BinaryOp::Div)),
            TokenKind::SlashSlash => Some((Self::Factor, BinaryOp::FloorDiv)),
            TokenKind::Percent => Some((Self::Factor, BinaryOp::Mod)),
            _ => None,
        }
    }
}

// =============================================================================
// PARSER
// =============================================================================

/// Recursive-descent parser with a nesting budget.
pub struct Parser<'a> {
    /// Source text, for error fragments.
    source: &'a str,
    /// Token stream ending with `Eof`.
    tokens: Vec<Token>,
    /// Index of the current token.
    pos: usize,
    /// Current nesting depth.
    depth: usize,
    /// Maximum nesting depth.
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Tokenizes `source` and prepares a parser limited to `max_depth`
    /// levels of nesting.
    pub fn new(source: &'a str, max_depth: usize) -> Result<Self, ExprError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
            max_depth,
        })
    }

    /// Parses a complete expression; trailing tokens are an error.
    pub fn parse(mut self) -> Result<Expr, ExprError> {
        if self.check(TokenKind::Eof) {
            return Err(self.error_here("empty expression"));
        }
        let expr = self.parse_expression()?;
        if !self.check(TokenKind::Eof) {
            let found = self.current().kind;
            return Err(self.error_here(format!("unexpected {found}")));
        }
        Ok(expr)
    }

    // -------------------------------------------------------------------------
    // Grammar
    // -------------------------------------------------------------------------

    fn parse_expression(&mut self) -> Result<Expr, ExprError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ExprError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        let result = maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.parse_binary(Precedence::None)
        });
        self.depth -= 1;
        result
    }

    fn parse_binary(&mut self, min: Precedence) -> Result<Expr, ExprError> {
        let mut left = self.parse_unary()?;

        while let Some((prec, op)) = Precedence::of_binary(self.current().kind) {
            if prec <= min {
                break;
            }
            self.advance();
            let right = self.parse_binary(prec)?;
            let span = left.span().to(right.span());
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                span,
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        let op = match self.current().kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            _ => return self.parse_power(),
        };
        let start = self.advance().span;
        let operand = self.nested(Self::parse_unary)?;
        let span = start.to(operand.span());
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
            span,
        })
    }

    fn parse_power(&mut self) -> Result<Expr, ExprError> {
        let base = self.parse_postfix()?;
        if !self.check(TokenKind::StarStar) {
            return Ok(base);
        }
        self.advance();
        let exponent = self.nested(Self::parse_unary)?;
        let span = base.span().to(exponent.span());
        Ok(Expr::Binary {
            op: BinaryOp::Pow,
            left: Box::new(base),
            right: Box::new(exponent),
            span,
        })
    }

    fn parse_postfix(&mut self) -> Result<Expr, ExprError> {
        // `(f)(x)` is not a call: the target must be a bare name.
        let grouped = self.check(TokenKind::LParen);
        let mut expr = self.parse_primary()?;

        loop {
            match self.current().kind {
                TokenKind::LParen => {
                    let Expr::Name { name, span } = expr else {
                        return Err(self.error_here("only named functions can be called"));
                    };
                    if grouped {
                        return Err(self.error_here("only named functions can be called"));
                    }
                    self.advance();
                    let args = self.parse_arguments()?;
                    let close = self.expect(TokenKind::RParen)?;
                    expr = Expr::Call {
                        name,
                        name_span: span,
                        args,
                        span: span.to(close),
                    };
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.parse_expression()?;
                    let close = self.expect(TokenKind::RBracket)?;
                    let span = expr.span().to(close);
                    expr = Expr::Index {
                        target: Box::new(expr),
                        index: Box::new(index),
                        span,
                    };
                }
                _ => return Ok(expr),
            }
        }
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ExprError> {
        let mut args = Vec::new();
        if self.check(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if !self.check(TokenKind::Comma) {
                break;
            }
            self.advance();
            // Trailing comma.
            if self.check(TokenKind::RParen) {
                break;
            }
        }
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Number => {
                self.advance();
                let value = token.text.parse::<f64>().map_err(|_| {
                    ExprError::parse("invalid number literal", self.source, token.span)
                })?;
                Ok(Expr::Number {
                    value,
                    span: token.span,
                })
            }
            TokenKind::Identifier => {
                self.advance();
                Ok(Expr::Name {
                    name: token.text,
                    span: token.span,
                })
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                let close = self.expect(TokenKind::RParen)?;
                // Keep the parentheses in the span so fragments read naturally.
                Ok(with_span(inner, token.span.to(close)))
            }
            other => Err(self.error_here(format!("expected an expression, found {other}"))),
        }
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    /// Runs `parse` one nesting level deeper.
    fn nested(
        &mut self,
        parse: fn(&mut Self) -> Result<Expr, ExprError>,
    ) -> Result<Expr, ExprError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(ExprError::DepthExceeded {
                limit: self.max_depth,
            });
        }
        let result = maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            parse(self)
        });
        self.depth -= 1;
        result
    }

    fn current(&self) -> &Token {
        // The stream always ends with Eof and `advance` never moves past it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Span, ExprError> {
        if self.check(kind) {
            return Ok(self.advance().span);
        }
        let found = self.current().kind;
        Err(self.error_here(format!("expected {kind}, found {found}")))
    }

    fn error_here(&self, message: impl Into<String>) -> ExprError {
        let span = self.current().span;
        // Quote the preceding token at end of input.
        let span = if span.is_empty() && self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            span
        };
        ExprError::parse(message, self.source, span)
    }
}

/// Replaces the outer span of `expr`.
fn with_span(expr: Expr, outer: Span) -> Expr {
    match expr {
        Expr::Number { value, .. } => Expr::Number { value, span: outer },
        Expr::Name { name, .. } => Expr::Name { name, span: outer },
        Expr::Unary { op, operand, .. } => Expr::Unary {
            op,
            operand,
            span: outer,
        },
        Expr::Binary {
            op, left, right, ..
        } => Expr::Binary {
            op,
            left,
            right,
            span: outer,
        },
        Expr::Call {
            name,
            name_span,
            args,
            ..
        } => Expr::Call {
            name,
            name_span,
            args,
            span: outer,
        },
        Expr::Index { target, index, .. } => Expr::Index {
            target,
            index,
            span: outer,
        },
    }
}

// =============================================================================
// TESTS
// =============================================================================

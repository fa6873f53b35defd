//! # Expression AST
//!
//! Syntax tree produced by the parser. Every node carries the span of the
//! source it was parsed from so evaluation errors can quote it.

use crate::span::Span;

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `+a`
    Plus,
    /// `-a`
    Neg,
}

/// Binary operators, with Python semantics for `//`, `%` and `**`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

/// Expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Number { value: f64, span: Span },
    /// Variable or constant reference.
    Name { name: String, span: Span },
    /// Unary operation.
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    /// Binary operation.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    /// Call of a sandbox function.
    Call {
        name: String,
        name_span: Span,
        args: Vec<Expr>,
        span: Span,
    },
    /// Subscript of a pair-valued call (`frexp(x)[0]`).
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
        span: Span,
    },
}

impl Expr {
    /// Source span of this node.
    pub fn span(&self) -> Span {
        match self {
            Self::Number { span, .. }
            | Self::Name { span, .. }
            | Self::Unary { span, .. }
            | Self::Binary { span, .. }
            | Self::Call { span, .. }
            | Self::Index { span, .. } => *span,
        }
    }

    /// Visits this node and all descendants in pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Expr)) {
        visit(self);
        match self {
            Self::Number { .. } | Self::Name { .. } => {}
            Self::Unary { operand, .. } => operand.walk(visit),
            Self::Binary { left, right, .. } => {
                left.walk(visit);
                right.walk(visit);
            }
            Self::Call { args, .. } => {
                for arg in args {
                    arg.walk(visit);
                }
            }
            Self::Index { target, index, .. } => {
                target.walk(visit);
                index.walk(visit);
            }
        }
    }
}

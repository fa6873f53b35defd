//! # Surface Expressions
//!
//! A small, sandboxed scalar language for `z = f(x, y)` height fields.
//!
//! Sources are compiled once: tokenized, parsed with a nesting budget, and
//! checked so that every name resolves to a bound variable, a constant or a
//! whitelisted math function. The compiled [`Expression`] can then be
//! evaluated at any number of sample points without re-parsing.
//!
//! ## Pipeline
//!
//! ```text
//! source → lexer → parser → name check → Expression → eval(x, y) → f64
//! ```
//!
//! ## Example
//!
//! ```rust
//! use meshgen_expr::Expression;
//!
//! let expr = Expression::compile("sin(x) * cos(y)").unwrap();
//! assert_eq!(expr.eval(0.0, 0.0).unwrap(), 0.0);
//!
//! assert!(Expression::compile("__import__(x)").is_err());
//! ```

pub mod ast;
pub mod env;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod span;

pub use error::ExprError;
pub use span::Span;

use ast::Expr;
use config::constants::{MAX_EXPRESSION_DEPTH, MAX_EXPRESSION_LENGTH};
use eval::Evaluator;
use parser::Parser;

/// A parsed and name-checked surface expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    ast: Expr,
}

impl Expression {
    /// Compiles `source` with the default nesting budget.
    pub fn compile(source: &str) -> Result<Self, ExprError> {
        Self::compile_with_depth(source, MAX_EXPRESSION_DEPTH)
    }

    /// Compiles `source`, failing if nesting exceeds `max_depth`.
    pub fn compile_with_depth(source: &str, max_depth: usize) -> Result<Self, ExprError> {
        if source.len() > MAX_EXPRESSION_LENGTH {
            return Err(ExprError::TooLong {
                length: source.len(),
                limit: MAX_EXPRESSION_LENGTH,
            });
        }
        let ast = Parser::new(source, max_depth)?.parse()?;
        env::check(&ast, source)?;
        log::trace!("compiled surface expression `{source}`");
        Ok(Self {
            source: source.to_string(),
            ast,
        })
    }

    /// Evaluates the expression at `(x, y)`.
    pub fn eval(&self, x: f64, y: f64) -> Result<f64, ExprError> {
        Evaluator::new(&self.source, x, y).eval_scalar(&self.ast)
    }

    /// The source text the expression was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed syntax tree.
    pub fn ast(&self) -> &Expr {
        &self.ast
    }
}

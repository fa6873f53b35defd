//! # Evaluator
//!
//! Tree-walking evaluation of a checked expression for one `(x, y)` sample.
//! Every intermediate result must be a finite real number; the first one
//! that is not fails with the source fragment that produced it.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::env::{resolve, Binding, Variable};
use crate::error::ExprError;
use crate::span::Span;
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use stacker::maybe_grow;

/// Runtime value. Only `frexp` and `modf` produce pairs; they must be
/// indexed before being used as numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(f64),
    Pair(f64, f64),
}

/// Evaluation context for a single sample point.
pub struct Evaluator<'a> {
    source: &'a str,
    x: f64,
    y: f64,
}

impl<'a> Evaluator<'a> {
    pub fn new(source: &'a str, x: f64, y: f64) -> Self {
        Self { source, x, y }
    }

    /// Evaluates `expr` to a finite scalar.
    pub fn eval_scalar(&self, expr: &Expr) -> Result<f64, ExprError> {
        let value = maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.eval(expr)
        })?;
        self.number(value, expr.span())
    }

    fn eval(&self, expr: &Expr) -> Result<Value, ExprError> {
        match expr {
            Expr::Number { value, .. } => Ok(Value::Number(*value)),
            Expr::Name { name, span } => match resolve(name) {
                Some(Binding::Variable(Variable::X)) => Ok(Value::Number(self.x)),
                Some(Binding::Variable(Variable::Y)) => Ok(Value::Number(self.y)),
                Some(Binding::Constant(value)) => Ok(Value::Number(value)),
                Some(Binding::Function(_)) | None => Err(ExprError::UnknownName {
                    name: name.clone(),
                    span: *span,
                }),
            },
            Expr::Unary { op, operand, span } => {
                let value = self.eval_number(operand)?;
                let result = match op {
                    UnaryOp::Plus => value,
                    UnaryOp::Neg => -value,
                };
                self.finite(result, *span)
            }
            Expr::Binary {
                op,
                left,
                right,
                span,
            } => {
                let a = self.eval_number(left)?;
                let b = self.eval_number(right)?;
                self.finite(binary(*op, a, b), *span)
            }
            Expr::Call {
                name,
                name_span,
                args,
                span,
            } => {
                let Some(Binding::Function(function)) = resolve(name) else {
                    return Err(ExprError::UnknownName {
                        name: name.clone(),
                        span: *name_span,
                    });
                };
                let values = args
                    .iter()
                    .map(|arg| self.eval_number(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                match function.apply(&values) {
                    Ok(Value::Number(n)) => self.finite(n, *span),
                    Ok(Value::Pair(a, b)) if a.is_finite() && b.is_finite() => {
                        Ok(Value::Pair(a, b))
                    }
                    Ok(Value::Pair(..)) => Err(ExprError::not_real(self.source, *span)),
                    Err(message) => Err(ExprError::type_error(message, self.source, *span)),
                }
            }
            Expr::Index {
                target,
                index,
                span,
            } => {
                let (first, second) = match self.eval(target)? {
                    Value::Pair(a, b) => (a, b),
                    Value::Number(_) => {
                        return Err(ExprError::type_error(
                            "number is not subscriptable",
                            self.source,
                            target.span(),
                        ));
                    }
                };
                let position = self.eval_number(index)?;
                if position.fract() != 0.0 {
                    return Err(ExprError::type_error(
                        "index must be an integer",
                        self.source,
                        index.span(),
                    ));
                }
                // Pairs accept Python-style negative indices.
                match position as i64 {
                    0 | -2 => Ok(Value::Number(first)),
                    1 | -1 => Ok(Value::Number(second)),
                    _ => Err(ExprError::type_error(
                        "index out of range",
                        self.source,
                        *span,
                    )),
                }
            }
        }
    }

    fn eval_number(&self, expr: &Expr) -> Result<f64, ExprError> {
        let value = self.eval(expr)?;
        self.number(value, expr.span())
    }

    fn number(&self, value: Value, span: Span) -> Result<f64, ExprError> {
        match value {
            Value::Number(n) => Ok(n),
            Value::Pair(..) => Err(ExprError::type_error(
                "expected a number, found a pair",
                self.source,
                span,
            )),
        }
    }

    fn finite(&self, value: f64, span: Span) -> Result<Value, ExprError> {
        if value.is_finite() {
            Ok(Value::Number(value))
        } else {
            Err(ExprError::not_real(self.source, span))
        }
    }
}

/// Applies a binary operator with Python float semantics.
fn binary(op: BinaryOp, a: f64, b: f64) -> f64 {
    match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
            if b == 0.0 {
                f64::NAN
            } else {
                a / b
            }
        }
        BinaryOp::FloorDiv => {
            if b == 0.0 {
                f64::NAN
            } else {
                (a / b).floor()
            }
        }
        BinaryOp::Mod => python_mod(a, b),
        BinaryOp::Pow => {
            if a == 0.0 && b < 0.0 {
                f64::NAN
            } else {
                a.powf(b)
            }
        }
    }
}

/// Floored modulo: the result takes the sign of the divisor.
fn python_mod(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        return f64::NAN;
    }
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

// =============================================================================
// TESTS
// =============================================================================

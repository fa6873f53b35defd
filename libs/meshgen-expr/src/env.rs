//! # Sandbox Environment
//!
//! The fixed set of names a surface expression may reference: the bound
//! variables `x` and `y`, the constants `pi` and `e`, and a whitelist of
//! scalar math functions. Nothing else resolves.

use crate::ast::Expr;
use crate::error::ExprError;
use crate::eval::Value;
use std::f64::consts;

// =============================================================================
// BINDINGS
// =============================================================================

/// Bound input variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    X,
    Y,
}

/// What a sandbox name refers to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Binding {
    Variable(Variable),
    Constant(f64),
    Function(Function),
}

/// Resolves `name` against the sandbox.
///
/// ## Example
///
/// ```rust
/// use meshgen_expr::env::{resolve, Binding};
///
/// assert!(matches!(resolve("pi"), Some(Binding::Constant(_))));
/// assert!(resolve("__import__").is_none());
/// ```
pub fn resolve(name: &str) -> Option<Binding> {
    match name {
        "x" => Some(Binding::Variable(Variable::X)),
        "y" => Some(Binding::Variable(Variable::Y)),
        "pi" => Some(Binding::Constant(consts::PI)),
        "e" => Some(Binding::Constant(consts::E)),
        _ => Function::lookup(name).map(Binding::Function),
    }
}

/// Every name the sandbox exposes, in documentation order.
pub fn names() -> impl Iterator<Item = &'static str> {
    ["x", "y", "pi", "e"]
        .into_iter()
        .chain(Function::ALL.iter().map(|f| f.name()))
}

// =============================================================================
// FUNCTIONS
// =============================================================================

/// Whitelisted math function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Log,
    Log10,
    Pow,
    Sqrt,
    Hypot,
    Abs,
    Fabs,
    Floor,
    Ceil,
    Fmod,
    Frexp,
    Ldexp,
    Modf,
    Degrees,
    Radians,
}

impl Function {
    /// All functions, in documentation order.
    pub const ALL: [Function; 26] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Atan2,
        Self::Sinh,
        Self::Cosh,
        Self::Tanh,
        Self::Exp,
        Self::Log,
        Self::Log10,
        Self::Pow,
        Self::Sqrt,
        Self::Hypot,
        Self::Abs,
        Self::Fabs,
        Self::Floor,
        Self::Ceil,
        Self::Fmod,
        Self::Frexp,
        Self::Ldexp,
        Self::Modf,
        Self::Degrees,
        Self::Radians,
    ];

    /// Looks up a function by its source name.
    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Source name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Atan2 => "atan2",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Log10 => "log10",
            Self::Pow => "pow",
            Self::Sqrt => "sqrt",
            Self::Hypot => "hypot",
            Self::Abs => "abs",
            Self::Fabs => "fabs",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Fmod => "fmod",
            Self::Frexp => "frexp",
            Self::Ldexp => "ldexp",
            Self::Modf => "modf",
            Self::Degrees => "degrees",
            Self::Radians => "radians",
        }
    }

    /// Accepted argument counts as `(min, max)`.
    pub fn arity(self) -> (usize, usize) {
        match self {
            Self::Log => (1, 2),
            Self::Atan2 | Self::Pow | Self::Hypot | Self::Fmod | Self::Ldexp => (2, 2),
            _ => (1, 1),
        }
    }

    /// Applies the function. Non-finite results are left for the evaluator
    /// to report; only shape errors are returned here.
    pub fn apply(self, args: &[f64]) -> Result<Value, &'static str> {
        let a = args.first().copied().unwrap_or(f64::NAN);
        let b = args.get(1).copied();
        let b_or_nan = b.unwrap_or(f64::NAN);

        let value = match self {
            Self::Sin => a.sin(),
            Self::Cos => a.cos(),
            Self::Tan => a.tan(),
            Self::Asin => a.asin(),
            Self::Acos => a.acos(),
            Self::Atan => a.atan(),
            Self::Atan2 => a.atan2(b_or_nan),
            Self::Sinh => a.sinh(),
            Self::Cosh => a.cosh(),
            Self::Tanh => a.tanh(),
            Self::Exp => a.exp(),
            Self::Log => match b {
                Some(base) => a.ln() / base.ln(),
                None => a.ln(),
            },
            Self::Log10 => a.log10(),
            Self::Pow => a.powf(b_or_nan),
            Self::Sqrt => a.sqrt(),
            Self::Hypot => a.hypot(b_or_nan),
            Self::Abs | Self::Fabs => a.abs(),
            Self::Floor => a.floor(),
            Self::Ceil => a.ceil(),
            Self::Fmod => a % b_or_nan,
            Self::Frexp => {
                let (mantissa, exponent) = frexp(a);
                return Ok(Value::Pair(mantissa, f64::from(exponent)));
            }
            Self::Ldexp => {
                if b_or_nan.fract() != 0.0 {
                    return Err("ldexp exponent must be an integer");
                }
                // Saturate; anything past ±2100 over/underflows regardless.
                ldexp(a, b_or_nan.clamp(-2100.0, 2100.0) as i32)
            }
            Self::Modf => return Ok(Value::Pair(a.fract(), a.trunc())),
            Self::Degrees => a.to_degrees(),
            Self::Radians => a.to_radians(),
        };
        Ok(Value::Number(value))
    }
}

/// Splits `x` into `(m, e)` with `x == m * 2^e` and `0.5 <= |m| < 1`.
/// Zero and non-finite inputs return `(x, 0)`.
pub fn frexp(x: f64) -> (f64, i32) {
    if x == 0.0 || !x.is_finite() {
        return (x, 0);
    }
    let mut exponent = x.abs().log2().floor() as i32 + 1;
    let mut mantissa = ldexp(x, -exponent);
    // log2 can be off by one ulp near powers of two.
    if mantissa.abs() >= 1.0 {
        mantissa /= 2.0;
        exponent += 1;
    } else if mantissa.abs() < 0.5 {
        mantissa *= 2.0;
        exponent -= 1;
    }
    (mantissa, exponent)
}

/// Computes `m * 2^e` in steps so subnormal intermediates do not flush.
pub fn ldexp(mantissa: f64, exponent: i32) -> f64 {
    let mut value = mantissa;
    let mut remaining = exponent;
    while remaining != 0 {
        let step = remaining.clamp(-1000, 1000);
        value *= 2f64.powi(step);
        remaining -= step;
    }
    value
}

// =============================================================================
// NAME CHECK
// =============================================================================

/// Rejects any reference outside the sandbox, and any misuse of a sandbox
/// name, before evaluation starts.
pub fn check(expr: &Expr, source: &str) -> Result<(), ExprError> {
    let mut result = Ok(());
    expr.walk(&mut |node| {
        if result.is_err() {
            return;
        }
        result = check_node(node, source);
    });
    result
}

fn check_node(node: &Expr, source: &str) -> Result<(), ExprError> {
    match node {
        Expr::Name { name, span } => match resolve(name) {
            None => Err(ExprError::UnknownName {
                name: name.clone(),
                span: *span,
            }),
            Some(Binding::Function(_)) => Err(ExprError::type_error(
                format!("function `{name}` used as a value"),
                source,
                *span,
            )),
            Some(_) => Ok(()),
        },
        Expr::Call {
            name,
            name_span,
            args,
            span,
        } => match resolve(name) {
            None => Err(ExprError::UnknownName {
                name: name.clone(),
                span: *name_span,
            }),
            Some(Binding::Function(function)) => {
                let (min, max) = function.arity();
                if args.len() < min || args.len() > max {
                    let expected = if min == max {
                        min.to_string()
                    } else {
                        format!("{min} to {max}")
                    };
                    return Err(ExprError::Arity {
                        name: name.clone(),
                        expected,
                        found: args.len(),
                    });
                }
                Ok(())
            }
            Some(_) => Err(ExprError::type_error(
                format!("`{name}` is not callable"),
                source,
                *span,
            )),
        },
        _ => Ok(()),
    }
}

// =============================================================================
// TESTS
// =============================================================================

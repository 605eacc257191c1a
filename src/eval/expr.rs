use thiserror::Error;

use crate::eval::CanonicalEquation;
use crate::eval::lexer;
use crate::eval::parser;

/// Localized, per-point evaluation failure.
///
/// Callers building a sample sequence mask any `EvalError` to NaN and drop
/// the point; the failure never aborts a pass and never crosses the engine
/// boundary on its own.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("invalid character `{0}`")]
    InvalidChar(char),

    #[error("invalid number literal `{0}`")]
    InvalidNumber(String),

    #[error("unknown identifier `{0}`")]
    UnknownIdent(String),

    #[error("mismatched parentheses")]
    ParenMismatch,

    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("expression is nested too deeply")]
    TooDeep,

    #[error("division by zero")]
    DivisionByZero,

    #[error("`{function}` called outside its domain")]
    OutOfDomain { function: &'static str },

    #[error("result is not finite")]
    NonFinite,
}

/// Built-in function set of the canonical grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Sin,
    Cos,
    Tan,
    /// Natural logarithm.
    Log,
    Sqrt,
    Exp,
    Asin,
    Acos,
    Atan,
}

impl Builtin {
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "log" => Some(Self::Log),
            "sqrt" => Some(Self::Sqrt),
            "exp" => Some(Self::Exp),
            "asin" => Some(Self::Asin),
            "acos" => Some(Self::Acos),
            "atan" => Some(Self::Atan),
            _ => None,
        }
    }

    fn apply(self, value: f64) -> Result<f64, EvalError> {
        match self {
            Self::Sin => Ok(value.sin()),
            Self::Cos => Ok(value.cos()),
            Self::Tan => Ok(value.tan()),
            Self::Log => {
                if value <= 0.0 {
                    Err(EvalError::OutOfDomain { function: "log" })
                } else {
                    Ok(value.ln())
                }
            }
            Self::Sqrt => {
                if value < 0.0 {
                    Err(EvalError::OutOfDomain { function: "sqrt" })
                } else {
                    Ok(value.sqrt())
                }
            }
            Self::Exp => Ok(value.exp()),
            Self::Asin => {
                if !(-1.0..=1.0).contains(&value) {
                    Err(EvalError::OutOfDomain { function: "asin" })
                } else {
                    Ok(value.asin())
                }
            }
            Self::Acos => {
                if !(-1.0..=1.0).contains(&value) {
                    Err(EvalError::OutOfDomain { function: "acos" })
                } else {
                    Ok(value.acos())
                }
            }
            Self::Atan => Ok(value.atan()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Node of the parsed expression tree. The free variable is a node of its
/// own, so evaluation binds it symbolically instead of rewriting text.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Number(f64),
    Variable,
    Neg(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call(Builtin, Box<Expr>),
}

impl Expr {
    fn eval(&self, x: f64) -> Result<f64, EvalError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Variable => Ok(x),
            Self::Neg(inner) => Ok(-inner.eval(x)?),
            Self::Call(builtin, argument) => builtin.apply(argument.eval(x)?),
            Self::Binary(op, lhs, rhs) => {
                let lhs = lhs.eval(x)?;
                let rhs = rhs.eval(x)?;
                match op {
                    BinaryOp::Add => Ok(lhs + rhs),
                    BinaryOp::Sub => Ok(lhs - rhs),
                    BinaryOp::Mul => Ok(lhs * rhs),
                    BinaryOp::Div => {
                        if rhs == 0.0 {
                            Err(EvalError::DivisionByZero)
                        } else {
                            Ok(lhs / rhs)
                        }
                    }
                    // NaN results (e.g. a negative base with a fractional
                    // exponent) are caught by the final finite check
                    BinaryOp::Pow => Ok(lhs.powf(rhs)),
                }
            }
        }
    }
}

/// Immutable parsed expression with one free variable.
///
/// Read-only after construction and owning no external resources, so it is
/// safe to evaluate repeatedly and from multiple threads at once.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundExpression {
    source: CanonicalEquation,
    root: Expr,
}

impl BoundExpression {
    pub fn parse(source: &CanonicalEquation) -> Result<Self, EvalError> {
        let tokens = lexer::tokenize(source.as_str())?;
        if tokens.is_empty() {
            return Err(EvalError::UnexpectedEnd);
        }
        let root = parser::parse_tokens(tokens)?;
        Ok(Self {
            source: source.clone(),
            root,
        })
    }

    /// Evaluates at `x`. Deterministic for a given `(expression, x)` pair;
    /// a non-finite outcome is reported as [`EvalError::NonFinite`].
    pub fn eval_at(&self, x: f64) -> Result<f64, EvalError> {
        let value = self.root.eval(x)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite)
        }
    }

    #[must_use]
    pub fn source(&self) -> &CanonicalEquation {
        &self.source
    }
}

/// Parses and evaluates in one call. Prefer [`BoundExpression::parse`] once
/// plus repeated [`BoundExpression::eval_at`] when sampling a whole domain.
pub fn evaluate(source: &CanonicalEquation, x: f64) -> Result<f64, EvalError> {
    BoundExpression::parse(source)?.eval_at(x)
}

/// Single-point validity check before committing to a full sampling pass.
///
/// Evaluates once at `x = 0` and reports whether the result is finite.
/// False positives are acceptable: an expression valid at 0 but undefined
/// elsewhere is still filtered per-point by the sampler.
#[must_use]
pub fn probe(expr: &BoundExpression) -> bool {
    expr.eval_at(0.0).is_ok()
}

//! Expression pipeline: normalization, parsing, evaluation.
//!
//! Raw user text flows through [`normalize`] into a [`CanonicalEquation`],
//! which [`BoundExpression::parse`] turns into an immutable tree with the
//! free variable bound symbolically. Evaluation is total: any failure is a
//! typed [`EvalError`], never a panic, because a single curve pass calls
//! [`BoundExpression::eval_at`] thousands of times.

mod expr;
mod lexer;
mod normalize;
mod parser;

pub use expr::{BoundExpression, Builtin, EvalError, evaluate, probe};
pub use normalize::{CanonicalEquation, normalize};

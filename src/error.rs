use thiserror::Error;

pub type PlotResult<T> = Result<T, PlotError>;

/// Failure kinds surfaced at the engine boundary.
///
/// Per-point evaluation faults never appear here; they are masked inside
/// the sampling pass (see [`crate::eval::EvalError`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlotError {
    #[error("malformed equation: {0}")]
    MalformedEquation(String),

    #[error("invalid expression `{0}`: no finite value at the probe point")]
    InvalidExpression(String),

    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("real-time stream for `{label}` failed: {reason}")]
    StreamFailed { label: String, reason: String },

    #[error("no function registered under label `{0}`")]
    UnknownLabel(String),
}

use thiserror::Error;

/// Errors raised by the sampling and selection operations.
///
/// Every error is raised before any engine state is consumed, except
/// `InvariantViolation`, which can only be detected after the draw.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RandomError {
    #[error("empty input")]
    EmptyInput,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, RandomError>;

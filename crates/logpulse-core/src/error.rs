//! Generator error types

use thiserror::Error;

/// Why a requested rate was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RateViolation {
    #[error("rate must be greater than zero")]
    NotPositive,

    #[error("maximum allowed rate is {max} logs per second")]
    AboveMaximum { max: u32 },
}

/// Errors returned by the generator control plane
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("invalid rate {rate}: {reason}")]
    InvalidRate { rate: i64, reason: RateViolation },

    #[error("no Tokio runtime available to spawn emission workers")]
    NoRuntime,
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only two failure kinds exist in the core: a caller passed a bad argument, or
/// data handed to the core is already corrupt. Filtering and aggregation paths
/// are total and never produce either.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A caller-supplied value was rejected (negative amount, unknown sort key, ...).
    ///
    /// Callers are expected to fall back to a safe default rather than propagate.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Upstream data broke a domain invariant (e.g. a negative stock quantity).
    ///
    /// Must be surfaced to an operator; the core never repairs it.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}

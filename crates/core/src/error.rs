//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Raised when a value object or entity cannot be constructed (missing text,
/// out-of-range amounts, malformed identifiers). Operational outcomes of the
/// ledger (insufficient funds, unknown accounts) live in the ledger crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. non-positive amount, blank description).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. blank or containing whitespace).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Deterministic business failure raised by marketplace aggregates.
///
/// Storage and collaborator failures have their own error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// Blank or unparsable identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The named kind of resource does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Duplicate vendor/agent pair, or a decision that was already taken.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The caller is neither the vendor nor the agent the resource belongs to.
    #[error("caller is not a party to this {0}")]
    NotParty(&'static str),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Stable machine-readable code, used as the `error` field of API bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::InvariantViolation(_) => "invariant_violation",
            Self::InvalidId(_) => "invalid_id",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::NotParty(_) => "forbidden",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_resource() {
        assert_eq!(DomainError::NotFound("connection").to_string(), "connection not found");
        assert_eq!(
            DomainError::NotParty("connection").to_string(),
            "caller is not a party to this connection"
        );
        assert_eq!(DomainError::conflict("dup").code(), "conflict");
    }
}

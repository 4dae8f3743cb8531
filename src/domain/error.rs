//! Domain errors

use thiserror::Error;

/// Rejections raised by the pure scoring and calendar functions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl DomainError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        DomainError::InvalidArgument(msg.into())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

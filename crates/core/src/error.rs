//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Only genuine failures live here (bad configuration, unparsable input the
/// caller explicitly asked to be strict about). "Nothing to predict" is not an
/// error and is modelled as `Option::None` by the engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. an inconsistent calibration).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A calendar date could not be parsed.
    #[error("invalid date: {0}")]
    InvalidDate(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn invalid_date(msg: impl Into<String>) -> Self {
        Self::InvalidDate(msg.into())
    }
}

//! Domain-level errors.
//!
//! Business rule violations raised by the user model. They are independent
//! of infrastructure concerns (database, wire format).

use thiserror::Error;

/// Rules a user record must satisfy before it is stored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Email is not a syntactically valid address
    #[error("Invalid email format: {0:?}")]
    InvalidEmail(String),

    /// Email does not fit the natural key column
    #[error("Email exceeds {max} characters")]
    EmailTooLong { max: usize },
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

use thiserror::Error;

/// Error for SubjectId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubjectIdError {
    #[error("Subject identifier must not be empty")]
    Empty,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for PhoneNumber validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PhoneNumberError {
    #[error("Phone number must not be empty")]
    Empty,

    #[error("Phone number is in wrong format: {0}")]
    InvalidFormat(String),
}

/// Error for Role conversion failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Given role is not supported: {0}")]
    Unsupported(i64),
}

/// Any violation of the identity record rule set.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid subject identifier: {0}")]
    SubjectId(#[from] SubjectIdError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid phone number: {0}")]
    PhoneNumber(#[from] PhoneNumberError),

    #[error("Invalid role: {0}")]
    Role(#[from] RoleError),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Rule set violations (automatically converted via #[from])
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("User already exists: {0}")]
    AlreadyExists(String),

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Storage(String),
}


use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token is invalid: {0}")]
    InvalidToken(String),

    #[error("Missing required claim: {0}")]
    MissingClaim(String),

    #[error("Token header has no key id")]
    MissingKeyId,

    #[error("No verification key with id {0}")]
    UnknownKeyId(String),

    #[error("Failed to parse key {0}: {1}")]
    KeyParse(String, String),
}

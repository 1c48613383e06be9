use thiserror::Error;

/// Errors raised while establishing or renewing a session.
///
/// Detail is for logs only; clients never see it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Token rejected: {0}")]
    InvalidToken(String),

    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    #[error("Code exchange failed: {0}")]
    ExchangeFailed(String),
}

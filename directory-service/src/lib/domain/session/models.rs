use crate::domain::session::errors::SessionError;
use crate::domain::user::models::SubjectId;

/// Client-held credentials as presented on a request.
///
/// Empty values are treated the same as absent ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTokens {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

impl SessionTokens {
    pub fn new(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.filter(|token| !token.is_empty()),
            refresh_token: refresh_token.filter(|token| !token.is_empty()),
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }
}

/// Tokens issued by the identity provider on login or refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Result of a successful verification, scoped to a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub subject: SubjectId,
    /// Set when the session had to be renewed for this request.
    pub refreshed_tokens: Option<IssuedTokens>,
}

/// Terminal state of the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Caller is verified; proceed to the handler.
    Authorized(VerifiedIdentity),
    /// No usable credentials; send the client to the login endpoint.
    Redirect,
    /// Credentials were presented but could not be made valid.
    Denied(SessionError),
}

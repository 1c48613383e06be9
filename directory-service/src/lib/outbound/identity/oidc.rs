use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::IssuedTokens;
use crate::domain::session::ports::IdentityProvider;
use crate::domain::user::models::SubjectId;

/// IdentityProvider backed by an OpenID Connect provider.
pub struct OidcIdentityProvider {
    authenticator: Arc<Authenticator>,
}

impl OidcIdentityProvider {
    /// Create a new identity provider adapter.
    ///
    /// # Arguments
    /// * `authenticator` - Discovered OIDC client
    ///
    /// # Returns
    /// Configured adapter instance
    pub fn new(authenticator: Arc<Authenticator>) -> Self {
        Self { authenticator }
    }
}

#[async_trait]
impl IdentityProvider for OidcIdentityProvider {
    fn authorization_url(&self, state: &str) -> String {
        self.authenticator.authorization_url(state)
    }

    async fn exchange_code(&self, code: &str) -> Result<IssuedTokens, SessionError> {
        let tokens = self
            .authenticator
            .exchange_code(code)
            .await
            .map_err(|e| SessionError::ExchangeFailed(e.to_string()))?;

        Ok(IssuedTokens {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    async fn verify(&self, token: &str) -> Result<SubjectId, SessionError> {
        let claims = self
            .authenticator
            .verify(token)
            .await
            .map_err(|e| SessionError::InvalidToken(e.to_string()))?;

        let subject = claims
            .subject()
            .ok_or_else(|| SessionError::InvalidToken("missing sub claim".to_string()))?;

        SubjectId::new(subject).map_err(|e| SessionError::InvalidToken(e.to_string()))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<IssuedTokens, SessionError> {
        let tokens = self
            .authenticator
            .refresh(refresh_token)
            .await
            .map_err(|e| SessionError::RefreshFailed(e.to_string()))?;

        Ok(IssuedTokens {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }
}

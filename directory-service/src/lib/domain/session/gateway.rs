use std::sync::Arc;

use crate::domain::session::models::SessionOutcome;
use crate::domain::session::models::SessionTokens;
use crate::domain::session::models::VerifiedIdentity;
use crate::domain::session::ports::IdentityProvider;

/// Establishes the caller's identity for a single request.
///
/// Stateless across requests: everything it knows comes from the tokens it
/// is handed, and the verified identity it produces belongs to the caller.
/// At most one refresh is attempted per request.
pub struct SessionGateway<IP>
where
    IP: IdentityProvider + ?Sized,
{
    identity_provider: Arc<IP>,
}

impl<IP> SessionGateway<IP>
where
    IP: IdentityProvider + ?Sized,
{
    pub fn new(identity_provider: Arc<IP>) -> Self {
        Self { identity_provider }
    }

    /// Run the session state machine over the presented tokens.
    ///
    /// # Arguments
    /// * `tokens` - Access and refresh tokens read from the request
    ///
    /// # Returns
    /// * `Authorized` - Access token (original or refreshed) verified
    /// * `Redirect` - No access token could be tried and no refresh token exists
    /// * `Denied` - Refresh or verification of the refreshed token failed
    pub async fn resolve(&self, tokens: &SessionTokens) -> SessionOutcome {
        if let Some(access_token) = tokens.access_token() {
            match self.identity_provider.verify(access_token).await {
                Ok(subject) => {
                    tracing::debug!(subject = %subject, "Access token verified");
                    return SessionOutcome::Authorized(VerifiedIdentity {
                        subject,
                        refreshed_tokens: None,
                    });
                }
                Err(e) => tracing::debug!(error = %e, "Access token rejected"),
            }
        }

        let Some(refresh_token) = tokens.refresh_token() else {
            tracing::debug!("No usable session tokens, redirecting to login");
            return SessionOutcome::Redirect;
        };

        let refreshed = match self.identity_provider.refresh(refresh_token).await {
            Ok(refreshed) => refreshed,
            Err(e) => {
                tracing::warn!(error = %e, "Session refresh denied");
                return SessionOutcome::Denied(e);
            }
        };

        match self.identity_provider.verify(&refreshed.access_token).await {
            Ok(subject) => {
                tracing::debug!(
                    subject = %subject,
                    rotated = refreshed.refresh_token.is_some(),
                    "Session refreshed"
                );
                SessionOutcome::Authorized(VerifiedIdentity {
                    subject,
                    refreshed_tokens: Some(refreshed),
                })
            }
            Err(e) => {
                tracing::warn!(error = %e, "Refreshed access token rejected");
                SessionOutcome::Denied(e)
            }
        }
    }
}

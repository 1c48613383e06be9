use async_trait::async_trait;

use crate::domain::session::errors::SessionError;
use crate::domain::session::models::IssuedTokens;
use crate::domain::user::models::SubjectId;

/// Port for the OpenID Connect identity provider.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Build the provider URL the client is redirected to for login.
    ///
    /// # Arguments
    /// * `state` - Login state token echoed back on the callback
    ///
    /// # Returns
    /// Absolute authorization URL
    fn authorization_url(&self, state: &str) -> String;

    /// Exchange an authorization code for a token pair.
    ///
    /// # Arguments
    /// * `code` - Code received on the callback
    ///
    /// # Returns
    /// Access token and, when issued, a refresh token
    ///
    /// # Errors
    /// * `ExchangeFailed` - Provider rejected the code or was unreachable
    async fn exchange_code(&self, code: &str) -> Result<IssuedTokens, SessionError>;

    /// Verify a bearer access token.
    ///
    /// # Arguments
    /// * `token` - Raw access token
    ///
    /// # Returns
    /// Subject identifier carried by the token
    ///
    /// # Errors
    /// * `InvalidToken` - Signature, issuer, audience or expiry check failed
    async fn verify(&self, token: &str) -> Result<SubjectId, SessionError>;

    /// Obtain a new access token from a refresh token.
    ///
    /// # Arguments
    /// * `refresh_token` - Raw refresh token
    ///
    /// # Returns
    /// New access token (not yet verified) and the replacement refresh token
    /// when the provider rotates them
    ///
    /// # Errors
    /// * `RefreshFailed` - Provider rejected the refresh token or was unreachable
    async fn refresh(&self, refresh_token: &str) -> Result<IssuedTokens, SessionError>;
}

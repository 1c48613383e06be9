use openidconnect::core::CoreAuthenticationFlow;
use openidconnect::core::CoreClient;
use openidconnect::core::CoreProviderMetadata;
use openidconnect::AuthorizationCode;
use openidconnect::ClientId;
use openidconnect::ClientSecret;
use openidconnect::CsrfToken;
use openidconnect::IssuerUrl;
use openidconnect::Nonce;
use openidconnect::OAuth2TokenResponse;
use openidconnect::RedirectUrl;
use openidconnect::RefreshToken;
use openidconnect::Scope;

use crate::config::OidcConfig;
use crate::jwks::JwksFetcher;
use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::TokenVerifier;

/// OpenID Connect coordinator.
///
/// Combines provider metadata, the OAuth2 client credentials and the
/// bearer-token verifier behind the four operations a relying party needs:
/// building the authorization URL, exchanging a code, refreshing an access
/// token and verifying a bearer token.
pub struct Authenticator {
    provider_metadata: CoreProviderMetadata,
    client_id: ClientId,
    client_secret: ClientSecret,
    redirect_url: RedirectUrl,
    scopes: Vec<Scope>,
    http_client: reqwest::Client,
    verifier: TokenVerifier,
    jwks: JwksFetcher,
}

/// Tokens obtained from a code exchange or a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("OIDC configuration error: {0}")]
    Configuration(String),

    #[error("OIDC discovery error: {0}")]
    Discovery(String),

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Token refresh failed: {0}")]
    TokenRefresh(String),

    #[error("Token rejected: {0}")]
    Token(#[from] JwtError),

    #[error("Provider unreachable: {0}")]
    Transport(String),
}

impl Authenticator {
    /// Discover the provider and load its signing keys.
    ///
    /// # Arguments
    /// * `config` - Provider and client settings
    ///
    /// # Returns
    /// Authenticator ready to serve requests
    ///
    /// # Errors
    /// * `Configuration` - Invalid URL or HTTP client settings
    /// * `Discovery` - Provider metadata could not be fetched
    /// * `Transport` - Key set could not be fetched
    pub async fn discover(config: &OidcConfig) -> Result<Self, AuthenticationError> {
        let http_client = build_http_client(config)?;

        let issuer_url = IssuerUrl::new(config.issuer_url.clone())
            .map_err(|e| AuthenticationError::Configuration(format!("invalid issuer URL: {}", e)))?;
        let redirect_url = RedirectUrl::new(config.redirect_url.clone()).map_err(|e| {
            AuthenticationError::Configuration(format!("invalid redirect URL: {}", e))
        })?;

        let provider_metadata = CoreProviderMetadata::discover_async(issuer_url, &http_client)
            .await
            .map_err(|e| AuthenticationError::Discovery(e.to_string()))?;

        let jwks = JwksFetcher::new(
            provider_metadata.jwks_uri().url().as_str(),
            http_client.clone(),
        );
        let key_set = jwks.fetch().await?;
        let verifier = TokenVerifier::from_jwks(config.issuer_url.clone(), &key_set)
            .with_audience(config.audience.clone())
            .with_leeway(config.clock_skew_secs);

        tracing::info!(
            issuer = %config.issuer_url,
            jwks_url = %jwks.jwks_url(),
            keys = key_set.keys.len(),
            "OIDC provider discovered"
        );

        Ok(Self {
            provider_metadata,
            client_id: ClientId::new(config.client_id.clone()),
            client_secret: ClientSecret::new(config.client_secret.clone()),
            redirect_url,
            scopes: config.scopes.iter().cloned().map(Scope::new).collect(),
            http_client,
            verifier,
            jwks,
        })
    }

    /// Build the URL that starts a login at the provider.
    ///
    /// # Arguments
    /// * `state` - Value the provider must echo back on the callback
    ///
    /// # Returns
    /// Authorization URL requesting the `openid` scope plus configured scopes
    pub fn authorization_url(&self, state: &str) -> String {
        let client = CoreClient::from_provider_metadata(
            self.provider_metadata.clone(),
            self.client_id.clone(),
            Some(self.client_secret.clone()),
        )
        .set_redirect_uri(self.redirect_url.clone());

        let state = state.to_string();
        let mut request = client.authorize_url(
            CoreAuthenticationFlow::AuthorizationCode,
            move || CsrfToken::new(state),
            Nonce::new_random,
        );
        for scope in &self.scopes {
            request = request.add_scope(scope.clone());
        }

        let (url, _, _) = request.url();
        url.to_string()
    }

    /// Exchange an authorization code for a token pair.
    ///
    /// # Arguments
    /// * `code` - Code received on the callback
    ///
    /// # Returns
    /// Access token and, when the provider issued one, refresh token
    ///
    /// # Errors
    /// * `Configuration` - Provider publishes no token endpoint
    /// * `TokenExchange` - Provider rejected the code or was unreachable
    pub async fn exchange_code(&self, code: &str) -> Result<TokenPair, AuthenticationError> {
        let client = CoreClient::from_provider_metadata(
            self.provider_metadata.clone(),
            self.client_id.clone(),
            Some(self.client_secret.clone()),
        )
        .set_redirect_uri(self.redirect_url.clone());

        let token_response = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .map_err(|e| AuthenticationError::Configuration(e.to_string()))?
            .request_async(&self.http_client)
            .await
            .map_err(|e| AuthenticationError::TokenExchange(e.to_string()))?;

        Ok(TokenPair {
            access_token: token_response.access_token().secret().clone(),
            refresh_token: token_response.refresh_token().map(|t| t.secret().clone()),
        })
    }

    /// Obtain a new access token with a refresh token.
    ///
    /// # Arguments
    /// * `refresh_token` - Refresh token previously issued by the provider
    ///
    /// # Returns
    /// Fresh access token, plus the replacement refresh token when the
    /// provider rotates them
    ///
    /// # Errors
    /// * `Configuration` - Provider publishes no token endpoint
    /// * `TokenRefresh` - Provider rejected the refresh token or was unreachable
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthenticationError> {
        let client = CoreClient::from_provider_metadata(
            self.provider_metadata.clone(),
            self.client_id.clone(),
            Some(self.client_secret.clone()),
        );

        let refresh_token = RefreshToken::new(refresh_token.to_string());
        let token_response = client
            .exchange_refresh_token(&refresh_token)
            .map_err(|e| AuthenticationError::Configuration(e.to_string()))?
            .request_async(&self.http_client)
            .await
            .map_err(|e| AuthenticationError::TokenRefresh(e.to_string()))?;

        Ok(TokenPair {
            access_token: token_response.access_token().secret().clone(),
            refresh_token: token_response.refresh_token().map(|t| t.secret().clone()),
        })
    }

    /// Verify a bearer token issued by the provider.
    ///
    /// A token signed with a key id we do not know yet triggers one key set
    /// download (rate limited) before giving up.
    ///
    /// # Arguments
    /// * `token` - Compact-serialized JWT
    ///
    /// # Returns
    /// Verified claims
    ///
    /// # Errors
    /// * `Token` - Token failed verification
    /// * `Transport` - Key set download failed
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthenticationError> {
        verify_with_rotation(&self.verifier, &self.jwks, token).await
    }
}

async fn verify_with_rotation(
    verifier: &TokenVerifier,
    jwks: &JwksFetcher,
    token: &str,
) -> Result<Claims, AuthenticationError> {
    match verifier.verify(token) {
        Err(JwtError::UnknownKeyId(kid)) => {
            if let Some(key_set) = jwks.fetch_if_stale().await? {
                let count = verifier.replace_keys(&key_set);
                tracing::info!(kid = %kid, keys = count, "Reloaded JWKS for unknown key id");
            }
            if !verifier.has_key(&kid) {
                return Err(JwtError::UnknownKeyId(kid).into());
            }
            verifier.verify(token).map_err(AuthenticationError::from)
        }
        result => result.map_err(AuthenticationError::from),
    }
}

fn build_http_client(config: &OidcConfig) -> Result<reqwest::Client, AuthenticationError> {
    // Redirects stay disabled so discovery cannot be bounced to another host.
    let mut builder = reqwest::Client::builder()
        .timeout(config.http_timeout())
        .redirect(reqwest::redirect::Policy::none());

    if config.danger_accept_invalid_certs {
        tracing::warn!(
            issuer = %config.issuer_url,
            "TLS certificate validation towards the OIDC provider is DISABLED"
        );
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder.build().map_err(|e| {
        AuthenticationError::Configuration(format!("failed to create HTTP client: {}", e))
    })
}

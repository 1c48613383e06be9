use std::time::Duration;

use serde::Deserialize;

/// Settings for talking to an OpenID Connect provider.
#[derive(Debug, Deserialize, Clone)]
pub struct OidcConfig {
    pub issuer_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,

    /// Scopes requested in addition to `openid`
    #[serde(default)]
    pub scopes: Vec<String>,

    /// Expected `aud` of bearer tokens; audience is not checked when unset
    #[serde(default)]
    pub audience: Option<String>,

    /// Timeout for every request to the provider
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Tolerated clock skew when checking `exp` and `nbf`
    #[serde(default = "default_clock_skew_secs")]
    pub clock_skew_secs: u64,

    /// Disable TLS certificate validation towards the provider.
    ///
    /// Only meant for development against a provider with a self-signed
    /// certificate. Never enable in production.
    #[serde(default)]
    pub danger_accept_invalid_certs: bool,
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_clock_skew_secs() -> u64 {
    30
}

impl OidcConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: OidcConfig = serde_json::from_str(
            r#"{
                "issuer_url": "https://idp.example.com/realms/isu",
                "client_id": "isu",
                "client_secret": "secret",
                "redirect_url": "http://localhost:8080/"
            }"#,
        )
        .unwrap();

        assert!(config.scopes.is_empty());
        assert!(config.audience.is_none());
        assert_eq!(config.http_timeout(), Duration::from_secs(10));
        assert_eq!(config.clock_skew_secs, 30);
        assert!(!config.danger_accept_invalid_certs);
    }
}

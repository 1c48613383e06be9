use std::env;

use auth::OidcConfig;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub oidc: OidcConfig,
    #[serde(default)]
    pub cookies: CookieConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Attributes of the session and login-state cookies.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CookieConfig {
    /// Set when clients reach the service over TLS (usually terminated upstream).
    #[serde(default)]
    pub secure: bool,
    #[serde(default = "default_cookie_max_age_secs")]
    pub max_age_secs: i64,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: false,
            max_age_secs: default_cookie_max_age_secs(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_cookie_max_age_secs() -> i64 {
    3600
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, OIDC__CLIENT_SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: OIDC__CLIENT_SECRET=... overrides oidc.client_secret
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("oidc.scopes"),
            )
            .build()?;

        configuration.try_deserialize()
    }
}

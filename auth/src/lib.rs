//! OpenID Connect relying-party utilities.
//!
//! Provides the provider-facing half of session authentication:
//! - Provider discovery, authorization URLs, code and refresh-token exchange
//! - Bearer token (JWT) verification against the provider's key set
//! - Login state values for the authorization round trip
//!
//! Services define their own identity-provider port and adapt these
//! implementations to it.
//!
//! # Examples
//!
//! ## Login State
//! ```
//! use auth::StateToken;
//!
//! let state = StateToken::generate();
//! assert!(StateToken::matches(state.as_str(), state.as_str()));
//! ```
//!
//! ## Token Verification
//! ```
//! use auth::{Claims, TokenVerifier};
//!
//! let verifier = TokenVerifier::from_secret("https://idp.example.com", b"secret_key_at_least_32_bytes_long!");
//! assert!(verifier.verify("not.a.token").is_err());
//! let claims = Claims::for_subject("user123", "https://idp.example.com", 300);
//! assert_eq!(claims.subject(), Some("user123"));
//! ```

pub mod authenticator;
pub mod config;
pub mod jwks;
pub mod jwt;
pub mod state;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::TokenPair;
pub use config::OidcConfig;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenVerifier;
pub use state::StateToken;

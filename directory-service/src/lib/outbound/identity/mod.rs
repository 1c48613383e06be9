pub mod oidc;

pub use oidc::OidcIdentityProvider;

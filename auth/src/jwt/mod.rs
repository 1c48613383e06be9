pub mod claims;
pub mod errors;
pub mod verifier;

pub use claims::Audience;
pub use claims::Claims;
pub use errors::JwtError;
pub use verifier::TokenVerifier;

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::RwLock;

use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Key id used for keys published without a `kid` and for shared secrets.
const DEFAULT_KEY_ID: &str = "";

const ASYMMETRIC_ALGORITHMS: &[Algorithm] = &[
    Algorithm::RS256,
    Algorithm::RS384,
    Algorithm::RS512,
    Algorithm::PS256,
    Algorithm::PS384,
    Algorithm::PS512,
    Algorithm::ES256,
    Algorithm::ES384,
    Algorithm::EdDSA,
];

/// Bearer token verifier.
///
/// Holds the provider's verification keys indexed by key id and checks
/// signature, issuer, expiry and (optionally) audience of incoming tokens.
/// Keys can be swapped at runtime when the provider rotates them.
#[derive(Clone)]
pub struct TokenVerifier {
    issuer: String,
    audience: Option<String>,
    leeway_seconds: u64,
    algorithms: Vec<Algorithm>,
    keys: Arc<RwLock<HashMap<String, DecodingKey>>>,
}

impl TokenVerifier {
    /// Create a verifier for tokens signed by keys from a JSON Web Key Set.
    ///
    /// # Arguments
    /// * `issuer` - Expected `iss` claim
    /// * `jwks` - Key set published by the provider
    ///
    /// # Returns
    /// TokenVerifier accepting asymmetric signatures only
    pub fn from_jwks(issuer: impl Into<String>, jwks: &JwkSet) -> Self {
        let verifier = Self {
            issuer: issuer.into(),
            audience: None,
            leeway_seconds: 0,
            algorithms: ASYMMETRIC_ALGORITHMS.to_vec(),
            keys: Arc::new(RwLock::new(HashMap::new())),
        };
        verifier.replace_keys(jwks);
        verifier
    }

    /// Create a verifier for HS256 tokens signed with a shared secret.
    ///
    /// # Arguments
    /// * `issuer` - Expected `iss` claim
    /// * `secret` - Shared signing secret (at least 32 bytes)
    ///
    /// # Returns
    /// TokenVerifier accepting HS256 signatures only
    pub fn from_secret(issuer: impl Into<String>, secret: &[u8]) -> Self {
        let mut keys = HashMap::new();
        keys.insert(DEFAULT_KEY_ID.to_string(), DecodingKey::from_secret(secret));

        Self {
            issuer: issuer.into(),
            audience: None,
            leeway_seconds: 0,
            algorithms: vec![Algorithm::HS256],
            keys: Arc::new(RwLock::new(keys)),
        }
    }

    /// Require the token audience to contain `audience`.
    pub fn with_audience(mut self, audience: Option<String>) -> Self {
        self.audience = audience;
        self
    }

    /// Tolerated clock skew when checking `exp` and `nbf`.
    pub fn with_leeway(mut self, leeway_seconds: u64) -> Self {
        self.leeway_seconds = leeway_seconds;
        self
    }

    /// Replace every known key with the keys of `jwks`.
    ///
    /// Keys that cannot be turned into a decoding key are skipped.
    ///
    /// # Returns
    /// Number of usable keys now held
    pub fn replace_keys(&self, jwks: &JwkSet) -> usize {
        let mut fresh = HashMap::new();
        for jwk in &jwks.keys {
            let kid = jwk.common.key_id.clone().unwrap_or_default();
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    fresh.insert(kid, key);
                }
                Err(e) => tracing::warn!(kid = %kid, error = %e, "Skipping unusable JWK"),
            }
        }

        let count = fresh.len();
        let mut guard = self.keys.write().unwrap_or_else(|e| e.into_inner());
        *guard = fresh;
        count
    }

    /// Check whether a key with this id is known.
    pub fn has_key(&self, kid: &str) -> bool {
        let guard = self.keys.read().unwrap_or_else(|e| e.into_inner());
        guard.contains_key(kid)
    }

    /// Verify a token and return its claims.
    ///
    /// # Arguments
    /// * `token` - Compact-serialized JWT
    ///
    /// # Returns
    /// Verified claims with a non-empty subject
    ///
    /// # Errors
    /// * `DecodingFailed` - Token header is malformed
    /// * `InvalidToken` - Signature, issuer, audience or algorithm check failed
    /// * `TokenExpired` - `exp` is in the past
    /// * `MissingKeyId` / `UnknownKeyId` - No key to check the signature with
    /// * `MissingClaim` - A required claim is absent
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let header =
            decode_header(token).map_err(|e| JwtError::DecodingFailed(e.to_string()))?;

        if !self.algorithms.contains(&header.alg) {
            return Err(JwtError::InvalidToken(format!(
                "algorithm {:?} is not accepted",
                header.alg
            )));
        }

        let kid = header.kid.unwrap_or_default();
        let key = {
            let guard = self.keys.read().unwrap_or_else(|e| e.into_inner());
            guard.get(&kid).cloned()
        };
        let key = match key {
            Some(key) => key,
            None if kid.is_empty() => return Err(JwtError::MissingKeyId),
            None => return Err(JwtError::UnknownKeyId(kid)),
        };

        let mut validation = Validation::new(header.alg);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = self.leeway_seconds;
        match &self.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            ErrorKind::MissingRequiredClaim(claim) => JwtError::MissingClaim(claim.clone()),
            _ => JwtError::InvalidToken(e.to_string()),
        })?;

        let claims = token_data.claims;
        if claims.subject().is_none() {
            return Err(JwtError::MissingClaim("sub".to_string()));
        }

        Ok(claims)
    }
}

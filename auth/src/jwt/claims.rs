use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claims carried by a provider-issued bearer token.
///
/// Supports standard RFC 7519 claims plus custom fields via `extra` map.
/// All standard fields are optional; the verifier decides which are required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (stable identifier of the authenticated principal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Not before (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Audience (providers emit either a single string or a list)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,

    /// JWT ID (unique token identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Additional custom fields (flattened into token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// The `aud` claim in either of its two JSON shapes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    pub fn contains(&self, audience: &str) -> bool {
        match self {
            Audience::Single(value) => value == audience,
            Audience::Multiple(values) => values.iter().any(|v| v == audience),
        }
    }
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for a subject issued now and valid for `ttl_seconds`.
    ///
    /// # Arguments
    /// * `subject` - Subject identifier
    /// * `issuer` - Issuer URL the token claims to come from
    /// * `ttl_seconds` - Seconds until the token expires (negative for an already-expired token)
    ///
    /// # Returns
    /// Claims with sub, iss, exp and iat set
    pub fn for_subject(subject: impl ToString, issuer: impl ToString, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::seconds(ttl_seconds);

        Self {
            sub: Some(subject.to_string()),
            exp: Some(expiration.timestamp()),
            iat: Some(now.timestamp()),
            iss: Some(issuer.to_string()),
            ..Self::default()
        }
    }

    /// Set a single audience.
    pub fn with_audience(mut self, aud: impl ToString) -> Self {
        self.aud = Some(Audience::Single(aud.to_string()));
        self
    }

    /// Subject as a non-empty string slice.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|s| !s.is_empty())
    }
}

impl Default for Claims {
    fn default() -> Self {
        Self {
            sub: None,
            exp: None,
            iat: None,
            nbf: None,
            iss: None,
            aud: None,
            jti: None,
            extra: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("f81d4fae", "https://idp.example.com/realms/isu", 3600);

        assert_eq!(claims.subject(), Some("f81d4fae"));
        assert_eq!(
            claims.iss.as_deref(),
            Some("https://idp.example.com/realms/isu")
        );

        let exp = claims.exp.unwrap();
        let iat = claims.iat.unwrap();
        assert_eq!(exp - iat, 3600);
    }

    #[test]
    fn test_empty_subject_is_absent() {
        let claims = Claims {
            sub: Some(String::new()),
            ..Claims::new()
        };
        assert_eq!(claims.subject(), None);
    }

    #[test]
    fn test_audience_shapes() {
        let single: Claims = serde_json::from_str(r#"{"aud":"account"}"#).unwrap();
        let multiple: Claims = serde_json::from_str(r#"{"aud":["account","isu"]}"#).unwrap();

        assert!(single.aud.unwrap().contains("account"));
        let multiple = multiple.aud.unwrap();
        assert!(multiple.contains("isu"));
        assert!(!multiple.contains("other"));
    }

    #[test]
    fn test_extra_fields_are_flattened() {
        let claims: Claims =
            serde_json::from_str(r#"{"sub":"abc","azp":"isu-client","typ":"Bearer"}"#).unwrap();

        assert_eq!(claims.extra.get("azp").unwrap().as_str(), Some("isu-client"));
        assert_eq!(claims.extra.get("typ").unwrap().as_str(), Some("Bearer"));
    }
}

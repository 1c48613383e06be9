//! JWKS (JSON Web Key Set) fetching.
//!
//! Keys are fetched once at discovery time and re-fetched when a token
//! names a key id we have never seen, at most once per `MIN_REFETCH_INTERVAL`.
//! Failed re-fetches count against the interval too.

use std::time::Duration;
use std::time::Instant;

use jsonwebtoken::jwk::JwkSet;
use tokio::sync::Mutex;

use crate::authenticator::AuthenticationError;

/// Minimum time between two key set downloads triggered by unknown key ids.
pub const MIN_REFETCH_INTERVAL: Duration = Duration::from_secs(300);

pub struct JwksFetcher {
    jwks_url: String,
    client: reqwest::Client,
    last_refetch: Mutex<Option<Instant>>,
}

impl JwksFetcher {
    pub fn new(jwks_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            jwks_url: jwks_url.into(),
            client,
            last_refetch: Mutex::new(None),
        }
    }

    pub fn jwks_url(&self) -> &str {
        &self.jwks_url
    }

    /// Download the key set unconditionally.
    ///
    /// Does not count against the re-fetch interval.
    ///
    /// # Errors
    /// * `Transport` - Endpoint unreachable, non-success status or malformed body
    pub async fn fetch(&self) -> Result<JwkSet, AuthenticationError> {
        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| AuthenticationError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthenticationError::Transport(format!(
                "HTTP {} from JWKS endpoint",
                response.status()
            )));
        }

        let jwks: JwkSet = response
            .json()
            .await
            .map_err(|e| AuthenticationError::Transport(e.to_string()))?;

        tracing::debug!(url = %self.jwks_url, keys = jwks.keys.len(), "Fetched JWKS");

        Ok(jwks)
    }

    /// Download the key set unless a re-fetch was attempted recently.
    ///
    /// Concurrent callers wait for the download in flight and then see it
    /// as recent.
    ///
    /// # Returns
    /// `None` when the previous attempt is younger than `MIN_REFETCH_INTERVAL`
    ///
    /// # Errors
    /// * `Transport` - Download failed; the attempt still counts
    pub async fn fetch_if_stale(&self) -> Result<Option<JwkSet>, AuthenticationError> {
        let mut last_refetch = self.last_refetch.lock().await;
        if let Some(at) = *last_refetch {
            if at.elapsed() < MIN_REFETCH_INTERVAL {
                tracing::debug!(url = %self.jwks_url, "JWKS re-fetch suppressed");
                return Ok(None);
            }
        }

        *last_refetch = Some(Instant::now());
        self.fetch().await.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::testing::jwks_json;
    use crate::testing::JwksServer;

    #[tokio::test]
    async fn test_fetch_if_stale_downloads_once() {
        let server = JwksServer::spawn(Some(jwks_json(&["k1"]))).await;
        let fetcher = JwksFetcher::new(server.url(), reqwest::Client::new());

        let first = fetcher.fetch_if_stale().await.unwrap();
        assert_eq!(first.unwrap().keys.len(), 1);

        assert!(fetcher.fetch_if_stale().await.unwrap().is_none());
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn test_failed_refetch_counts_against_interval() {
        let server = JwksServer::spawn(None).await;
        let fetcher = JwksFetcher::new(server.url(), reqwest::Client::new());

        assert!(matches!(
            fetcher.fetch_if_stale().await,
            Err(AuthenticationError::Transport(_))
        ));
        for _ in 0..4 {
            assert!(fetcher.fetch_if_stale().await.unwrap().is_none());
        }
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_refetches_download_once() {
        let server = JwksServer::spawn(Some(jwks_json(&["k1"]))).await;
        let fetcher = Arc::new(JwksFetcher::new(server.url(), reqwest::Client::new()));

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let fetcher = Arc::clone(&fetcher);
                tokio::spawn(async move { fetcher.fetch_if_stale().await })
            })
            .collect();

        let mut downloads = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().is_some() {
                downloads += 1;
            }
        }

        assert_eq!(downloads, 1);
        assert_eq!(server.hits(), 1);
    }

    #[tokio::test]
    async fn test_initial_fetch_does_not_close_interval() {
        let server = JwksServer::spawn(Some(jwks_json(&["k1"]))).await;
        let fetcher = JwksFetcher::new(server.url(), reqwest::Client::new());

        fetcher.fetch().await.unwrap();
        assert!(fetcher.fetch_if_stale().await.unwrap().is_some());
        assert_eq!(server.hits(), 2);
    }
}

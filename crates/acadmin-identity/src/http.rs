//! HTTP backend abstraction for the identity service.
//!
//! The client talks to the network only through [`HttpBackend`], so tests
//! can swap in canned answers. The production backend is reqwest with
//! automatic retry for transient errors.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use crate::config::{IdentityClientConfig, IdentityConfigError};

pub(crate) type BackendResult<T> = Result<T, BackendError>;

/// Transport-level failures, mapped to `IdentityError` by the client.
#[derive(Debug, Error)]
pub(crate) enum BackendError {
    #[error("identity service answered {status} for {url}")]
    Status { status: u16, url: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("undecodable response body: {0}")]
    Decode(String),
}

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Fetches JSON from an URL on behalf of a bearer token.
#[async_trait]
pub(crate) trait HttpBackend: Send + Sync {
    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        bearer: &str,
    ) -> BackendResult<T>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest with retry logic.
///
/// Server errors (5xx) and network errors are retried with exponential
/// backoff. Any other non-success status fails on the first attempt.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay: Duration,
}

impl ReqwestBackend {
    pub(crate) fn new(config: &IdentityClientConfig) -> Result<Self, IdentityConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
        })
    }

    async fn fetch_with_retry(&self, url: &Url, bearer: &str) -> BackendResult<reqwest::Response> {
        let mut attempt: u8 = 0;
        loop {
            if attempt > 0 {
                let delay = backoff_delay(self.retry_base_delay, attempt);
                tokio::time::sleep(delay).await;
            }
            let can_retry = attempt < self.max_retries;
            attempt += 1;

            match self
                .client
                .get(url.as_str())
                .bearer_auth(bearer)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }
                    if status.is_server_error() && can_retry {
                        tracing::debug!(status = status.as_u16(), attempt, "identity service error, retrying");
                        continue;
                    }
                    return Err(BackendError::Status {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                Err(e) => {
                    if can_retry {
                        tracing::debug!(error = %e, attempt, "identity request failed, retrying");
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }
    }
}

/// Delay before retry number `attempt` (1-based): `base * 2^(attempt - 1)`,
/// saturating instead of overflowing for large attempt counts.
fn backoff_delay(base: Duration, attempt: u8) -> Duration {
    let factor = 2u32.saturating_pow(u32::from(attempt.saturating_sub(1)));
    base.saturating_mul(factor)
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        url: &Url,
        bearer: &str,
    ) -> BackendResult<T> {
        let response = self.fetch_with_retry(url, bearer).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Canned outcome for the fake backend.
    #[derive(Clone)]
    pub(crate) enum Canned {
        Json(serde_json::Value),
        Status(u16),
        Garbage,
    }

    /// A fake HTTP backend that returns one canned outcome and records
    /// the bearer tokens it was called with.
    pub(crate) struct FakeBackend {
        outcome: Canned,
        seen: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        pub(crate) fn new(outcome: Canned) -> Self {
            Self {
                outcome,
                seen: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn seen_tokens(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpBackend for FakeBackend {
        async fn get_json<T: DeserializeOwned + Send>(
            &self,
            url: &Url,
            bearer: &str,
        ) -> BackendResult<T> {
            self.seen.lock().unwrap().push(bearer.to_string());
            match &self.outcome {
                Canned::Json(json) => serde_json::from_value(json.clone())
                    .map_err(|e| BackendError::Decode(e.to_string())),
                Canned::Status(status) => Err(BackendError::Status {
                    status: *status,
                    url: url.to_string(),
                }),
                Canned::Garbage => Err(BackendError::Decode("expected value".to_string())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_backend_creation() {
        let config = IdentityClientConfig::new()
            .with_max_retries(4)
            .with_retry_delay(Duration::from_millis(50));
        let backend = ReqwestBackend::new(&config).unwrap();
        assert_eq!(backend.max_retries, 4);
        assert_eq!(backend.retry_base_delay, Duration::from_millis(50));
    }

    #[test]
    fn test_backoff_doubles_and_saturates() {
        let base = Duration::from_millis(200);
        assert_eq!(backoff_delay(base, 1), base);
        assert_eq!(backoff_delay(base, 2), Duration::from_millis(400));
        assert_eq!(backoff_delay(base, 4), Duration::from_millis(1600));
        assert!(backoff_delay(base, u8::MAX) >= backoff_delay(base, 32));
        assert_eq!(backoff_delay(Duration::MAX, 3), Duration::MAX);
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let config = IdentityClientConfig::new()
            .with_max_retries(1)
            .with_retry_delay(Duration::from_millis(1))
            .with_timeout(Duration::from_millis(500));
        let backend = ReqwestBackend::new(&config).unwrap();
        // Port 9 (discard) on loopback is closed on any sane test machine.
        let url = Url::parse("http://127.0.0.1:9/me").unwrap();

        let result: BackendResult<serde_json::Value> = backend.get_json(&url, "token").await;
        assert!(matches!(result, Err(BackendError::Network(_))));
    }
}

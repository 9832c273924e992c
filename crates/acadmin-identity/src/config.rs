//! Public configuration for the identity service client.

use std::time::Duration;

use thiserror::Error;

/// Errors raised while turning a configuration into a working client.
#[derive(Debug, Error)]
pub enum IdentityConfigError {
    #[error("Invalid identity service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration for the identity service client.
///
/// # Example
///
/// ```
/// use acadmin_identity::IdentityClientConfig;
/// use std::time::Duration;
///
/// let config = IdentityClientConfig::new()
///     .with_base_url("http://identity:8001")
///     .with_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct IdentityClientConfig {
    /// Scheme, host and port of the identity service
    pub(crate) base_url: String,
    /// Path of the "who am I" endpoint
    pub(crate) profile_path: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Maximum number of retry attempts for transient errors
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl Default for IdentityClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            profile_path: "/api/v1/auth/me".to_string(),
            user_agent: concat!("acadmin-identity/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 2,
            retry_base_delay: Duration::from_millis(200),
        }
    }
}

impl IdentityClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identity service base URL.
    ///
    /// Defaults to `http://localhost:8001`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the profile endpoint path.
    ///
    /// Defaults to `/api/v1/auth/me`.
    #[must_use]
    pub fn with_profile_path(mut self, path: impl Into<String>) -> Self {
        self.profile_path = path.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 10 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retry attempts for transient errors.
    ///
    /// Defaults to 2 retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Absolute URL of the profile endpoint.
    ///
    /// Slashes between base and path are normalized so both
    /// `http://host/` + `/me` and `http://host` + `me` work.
    pub fn profile_url(&self) -> Result<url::Url, IdentityConfigError> {
        let base = self.base_url.trim_end_matches('/');
        let path = self.profile_path.trim_start_matches('/');
        Ok(url::Url::parse(&format!("{base}/{path}"))?)
    }
}

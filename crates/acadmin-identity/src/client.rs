//! Identity service client.

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use acadmin_core::domain::CallerProfile;
use acadmin_core::ports::{IdentityError, IdentityProviderPort};

use crate::config::{IdentityClientConfig, IdentityConfigError};
use crate::http::{BackendError, HttpBackend, ReqwestBackend};
use crate::profile::parse_profile;

/// Resolves bearer tokens into caller profiles by asking the identity
/// service who the token belongs to.
///
/// # Example
///
/// ```no_run
/// use acadmin_identity::{HttpIdentityClient, IdentityClientConfig};
///
/// let client = HttpIdentityClient::new(
///     IdentityClientConfig::new().with_base_url("http://identity:8001"),
/// )?;
/// # Ok::<(), acadmin_identity::IdentityConfigError>(())
/// ```
pub struct HttpIdentityClient<B = ReqwestBackend> {
    backend: B,
    profile_url: Url,
}

impl HttpIdentityClient<ReqwestBackend> {
    pub fn new(config: IdentityClientConfig) -> Result<Self, IdentityConfigError> {
        let backend = ReqwestBackend::new(&config)?;
        Self::with_backend(&config, backend)
    }
}

impl<B: HttpBackend> HttpIdentityClient<B> {
    pub(crate) fn with_backend(
        config: &IdentityClientConfig,
        backend: B,
    ) -> Result<Self, IdentityConfigError> {
        Ok(Self {
            backend,
            profile_url: config.profile_url()?,
        })
    }

    pub fn profile_url(&self) -> &Url {
        &self.profile_url
    }
}

fn map_backend_error(err: BackendError) -> IdentityError {
    match err {
        BackendError::Status {
            status: 401 | 403, ..
        } => IdentityError::InvalidToken("token rejected by identity service".to_string()),
        BackendError::Status { status, url } if status >= 500 => {
            IdentityError::Unavailable(format!("{url} answered {status}"))
        }
        BackendError::Status { status, url } => {
            IdentityError::InvalidResponse(format!("unexpected status {status} from {url}"))
        }
        BackendError::Network(e) => IdentityError::Unavailable(e.to_string()),
        BackendError::Decode(msg) => IdentityError::InvalidResponse(msg),
    }
}

#[async_trait]
impl<B: HttpBackend> IdentityProviderPort for HttpIdentityClient<B> {
    async fn fetch_profile(&self, token: &str) -> Result<CallerProfile, IdentityError> {
        let body: Value = self
            .backend
            .get_json(&self.profile_url, token)
            .await
            .map_err(|e| {
                let mapped = map_backend_error(e);
                if !matches!(mapped, IdentityError::InvalidToken(_)) {
                    tracing::warn!(error = %mapped, "identity lookup failed");
                }
                mapped
            })?;
        let profile = parse_profile(body)?;
        tracing::debug!(user_id = %profile.user_id, role = %profile.role, "resolved caller");
        Ok(profile)
    }
}

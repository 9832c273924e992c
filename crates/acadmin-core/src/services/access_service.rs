//! Authorization gate for the back-office API.

use std::sync::Arc;

use crate::domain::CallerProfile;
use crate::ports::{CoreError, IdentityProviderPort, TokenPrecheckPort};

/// Resolves bearer tokens into callers and admits only IT administrators.
///
/// Outcome mapping:
/// - no token, or token rejected → `Unauthorized`
/// - valid caller without the IT administrator role → `Forbidden`
/// - identity service down or answering garbage → `ExternalService`
pub struct AccessService {
    identity: Arc<dyn IdentityProviderPort>,
    precheck: Option<Arc<dyn TokenPrecheckPort>>,
}

impl AccessService {
    pub fn new(identity: Arc<dyn IdentityProviderPort>) -> Self {
        Self {
            identity,
            precheck: None,
        }
    }

    /// Run a local check (e.g. JWT signature/expiry) before the remote lookup.
    #[must_use]
    pub fn with_precheck(mut self, precheck: Arc<dyn TokenPrecheckPort>) -> Self {
        self.precheck = Some(precheck);
        self
    }

    pub async fn authorize(&self, token: Option<&str>) -> Result<CallerProfile, CoreError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CoreError::Unauthorized("missing bearer token".to_string()))?;

        if let Some(precheck) = &self.precheck {
            precheck.precheck(token)?;
        }

        let profile = self.identity.fetch_profile(token).await?;
        if !profile.is_it_administrator() {
            tracing::warn!(
                user_id = %profile.user_id,
                role = %profile.role,
                sub_role = ?profile.sub_role,
                "caller is not an IT administrator"
            );
            return Err(CoreError::Forbidden(
                "administrator role with IT sub-role required".to_string(),
            ));
        }

        tracing::debug!(user_id = %profile.user_id, "caller authorized");
        Ok(profile)
    }
}

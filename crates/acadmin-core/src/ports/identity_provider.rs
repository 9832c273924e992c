//! Identity provider port: resolves a bearer token into a caller profile.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::CallerProfile;

/// Errors surfaced by identity lookups.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The token was rejected (malformed, expired, revoked).
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// The identity service could not be reached or kept failing.
    #[error("Identity service unavailable: {0}")]
    Unavailable(String),

    /// The identity service answered with something we can't decode.
    #[error("Invalid identity service response: {0}")]
    InvalidResponse(String),
}

/// Remote lookup of the profile behind a token.
#[async_trait]
pub trait IdentityProviderPort: Send + Sync {
    async fn fetch_profile(&self, token: &str) -> Result<CallerProfile, IdentityError>;
}

/// Optional local check run before the remote lookup (signature, expiry).
pub trait TokenPrecheckPort: Send + Sync {
    fn precheck(&self, token: &str) -> Result<(), IdentityError>;
}

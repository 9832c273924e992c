//! Local bearer token checks.
//!
//! When the deployment shares an HS256 secret with the identity service,
//! tokens are verified here first so that garbage and expired tokens never
//! cost a network round trip.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use acadmin_core::ports::{IdentityError, TokenPrecheckPort};

/// Claims read from a verified token. Unknown claims are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: u64,
    #[serde(default)]
    pub iat: Option<u64>,
    #[serde(default)]
    pub iss: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Invalid token issuer")]
    InvalidIssuer,

    #[error("Malformed token: {0}")]
    Malformed(String),
}

/// HS256 verifier with an optional expected issuer.
#[derive(Clone)]
pub struct JwtDecoder {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("issuer", &self.validation.iss)
            .finish_non_exhaustive()
    }
}

impl JwtDecoder {
    pub fn new(secret: impl AsRef<[u8]>, issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }

    /// Verify signature, expiry and issuer, returning the claims.
    pub fn decode(&self, token: &str) -> Result<JwtClaims, JwtError> {
        decode::<JwtClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
                _ => JwtError::Malformed(e.to_string()),
            })
    }
}

impl TokenPrecheckPort for JwtDecoder {
    fn precheck(&self, token: &str) -> Result<(), IdentityError> {
        self.decode(token).map(|_| ()).map_err(|e| {
            tracing::debug!(error = %e, "token failed local verification");
            IdentityError::InvalidToken(e.to_string())
        })
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
///
/// The scheme is matched case-insensitively. Returns `None` for any other
/// scheme or an empty token.
pub fn extract_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

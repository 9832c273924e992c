#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// HttpIdentityClient is generic over a crate-private backend trait; callers
// use it through IdentityProviderPort.
#![allow(private_bounds, private_interfaces)]

mod client;
mod config;
mod http;
pub mod jwt;
mod profile;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::HttpIdentityClient;
pub use http::ReqwestBackend;

// Configuration
pub use config::{IdentityClientConfig, IdentityConfigError};

// Local token checks
pub use jwt::{JwtClaims, JwtDecoder, JwtError, extract_bearer};

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;

//! Shared helpers used by domain types and services.

pub mod serde_helpers;
pub mod validation;

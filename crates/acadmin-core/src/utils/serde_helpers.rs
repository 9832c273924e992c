//! Serde helpers for partial-update payloads.

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable field of an update payload into `Option<Option<T>>`.
///
/// Combined with `#[serde(default)]`:
/// - field absent → `None` (leave unchanged)
/// - field `null` → `Some(None)` (clear)
/// - field set → `Some(Some(v))`
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

//! Domain event envelope shared by the producer and the consumer.
//!
//! # Wire Format
//!
//! Envelopes are serialized as camel-case JSON:
//!
//! ```json
//! {
//!   "eventId": "6f1c...",
//!   "eventType": "user.created",
//!   "occurredAt": "2026-03-01T10:00:00Z",
//!   "publishedAt": "2026-03-01T10:00:00.015Z",
//!   "sourceModule": "backoffice",
//!   "payload": { "id": 1, "email": "ada@uni.edu" }
//! }
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default `sourceModule` for events produced by this service.
pub const SOURCE_MODULE: &str = "backoffice";

/// Kind of write that produced an entity event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventAction {
    Created,
    Updated,
    Deleted,
}

impl EventAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        }
    }

    /// Event type for an entity write, e.g. `("campus", Created)` → `campus.created`.
    pub fn event_type(self, entity: &str) -> String {
        format!("{entity}.{}", self.as_str())
    }
}

impl fmt::Display for EventAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A domain event as it travels over the broker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    pub event_id: Uuid,
    pub event_type: String,
    pub occurred_at: DateTime<Utc>,
    /// Stamped by the producer when the message leaves the process.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub source_module: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl EventEnvelope {
    /// Start building an envelope. `build` assigns a fresh id and `occurred_at`.
    pub fn builder(event_type: impl Into<String>) -> EventBuilder {
        EventBuilder {
            event_type: event_type.into(),
            source_module: SOURCE_MODULE.to_string(),
            payload: serde_json::Value::Null,
        }
    }

    /// Copy of this envelope with `published_at` set to `now`.
    pub fn stamped(&self, now: DateTime<Utc>) -> Self {
        Self {
            published_at: Some(now),
            ..self.clone()
        }
    }
}

/// Builder returned by [`EventEnvelope::builder`].
#[derive(Debug, Clone)]
pub struct EventBuilder {
    event_type: String,
    source_module: String,
    payload: serde_json::Value,
}

impl EventBuilder {
    #[must_use]
    pub fn source(mut self, source_module: impl Into<String>) -> Self {
        self.source_module = source_module.into();
        self
    }

    #[must_use]
    pub fn payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn build(self) -> EventEnvelope {
        EventEnvelope {
            event_id: Uuid::new_v4(),
            event_type: self.event_type,
            occurred_at: Utc::now(),
            published_at: None,
            source_module: self.source_module,
            payload: self.payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_type_naming() {
        assert_eq!(EventAction::Created.event_type("role"), "role.created");
        assert_eq!(EventAction::Deleted.event_type("campus"), "campus.deleted");
    }

    #[test]
    fn test_builder_defaults() {
        let envelope = EventEnvelope::builder("user.created")
            .payload(json!({"id": 1}))
            .build();

        assert_eq!(envelope.event_type, "user.created");
        assert_eq!(envelope.source_module, SOURCE_MODULE);
        assert!(envelope.published_at.is_none());
        assert_eq!(envelope.payload["id"], 1);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let envelope = EventEnvelope::builder("space.updated")
            .source("backoffice-test")
            .build()
            .stamped(Utc::now());
        let value = serde_json::to_value(&envelope).unwrap();

        assert!(value.get("eventId").is_some());
        assert!(value.get("occurredAt").is_some());
        assert!(value.get("publishedAt").is_some());
        assert_eq!(value["sourceModule"], "backoffice-test");
        assert_eq!(value["eventType"], "space.updated");
    }

    #[test]
    fn test_decodes_envelope_without_optional_fields() {
        let raw = r#"{
            "eventId": "0b6c2f7e-8f7a-4c39-9c4e-3b1f0b9a2d11",
            "eventType": "enrollment.created",
            "occurredAt": "2026-03-01T10:00:00Z",
            "sourceModule": "academic"
        }"#;
        let envelope: EventEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.event_type, "enrollment.created");
        assert!(envelope.published_at.is_none());
        assert!(envelope.payload.is_null());
    }
}

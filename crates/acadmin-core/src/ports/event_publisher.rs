//! Outbound event port.
//!
//! Services publish an [`EventEnvelope`] after every successful write.
//! Transport details (AMQP, in-memory, nothing at all) live in adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::events::EventEnvelope;

/// Failure to hand an event to the transport.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Failed to encode event: {0}")]
    Encode(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Trait for publishing domain events.
///
/// # Implementations
///
/// - `NoopEventPublisher` - messaging disabled or broker unavailable
/// - `AmqpEventPublisher` in `acadmin-broker`
#[async_trait]
pub trait EventPublisherPort: Send + Sync {
    async fn publish(&self, event: &EventEnvelope) -> Result<(), PublishError>;
}

/// Discards every event.
#[derive(Debug, Clone, Default)]
pub struct NoopEventPublisher;

impl NoopEventPublisher {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisherPort for NoopEventPublisher {
    async fn publish(&self, event: &EventEnvelope) -> Result<(), PublishError> {
        tracing::trace!(event_type = %event.event_type, "messaging disabled, event dropped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_noop_publisher_accepts_everything() {
        let publisher: Arc<dyn EventPublisherPort> = Arc::new(NoopEventPublisher::new());
        let event = EventEnvelope::builder("role.created").build();
        assert!(publisher.publish(&event).await.is_ok());
    }
}

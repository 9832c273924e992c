//! Inbound event port, driven by the broker consumer.

use async_trait::async_trait;
use thiserror::Error;

use crate::events::EventEnvelope;

/// A consumed event could not be processed. The consumer rejects the
/// message without requeue.
#[derive(Debug, Error)]
#[error("Event handling failed: {0}")]
pub struct EventHandlerError(pub String);

#[async_trait]
pub trait EventHandlerPort: Send + Sync {
    async fn handle(&self, event: EventEnvelope) -> Result<(), EventHandlerError>;
}

/// Default handler: records the event and acknowledges it.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventHandler;

#[async_trait]
impl EventHandlerPort for LoggingEventHandler {
    async fn handle(&self, event: EventEnvelope) -> Result<(), EventHandlerError> {
        tracing::info!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            source_module = %event.source_module,
            "received event"
        );
        Ok(())
    }
}

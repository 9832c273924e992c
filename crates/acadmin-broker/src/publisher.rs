//! `EventPublisherPort` over AMQP.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lapin::options::BasicPublishOptions;
use lapin::{BasicProperties, Channel};

use acadmin_core::events::EventEnvelope;
use acadmin_core::ports::{EventPublisherPort, PublishError};

const CONTENT_TYPE: &str = "application/json";
/// AMQP delivery mode 2: the broker writes the message to disk.
const PERSISTENT: u8 = 2;

/// Publishes envelopes to the exchange, routed by event type.
#[derive(Clone)]
pub struct AmqpEventPublisher {
    channel: Channel,
    exchange: String,
}

impl AmqpEventPublisher {
    pub(crate) const fn new(channel: Channel, exchange: String) -> Self {
        Self { channel, exchange }
    }
}

/// Stamp `published_at` and serialize.
fn encode(event: &EventEnvelope, now: DateTime<Utc>) -> Result<Vec<u8>, PublishError> {
    serde_json::to_vec(&event.stamped(now)).map_err(|e| PublishError::Encode(e.to_string()))
}

fn properties(event: &EventEnvelope) -> BasicProperties {
    BasicProperties::default()
        .with_content_type(CONTENT_TYPE.into())
        .with_delivery_mode(PERSISTENT)
        .with_message_id(event.event_id.to_string().into())
        .with_type(event.event_type.clone().into())
        .with_app_id(event.source_module.clone().into())
}

#[async_trait]
impl EventPublisherPort for AmqpEventPublisher {
    async fn publish(&self, event: &EventEnvelope) -> Result<(), PublishError> {
        let body = encode(event, Utc::now())?;
        let transport = |e: lapin::Error| PublishError::Transport(e.to_string());

        self.channel
            .basic_publish(
                &self.exchange,
                &event.event_type,
                BasicPublishOptions::default(),
                &body,
                properties(event),
            )
            .await
            .map_err(transport)?
            .await
            .map_err(transport)?;

        tracing::debug!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            exchange = %self.exchange,
            "event published"
        );
        Ok(())
    }
}

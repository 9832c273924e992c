//! Queue consumer feeding an `EventHandlerPort`.

use std::sync::Arc;

use futures_util::StreamExt;
use lapin::options::{BasicAckOptions, BasicConsumeOptions, BasicRejectOptions};
use lapin::types::FieldTable;
use lapin::Channel;
use tokio_util::sync::CancellationToken;

use acadmin_core::events::{EventEnvelope, SOURCE_MODULE};
use acadmin_core::ports::EventHandlerPort;

use crate::error::BrokerError;

/// What to tell the broker about a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    Ack,
    /// Reject without requeue.
    Reject,
}

/// Consumes the configured queue until cancelled.
pub struct EventConsumer {
    channel: Channel,
    queue: String,
    consumer_tag: String,
}

impl EventConsumer {
    pub(crate) const fn new(channel: Channel, queue: String, consumer_tag: String) -> Self {
        Self {
            channel,
            queue,
            consumer_tag,
        }
    }

    /// Consume deliveries one at a time until `cancel` fires or the broker
    /// closes the stream.
    pub async fn run(
        &self,
        handler: Arc<dyn EventHandlerPort>,
        cancel: CancellationToken,
    ) -> Result<(), BrokerError> {
        let mut deliveries = self
            .channel
            .basic_consume(
                &self.queue,
                &self.consumer_tag,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await?;
        tracing::info!(queue = %self.queue, consumer_tag = %self.consumer_tag, "event consumer started");

        loop {
            let next = tokio::select! {
                () = cancel.cancelled() => break,
                next = deliveries.next() => next,
            };
            let Some(delivery) = next else {
                tracing::warn!(queue = %self.queue, "broker closed the delivery stream");
                break;
            };
            let delivery = match delivery {
                Ok(delivery) => delivery,
                Err(e) => {
                    tracing::error!(error = %e, "failed to receive delivery");
                    continue;
                }
            };

            let outcome = match process(&delivery.data, handler.as_ref()).await {
                Disposition::Ack => delivery.ack(BasicAckOptions::default()).await,
                Disposition::Reject => {
                    delivery
                        .reject(BasicRejectOptions { requeue: false })
                        .await
                }
            };
            if let Err(e) = outcome {
                tracing::error!(error = %e, "failed to settle delivery");
            }
        }

        tracing::info!(queue = %self.queue, "event consumer stopped");
        Ok(())
    }
}

/// Decode one message body and run the handler on it.
///
/// The default `#` binding also delivers what this service published
/// itself; those envelopes are acked without reaching the handler.
async fn process(data: &[u8], handler: &dyn EventHandlerPort) -> Disposition {
    let event: EventEnvelope = match serde_json::from_slice(data) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(error = %e, bytes = data.len(), "discarding undecodable message");
            return Disposition::Reject;
        }
    };
    let event_id = event.event_id;
    let event_type = event.event_type.clone();
    if event.source_module == SOURCE_MODULE {
        tracing::trace!(%event_id, %event_type, "skipping own event");
        return Disposition::Ack;
    }
    match handler.handle(event).await {
        Ok(()) => Disposition::Ack,
        Err(e) => {
            tracing::warn!(%event_id, %event_type, error = %e, "event handler failed");
            Disposition::Reject
        }
    }
}

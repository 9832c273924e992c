//! Connection setup and topology declaration.

use lapin::options::{
    BasicQosOptions, ExchangeDeclareOptions, QueueBindOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{Channel, Connection, ConnectionProperties, ExchangeKind};

use crate::config::BrokerConfig;
use crate::consumer::EventConsumer;
use crate::error::BrokerError;
use crate::publisher::AmqpEventPublisher;

/// An open AMQP connection with the exchange, queue and binding declared.
pub struct BrokerConnection {
    connection: Connection,
    channel: Channel,
    config: BrokerConfig,
}

impl BrokerConnection {
    /// Connect and declare topology. All declarations are idempotent.
    pub async fn connect(config: BrokerConfig) -> Result<Self, BrokerError> {
        config.validate()?;

        let connection = Connection::connect(
            &config.url,
            ConnectionProperties::default().with_connection_name("acadmin".into()),
        )
        .await?;
        let channel = connection.create_channel().await?;

        channel
            .exchange_declare(
                &config.exchange,
                ExchangeKind::Topic,
                ExchangeDeclareOptions {
                    durable: true,
                    ..ExchangeDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await?;
        channel
            .queue_declare(
                &config.queue,
                QueueDeclareOptions {
                    durable: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await?;
        channel
            .queue_bind(
                &config.queue,
                &config.exchange,
                &config.routing_key,
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await?;
        channel
            .basic_qos(config.prefetch, BasicQosOptions::default())
            .await?;

        tracing::info!(
            exchange = %config.exchange,
            queue = %config.queue,
            routing_key = %config.routing_key,
            "connected to message broker"
        );

        Ok(Self {
            connection,
            channel,
            config,
        })
    }

    pub fn publisher(&self) -> AmqpEventPublisher {
        AmqpEventPublisher::new(self.channel.clone(), self.config.exchange.clone())
    }

    pub fn consumer(&self) -> EventConsumer {
        EventConsumer::new(
            self.channel.clone(),
            self.config.queue.clone(),
            self.config.consumer_tag.clone(),
        )
    }

    pub fn config(&self) -> &BrokerConfig {
        &self.config
    }

    /// Close the channel and the connection.
    pub async fn close(self) -> Result<(), BrokerError> {
        self.channel.close(200, "shutdown").await?;
        self.connection.close(200, "shutdown").await?;
        Ok(())
    }
}

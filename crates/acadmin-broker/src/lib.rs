#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

mod config;
mod connection;
mod consumer;
mod error;
mod publisher;

pub use config::BrokerConfig;
pub use connection::BrokerConnection;
pub use consumer::EventConsumer;
pub use error::BrokerError;
pub use publisher::AmqpEventPublisher;

// Silence unused dev-dependency warnings
#[cfg(test)]
use tokio_test as _;

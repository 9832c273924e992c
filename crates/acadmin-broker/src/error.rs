//! Broker adapter errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrokerError {
    /// Connecting, declaring topology or talking to the broker failed.
    #[error("AMQP error: {0}")]
    Amqp(#[from] lapin::Error),

    /// The configuration cannot describe a usable topology.
    #[error("Invalid broker configuration: {0}")]
    Config(String),
}

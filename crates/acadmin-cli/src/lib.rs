#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tokio_test as _;

// Used by the binary only
use dotenvy as _;
use tokio as _;

pub mod commands;
pub mod handlers;
pub mod logging;
pub mod parser;

pub use commands::{BrokerArgs, Commands, DatabaseArgs, IdentityArgs, ServeArgs};
pub use parser::Cli;

//! Command handlers.
//!
//! Handlers are thin: they turn parsed arguments into configuration and hand
//! off to the adapters. No business logic lives here.

pub mod init_db;
pub mod serve;

//! HTTP request handlers for the Axum web server.
//!
//! Each submodule contains handlers for one resource. Handlers are thin
//! wrappers that delegate to `AppCore`.

pub mod campuses;
pub mod classes;
pub mod evaluations;
pub mod me;
pub mod roles;
pub mod salaries;
pub mod schedules;
pub mod spaces;
pub mod users;

//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx`, `reqwest` or `lapin` types in any signature
//! - Repository reads only ever see active (`status = true`) rows
//! - Uniqueness and reference checks belong in services, not here

pub mod campus_repository;
pub mod class_repository;
pub mod evaluation_repository;
pub mod event_handler;
pub mod event_publisher;
pub mod identity_provider;
pub mod role_repository;
pub mod salary_repository;
pub mod schedule_repository;
pub mod space_repository;
pub mod user_repository;

use std::sync::Arc;
use thiserror::Error;

// Re-export port traits for convenience
pub use campus_repository::CampusRepository;
pub use class_repository::ClassRepository;
pub use evaluation_repository::EvaluationRepository;
pub use event_handler::{EventHandlerError, EventHandlerPort, LoggingEventHandler};
pub use event_publisher::{EventPublisherPort, NoopEventPublisher, PublishError};
pub use identity_provider::{IdentityError, IdentityProviderPort, TokenPrecheckPort};
pub use role_repository::RoleRepository;
pub use salary_repository::SalaryRepository;
pub use schedule_repository::ScheduleRepository;
pub use space_repository::SpaceRepository;
pub use user_repository::UserRepository;

/// Container for all repository trait objects.
///
/// This struct provides a consistent way to wire repositories across adapters
/// without coupling them to concrete implementations. It lives in `acadmin-core`
/// so that `AppCore` can accept it without depending on `acadmin-db`.
///
/// # Example
///
/// ```ignore
/// // In acadmin-db factory:
/// let repos = CoreFactory::build_repos(pool);
///
/// // In adapter bootstrap:
/// let core = AppCore::new(repos, publisher);
/// ```
#[derive(Clone)]
pub struct Repos {
    pub roles: Arc<dyn RoleRepository>,
    pub salaries: Arc<dyn SalaryRepository>,
    pub users: Arc<dyn UserRepository>,
    pub campuses: Arc<dyn CampusRepository>,
    pub spaces: Arc<dyn SpaceRepository>,
    pub schedules: Arc<dyn ScheduleRepository>,
    pub classes: Arc<dyn ClassRepository>,
    pub evaluations: Arc<dyn EvaluationRepository>,
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found (or is soft-deleted).
    #[error("Not found: {0}")]
    NotFound(String),

    /// An active entity with the same unique key already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated (e.g., foreign key, check constraint).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain.
/// Adapters map it to their own error types (HTTP status codes, CLI exit codes).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Validation error (invalid input or dangling reference).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A uniqueness rule would be violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The requested entity does not exist or is inactive.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing, malformed or rejected credentials.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated caller lacks the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// External service error.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Normalize repository `NotFound` into the semantic `NotFound` variant.
    pub fn not_found_as(self, what: &str, id: i64) -> Self {
        match self {
            Self::Repository(RepositoryError::NotFound(_)) => {
                Self::NotFound(format!("{what} {id} not found"))
            }
            other => other,
        }
    }
}

impl From<IdentityError> for CoreError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::InvalidToken(msg) => Self::Unauthorized(msg),
            IdentityError::Unavailable(msg) | IdentityError::InvalidResponse(msg) => {
                Self::ExternalService(msg)
            }
        }
    }
}

//! Composition utilities for building `AppCore` with `SQLite` backends.
//!
//! Construction only. No domain logic lives here.

use sqlx::SqlitePool;
use std::sync::Arc;

use acadmin_core::Repos;
use acadmin_core::ports::EventPublisherPort;
use acadmin_core::services::AppCore;

use crate::repositories::{
    SqliteCampusRepository, SqliteClassRepository, SqliteEvaluationRepository,
    SqliteRoleRepository, SqliteSalaryRepository, SqliteScheduleRepository,
    SqliteSpaceRepository, SqliteUserRepository,
};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Build all `SQLite` repositories from a pool.
    ///
    /// Returns a `Repos` struct from `acadmin-core` containing
    /// trait-object-wrapped repositories that share the pool.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos {
            roles: Arc::new(SqliteRoleRepository::new(pool.clone())),
            salaries: Arc::new(SqliteSalaryRepository::new(pool.clone())),
            users: Arc::new(SqliteUserRepository::new(pool.clone())),
            campuses: Arc::new(SqliteCampusRepository::new(pool.clone())),
            spaces: Arc::new(SqliteSpaceRepository::new(pool.clone())),
            schedules: Arc::new(SqliteScheduleRepository::new(pool.clone())),
            classes: Arc::new(SqliteClassRepository::new(pool.clone())),
            evaluations: Arc::new(SqliteEvaluationRepository::new(pool)),
        }
    }

    /// Build a complete `AppCore` from a pool and an event publisher.
    ///
    /// Equivalent to:
    ///
    /// ```ignore
    /// let repos = CoreFactory::build_repos(pool);
    /// let core = AppCore::new(repos, publisher);
    /// ```
    ///
    /// # Example
    ///
    /// ```ignore
    /// use acadmin_db::{CoreFactory, setup_database};
    /// use acadmin_core::NoopEventPublisher;
    ///
    /// let pool = setup_database("sqlite://data/acadmin.db").await?;
    /// let core = CoreFactory::build_app_core(pool, Arc::new(NoopEventPublisher::new()));
    /// ```
    pub fn build_app_core(pool: SqlitePool, publisher: Arc<dyn EventPublisherPort>) -> AppCore {
        AppCore::new(Self::build_repos(pool), publisher)
    }
}

/// Test database helper for integration tests.
///
/// Wraps a single-connection in-memory `SQLite` database with the
/// production schema applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// All repositories backed by this database.
    pub fn repos(&self) -> Repos {
        CoreFactory::build_repos(self.pool.clone())
    }

    /// An `AppCore` backed by this database.
    pub fn app_core(&self, publisher: Arc<dyn EventPublisherPort>) -> AppCore {
        CoreFactory::build_app_core(self.pool.clone(), publisher)
    }
}

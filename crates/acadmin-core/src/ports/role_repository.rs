//! Role repository trait definition.
//!
//! This port defines the interface for role persistence operations.
//! Implementations must handle all storage details internally.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewRole, Page, Role};

/// Repository for role persistence operations.
///
/// Every read sees active rows only; a soft-deleted role behaves as if it
/// did not exist.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Insert a new role and return it with its assigned ID.
    ///
    /// Returns `Err(RepositoryError::AlreadyExists)` if an active role with the
    /// same name exists.
    async fn insert(&self, role: &NewRole) -> Result<Role, RepositoryError>;

    /// Get an active role by ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if it doesn't exist or is inactive.
    async fn get_by_id(&self, id: i64) -> Result<Role, RepositoryError>;

    /// Find an active role by name (case-insensitive).
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepositoryError>;

    /// List active roles ordered by ID.
    async fn list(&self, page: Page) -> Result<Vec<Role>, RepositoryError>;

    /// Case-insensitive substring search over name and description.
    async fn search(&self, query: &str, page: Page) -> Result<Vec<Role>, RepositoryError>;

    /// Persist every writable field of `role` and return the stored row.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the role doesn't exist or is inactive.
    async fn update(&self, role: &Role) -> Result<Role, RepositoryError>;

    /// Soft-delete a role (`status = false`).
    ///
    /// Returns `Err(RepositoryError::NotFound)` if it doesn't exist or is already inactive.
    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError>;
}

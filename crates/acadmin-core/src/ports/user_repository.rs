//! User repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewUser, Page, User};

/// Repository for user persistence. Reads see active rows only.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns `Err(RepositoryError::AlreadyExists)` on a duplicate email or
    /// document number, `Err(RepositoryError::Constraint)` on a dangling
    /// role or salary reference.
    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if missing or inactive.
    async fn get_by_id(&self, id: i64) -> Result<User, RepositoryError>;

    /// Find an active user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    async fn find_by_document_number(
        &self,
        document_number: &str,
    ) -> Result<Option<User>, RepositoryError>;

    async fn list(&self, page: Page) -> Result<Vec<User>, RepositoryError>;

    /// Case-insensitive substring search over names, email and document number.
    async fn search(&self, query: &str, page: Page) -> Result<Vec<User>, RepositoryError>;

    async fn update(&self, user: &User) -> Result<User, RepositoryError>;

    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError>;
}

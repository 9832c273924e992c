//! Space repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewSpace, Page, Space};

/// Repository for space persistence. Reads see active rows only.
#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn insert(&self, space: &NewSpace) -> Result<Space, RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if missing or inactive.
    async fn get_by_id(&self, id: i64) -> Result<Space, RepositoryError>;

    /// Find an active space by its `(campus_id, name)` key.
    async fn find_by_campus_and_name(
        &self,
        campus_id: i64,
        name: &str,
    ) -> Result<Option<Space>, RepositoryError>;

    async fn list(&self, page: Page) -> Result<Vec<Space>, RepositoryError>;

    /// Active spaces of one campus.
    async fn list_by_campus(
        &self,
        campus_id: i64,
        page: Page,
    ) -> Result<Vec<Space>, RepositoryError>;

    /// Case-insensitive substring search over name and space type.
    async fn search(&self, query: &str, page: Page) -> Result<Vec<Space>, RepositoryError>;

    async fn update(&self, space: &Space) -> Result<Space, RepositoryError>;

    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError>;
}

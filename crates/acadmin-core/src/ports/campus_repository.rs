//! Campus repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Campus, NewCampus, Page};

/// Repository for campus persistence. Reads see active rows only.
#[async_trait]
pub trait CampusRepository: Send + Sync {
    async fn insert(&self, campus: &NewCampus) -> Result<Campus, RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if missing or inactive.
    async fn get_by_id(&self, id: i64) -> Result<Campus, RepositoryError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Campus>, RepositoryError>;

    async fn list(&self, page: Page) -> Result<Vec<Campus>, RepositoryError>;

    /// Case-insensitive substring search over name, address and city.
    async fn search(&self, query: &str, page: Page) -> Result<Vec<Campus>, RepositoryError>;

    async fn update(&self, campus: &Campus) -> Result<Campus, RepositoryError>;

    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError>;
}

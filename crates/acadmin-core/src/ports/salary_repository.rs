//! Salary repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewSalary, Page, Salary};

/// Repository for salary band persistence. Reads see active rows only.
#[async_trait]
pub trait SalaryRepository: Send + Sync {
    async fn insert(&self, salary: &NewSalary) -> Result<Salary, RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if missing or inactive.
    async fn get_by_id(&self, id: i64) -> Result<Salary, RepositoryError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Salary>, RepositoryError>;

    async fn list(&self, page: Page) -> Result<Vec<Salary>, RepositoryError>;

    /// Case-insensitive substring search over name, currency and description.
    async fn search(&self, query: &str, page: Page) -> Result<Vec<Salary>, RepositoryError>;

    async fn update(&self, salary: &Salary) -> Result<Salary, RepositoryError>;

    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError>;
}

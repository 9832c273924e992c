//! Class repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Class, NewClass, Page};

/// Repository for class persistence. Reads see active rows only.
#[async_trait]
pub trait ClassRepository: Send + Sync {
    async fn insert(&self, class: &NewClass) -> Result<Class, RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if missing or inactive.
    async fn get_by_id(&self, id: i64) -> Result<Class, RepositoryError>;

    /// The active class occupying `space_id` at `schedule_id`, if any.
    async fn find_by_space_and_schedule(
        &self,
        space_id: i64,
        schedule_id: i64,
    ) -> Result<Option<Class>, RepositoryError>;

    /// The active class `teacher_id` teaches at `schedule_id`, if any.
    async fn find_by_teacher_and_schedule(
        &self,
        teacher_id: i64,
        schedule_id: i64,
    ) -> Result<Option<Class>, RepositoryError>;

    async fn list(&self, page: Page) -> Result<Vec<Class>, RepositoryError>;

    async fn list_by_teacher(
        &self,
        teacher_id: i64,
        page: Page,
    ) -> Result<Vec<Class>, RepositoryError>;

    /// Case-insensitive substring search over name and description.
    async fn search(&self, query: &str, page: Page) -> Result<Vec<Class>, RepositoryError>;

    async fn update(&self, class: &Class) -> Result<Class, RepositoryError>;

    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError>;
}

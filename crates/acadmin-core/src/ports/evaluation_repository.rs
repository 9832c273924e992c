//! Evaluation repository trait definition.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{Evaluation, NewEvaluation, Page};

/// Repository for evaluation persistence. Reads see active rows only.
#[async_trait]
pub trait EvaluationRepository: Send + Sync {
    async fn insert(&self, evaluation: &NewEvaluation) -> Result<Evaluation, RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if missing or inactive.
    async fn get_by_id(&self, id: i64) -> Result<Evaluation, RepositoryError>;

    async fn find_by_class_and_name(
        &self,
        class_id: i64,
        name: &str,
    ) -> Result<Option<Evaluation>, RepositoryError>;

    async fn list(&self, page: Page) -> Result<Vec<Evaluation>, RepositoryError>;

    /// Active evaluations of one class, ordered by date.
    async fn list_by_class(
        &self,
        class_id: i64,
        page: Page,
    ) -> Result<Vec<Evaluation>, RepositoryError>;

    /// Case-insensitive substring search over name and description.
    async fn search(&self, query: &str, page: Page)
    -> Result<Vec<Evaluation>, RepositoryError>;

    async fn update(&self, evaluation: &Evaluation) -> Result<Evaluation, RepositoryError>;

    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError>;
}

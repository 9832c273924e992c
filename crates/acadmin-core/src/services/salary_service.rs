//! Salary service - CRUD with name uniqueness.

use std::sync::Arc;

use super::common::{EventSink, ensure_free, not_found, search_term, write_error};
use crate::domain::{NewSalary, Page, Salary, SalaryUpdate};
use crate::events::EventAction;
use crate::ports::{CoreError, EventPublisherPort, SalaryRepository};

const ENTITY: &str = "salary";

/// Service for salary band operations.
pub struct SalaryService {
    repo: Arc<dyn SalaryRepository>,
    events: EventSink,
}

impl SalaryService {
    pub(crate) fn new(
        repo: Arc<dyn SalaryRepository>,
        publisher: Arc<dyn EventPublisherPort>,
    ) -> Self {
        Self {
            repo,
            events: EventSink::new(publisher),
        }
    }

    pub async fn create(&self, salary: NewSalary) -> Result<Salary, CoreError> {
        salary.validate()?;
        self.ensure_name_free(&salary.name, None).await?;

        let created = self
            .repo
            .insert(&salary)
            .await
            .map_err(|e| write_error(e, ENTITY, None))?;
        tracing::info!(entity = ENTITY, id = created.id, "created");
        self.events.emit(ENTITY, EventAction::Created, &created).await;
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> Result<Salary, CoreError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| not_found(e, ENTITY, id))
    }

    pub async fn list(&self, page: Page) -> Result<Vec<Salary>, CoreError> {
        Ok(self.repo.list(page).await?)
    }

    pub async fn search(&self, query: &str, page: Page) -> Result<Vec<Salary>, CoreError> {
        Ok(self.repo.search(search_term(query)?, page).await?)
    }

    pub async fn update(&self, id: i64, update: SalaryUpdate) -> Result<Salary, CoreError> {
        let mut salary = self.get(id).await?;
        update.apply(&mut salary);
        salary.to_new().validate()?;
        self.ensure_name_free(&salary.name, Some(id)).await?;

        let updated = self
            .repo
            .update(&salary)
            .await
            .map_err(|e| write_error(e, ENTITY, Some(id)))?;
        tracing::info!(entity = ENTITY, id, "updated");
        self.events.emit(ENTITY, EventAction::Updated, &updated).await;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), CoreError> {
        self.repo
            .deactivate(id)
            .await
            .map_err(|e| not_found(e, ENTITY, id))?;
        tracing::info!(entity = ENTITY, id, "deactivated");
        self.events.deleted(ENTITY, id).await;
        Ok(())
    }

    async fn ensure_name_free(&self, name: &str, exclude: Option<i64>) -> Result<(), CoreError> {
        let holder = self.repo.find_by_name(name).await?.map(|s| s.id);
        ensure_free(holder, exclude, || {
            format!("a salary named '{name}' already exists")
        })
    }
}

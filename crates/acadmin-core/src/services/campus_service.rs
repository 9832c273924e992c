//! Campus service - CRUD with name uniqueness, plus the spaces of a campus.

use std::sync::Arc;

use super::common::{EventSink, ensure_free, not_found, search_term, write_error};
use crate::domain::{Campus, CampusUpdate, NewCampus, Page, Space};
use crate::events::EventAction;
use crate::ports::{CampusRepository, CoreError, EventPublisherPort, SpaceRepository};

const ENTITY: &str = "campus";

/// Service for campus operations.
pub struct CampusService {
    repo: Arc<dyn CampusRepository>,
    spaces: Arc<dyn SpaceRepository>,
    events: EventSink,
}

impl CampusService {
    pub(crate) fn new(
        repo: Arc<dyn CampusRepository>,
        spaces: Arc<dyn SpaceRepository>,
        publisher: Arc<dyn EventPublisherPort>,
    ) -> Self {
        Self {
            repo,
            spaces,
            events: EventSink::new(publisher),
        }
    }

    pub async fn create(&self, campus: NewCampus) -> Result<Campus, CoreError> {
        campus.validate()?;
        self.ensure_name_free(&campus.name, None).await?;

        let created = self
            .repo
            .insert(&campus)
            .await
            .map_err(|e| write_error(e, ENTITY, None))?;
        tracing::info!(entity = ENTITY, id = created.id, "created");
        self.events.emit(ENTITY, EventAction::Created, &created).await;
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> Result<Campus, CoreError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| not_found(e, ENTITY, id))
    }

    pub async fn list(&self, page: Page) -> Result<Vec<Campus>, CoreError> {
        Ok(self.repo.list(page).await?)
    }

    pub async fn search(&self, query: &str, page: Page) -> Result<Vec<Campus>, CoreError> {
        Ok(self.repo.search(search_term(query)?, page).await?)
    }

    /// Active spaces of an active campus (404 if the campus is gone).
    pub async fn spaces(&self, id: i64, page: Page) -> Result<Vec<Space>, CoreError> {
        self.get(id).await?;
        Ok(self.spaces.list_by_campus(id, page).await?)
    }

    pub async fn update(&self, id: i64, update: CampusUpdate) -> Result<Campus, CoreError> {
        let mut campus = self.get(id).await?;
        update.apply(&mut campus);
        campus.to_new().validate()?;
        self.ensure_name_free(&campus.name, Some(id)).await?;

        let updated = self
            .repo
            .update(&campus)
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
        let holder = self.repo.find_by_name(name).await?.map(|c| c.id);
        ensure_free(holder, exclude, || {
            format!("a campus named '{name}' already exists")
        })
    }
}

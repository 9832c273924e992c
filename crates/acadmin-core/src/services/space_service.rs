//! Space service - CRUD with `(campus_id, name)` uniqueness and campus
//! reference checks.

use std::sync::Arc;

use super::common::{
    EventSink, ensure_free, invalid_reference, not_found, reference_changed, search_term,
    write_error,
};
use crate::domain::{NewSpace, Page, Space, SpaceUpdate};
use crate::events::EventAction;
use crate::ports::{CampusRepository, CoreError, EventPublisherPort, SpaceRepository};

const ENTITY: &str = "space";

/// Service for space operations.
pub struct SpaceService {
    repo: Arc<dyn SpaceRepository>,
    campuses: Arc<dyn CampusRepository>,
    events: EventSink,
}

impl SpaceService {
    pub(crate) fn new(
        repo: Arc<dyn SpaceRepository>,
        campuses: Arc<dyn CampusRepository>,
        publisher: Arc<dyn EventPublisherPort>,
    ) -> Self {
        Self {
            repo,
            campuses,
            events: EventSink::new(publisher),
        }
    }

    pub async fn create(&self, space: NewSpace) -> Result<Space, CoreError> {
        space.validate()?;
        self.check_constraints(&space, None).await?;

        let created = self
            .repo
            .insert(&space)
            .await
            .map_err(|e| write_error(e, ENTITY, None))?;
        tracing::info!(entity = ENTITY, id = created.id, "created");
        self.events.emit(ENTITY, EventAction::Created, &created).await;
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> Result<Space, CoreError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| not_found(e, ENTITY, id))
    }

    pub async fn list(&self, page: Page) -> Result<Vec<Space>, CoreError> {
        Ok(self.repo.list(page).await?)
    }

    pub async fn search(&self, query: &str, page: Page) -> Result<Vec<Space>, CoreError> {
        Ok(self.repo.search(search_term(query)?, page).await?)
    }

    pub async fn update(&self, id: i64, update: SpaceUpdate) -> Result<Space, CoreError> {
        let mut space = self.get(id).await?;
        let previous = space.clone();
        update.apply(&mut space);
        let draft = space.to_new();
        draft.validate()?;
        self.check_constraints(&draft, Some(&previous)).await?;

        let updated = self
            .repo
            .update(&space)
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

    /// Uniqueness against active rows, plus every reference that is new or
    /// changed relative to `previous`.
    async fn check_constraints(
        &self,
        space: &NewSpace,
        previous: Option<&Space>,
    ) -> Result<(), CoreError> {
        let exclude = previous.map(|p| p.id);

        if reference_changed(previous.map(|p| p.campus_id), space.campus_id) {
            self.campuses
                .get_by_id(space.campus_id)
                .await
                .map_err(|e| invalid_reference(e, "campus_id", space.campus_id))?;
        }

        let holder = self
            .repo
            .find_by_campus_and_name(space.campus_id, &space.name)
            .await?
            .map(|s| s.id);
        ensure_free(holder, exclude, || {
            format!(
                "campus {} already has a space named '{}'",
                space.campus_id, space.name
            )
        })
    }
}

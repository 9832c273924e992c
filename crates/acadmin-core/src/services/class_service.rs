//! Class service - CRUD with room/teacher double-booking checks and
//! teacher/space/schedule reference checks.

use std::sync::Arc;

use super::common::{
    EventSink, ensure_free, invalid_reference, not_found, reference_changed, search_term,
    write_error,
};
use crate::domain::{Class, ClassUpdate, Evaluation, NewClass, Page};
use crate::events::EventAction;
use crate::ports::{
    ClassRepository, CoreError, EvaluationRepository, EventPublisherPort, ScheduleRepository,
    SpaceRepository, UserRepository,
};

const ENTITY: &str = "class";

/// Service for class operations.
pub struct ClassService {
    repo: Arc<dyn ClassRepository>,
    users: Arc<dyn UserRepository>,
    spaces: Arc<dyn SpaceRepository>,
    schedules: Arc<dyn ScheduleRepository>,
    evaluations: Arc<dyn EvaluationRepository>,
    events: EventSink,
}

impl ClassService {
    pub(crate) fn new(
        repo: Arc<dyn ClassRepository>,
        users: Arc<dyn UserRepository>,
        spaces: Arc<dyn SpaceRepository>,
        schedules: Arc<dyn ScheduleRepository>,
        evaluations: Arc<dyn EvaluationRepository>,
        publisher: Arc<dyn EventPublisherPort>,
    ) -> Self {
        Self {
            repo,
            users,
            spaces,
            schedules,
            evaluations,
            events: EventSink::new(publisher),
        }
    }

    pub async fn create(&self, class: NewClass) -> Result<Class, CoreError> {
        class.validate()?;
        self.check_constraints(&class, None).await?;

        let created = self
            .repo
            .insert(&class)
            .await
            .map_err(|e| write_error(e, ENTITY, None))?;
        tracing::info!(entity = ENTITY, id = created.id, "created");
        self.events.emit(ENTITY, EventAction::Created, &created).await;
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> Result<Class, CoreError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| not_found(e, ENTITY, id))
    }

    pub async fn list(&self, page: Page) -> Result<Vec<Class>, CoreError> {
        Ok(self.repo.list(page).await?)
    }

    pub async fn search(&self, query: &str, page: Page) -> Result<Vec<Class>, CoreError> {
        Ok(self.repo.search(search_term(query)?, page).await?)
    }

    /// Active evaluations of an active class.
    pub async fn evaluations(&self, id: i64, page: Page) -> Result<Vec<Evaluation>, CoreError> {
        self.get(id).await?;
        Ok(self.evaluations.list_by_class(id, page).await?)
    }

    pub async fn update(&self, id: i64, update: ClassUpdate) -> Result<Class, CoreError> {
        let mut class = self.get(id).await?;
        let previous = class.clone();
        update.apply(&mut class);
        let draft = class.to_new();
        draft.validate()?;
        self.check_constraints(&draft, Some(&previous)).await?;

        let updated = self
            .repo
            .update(&class)
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
        class: &NewClass,
        previous: Option<&Class>,
    ) -> Result<(), CoreError> {
        let exclude = previous.map(|p| p.id);

        if reference_changed(previous.map(|p| p.teacher_id), class.teacher_id) {
            self.users
                .get_by_id(class.teacher_id)
                .await
                .map_err(|e| invalid_reference(e, "teacher_id", class.teacher_id))?;
        }
        if reference_changed(previous.map(|p| p.space_id), class.space_id) {
            self.spaces
                .get_by_id(class.space_id)
                .await
                .map_err(|e| invalid_reference(e, "space_id", class.space_id))?;
        }
        if reference_changed(previous.map(|p| p.schedule_id), class.schedule_id) {
            self.schedules
                .get_by_id(class.schedule_id)
                .await
                .map_err(|e| invalid_reference(e, "schedule_id", class.schedule_id))?;
        }

        let holder = self
            .repo
            .find_by_space_and_schedule(class.space_id, class.schedule_id)
            .await?
            .map(|c| c.id);
        ensure_free(holder, exclude, || {
            format!(
                "space {} is already booked for schedule {}",
                class.space_id, class.schedule_id
            )
        })?;

        let holder = self
            .repo
            .find_by_teacher_and_schedule(class.teacher_id, class.schedule_id)
            .await?
            .map(|c| c.id);
        ensure_free(holder, exclude, || {
            format!(
                "teacher {} already teaches a class at schedule {}",
                class.teacher_id, class.schedule_id
            )
        })
    }
}

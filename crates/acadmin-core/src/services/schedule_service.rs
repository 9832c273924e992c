//! Schedule service - CRUD with slot uniqueness.

use std::sync::Arc;

use super::common::{EventSink, ensure_free, not_found, search_term, write_error};
use crate::domain::{NewSchedule, Page, Schedule, ScheduleUpdate};
use crate::events::EventAction;
use crate::ports::{CoreError, EventPublisherPort, ScheduleRepository};

const ENTITY: &str = "schedule";

/// Service for weekly schedule slots.
pub struct ScheduleService {
    repo: Arc<dyn ScheduleRepository>,
    events: EventSink,
}

impl ScheduleService {
    pub(crate) fn new(
        repo: Arc<dyn ScheduleRepository>,
        publisher: Arc<dyn EventPublisherPort>,
    ) -> Self {
        Self {
            repo,
            events: EventSink::new(publisher),
        }
    }

    pub async fn create(&self, schedule: NewSchedule) -> Result<Schedule, CoreError> {
        schedule.validate()?;
        self.ensure_slot_free(&schedule, None).await?;

        let created = self
            .repo
            .insert(&schedule)
            .await
            .map_err(|e| write_error(e, ENTITY, None))?;
        tracing::info!(entity = ENTITY, id = created.id, "created");
        self.events.emit(ENTITY, EventAction::Created, &created).await;
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> Result<Schedule, CoreError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| not_found(e, ENTITY, id))
    }

    pub async fn list(&self, page: Page) -> Result<Vec<Schedule>, CoreError> {
        Ok(self.repo.list(page).await?)
    }

    pub async fn search(&self, query: &str, page: Page) -> Result<Vec<Schedule>, CoreError> {
        Ok(self.repo.search(search_term(query)?, page).await?)
    }

    pub async fn update(&self, id: i64, update: ScheduleUpdate) -> Result<Schedule, CoreError> {
        let mut schedule = self.get(id).await?;
        update.apply(&mut schedule);
        let draft = schedule.to_new();
        draft.validate()?;
        self.ensure_slot_free(&draft, Some(id)).await?;

        let updated = self
            .repo
            .update(&schedule)
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

    async fn ensure_slot_free(
        &self,
        schedule: &NewSchedule,
        exclude: Option<i64>,
    ) -> Result<(), CoreError> {
        let holder = self
            .repo
            .find_by_slot(schedule.day_of_week, schedule.start_time, schedule.end_time)
            .await?
            .map(|s| s.id);
        ensure_free(holder, exclude, || {
            format!(
                "a schedule for {} {}-{} already exists",
                schedule.day_of_week, schedule.start_time, schedule.end_time
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DayOfWeek;
    use crate::services::mocks::{MockScheduleRepo, RecordingPublisher};

    fn slot(day: DayOfWeek, start: &str, end: &str) -> NewSchedule {
        NewSchedule {
            day_of_week: day,
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn test_identical_slot_conflicts() {
        let service = ScheduleService::new(
            Arc::new(MockScheduleRepo::default()),
            Arc::new(RecordingPublisher::default()),
        );
        service
            .create(slot(DayOfWeek::Monday, "08:00:00", "10:00:00"))
            .await
            .unwrap();
        service
            .create(slot(DayOfWeek::Tuesday, "08:00:00", "10:00:00"))
            .await
            .unwrap();

        assert!(matches!(
            service
                .create(slot(DayOfWeek::Monday, "08:00:00", "10:00:00"))
                .await,
            Err(CoreError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_inverted_range() {
        let service = ScheduleService::new(
            Arc::new(MockScheduleRepo::default()),
            Arc::new(RecordingPublisher::default()),
        );
        let schedule = service
            .create(slot(DayOfWeek::Monday, "08:00:00", "10:00:00"))
            .await
            .unwrap();

        let err = service
            .update(
                schedule.id,
                ScheduleUpdate {
                    start_time: Some("11:00:00".parse().unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }
}

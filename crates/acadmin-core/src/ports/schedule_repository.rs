//! Schedule repository trait definition.

use async_trait::async_trait;
use chrono::NaiveTime;

use super::RepositoryError;
use crate::domain::{DayOfWeek, NewSchedule, Page, Schedule};

/// Repository for schedule slot persistence. Reads see active rows only.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn insert(&self, schedule: &NewSchedule) -> Result<Schedule, RepositoryError>;

    /// Returns `Err(RepositoryError::NotFound)` if missing or inactive.
    async fn get_by_id(&self, id: i64) -> Result<Schedule, RepositoryError>;

    /// Find the active slot with exactly this day and time range.
    async fn find_by_slot(
        &self,
        day_of_week: DayOfWeek,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Option<Schedule>, RepositoryError>;

    /// Ordered by day, then start time.
    async fn list(&self, page: Page) -> Result<Vec<Schedule>, RepositoryError>;

    /// Substring search over the day name.
    async fn search(&self, query: &str, page: Page) -> Result<Vec<Schedule>, RepositoryError>;

    async fn update(&self, schedule: &Schedule) -> Result<Schedule, RepositoryError>;

    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError>;
}

//! `SQLite` implementation of the schedule repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveTime, Utc};
use sqlx::SqlitePool;

use acadmin_core::domain::{DayOfWeek, NewSchedule, Page, Schedule};
use acadmin_core::ports::{RepositoryError, ScheduleRepository};

use super::row_mappers::{like_pattern, map_sqlx_error, not_found};

const ENTITY: &str = "schedule";
const COLUMNS: &str = "id, day_of_week, start_time, end_time, status, created_at, updated_at";

/// Sorts rows Monday-first instead of alphabetically.
const DAY_ORDER: &str = "CASE day_of_week
    WHEN 'monday' THEN 1 WHEN 'tuesday' THEN 2 WHEN 'wednesday' THEN 3
    WHEN 'thursday' THEN 4 WHEN 'friday' THEN 5 WHEN 'saturday' THEN 6
    ELSE 7 END";

/// Times are stored as `HH:MM:SS` text so equality and ordering work on
/// the raw column.
const TIME_FORMAT: &str = "%H:%M:%S";

fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// `SQLite` implementation of the schedule repository.
pub struct SqliteScheduleRepository {
    pool: SqlitePool,
}

impl SqliteScheduleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ScheduleRow {
    id: i64,
    day_of_week: String,
    start_time: String,
    end_time: String,
    status: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn parse_time(value: &str) -> Result<NaiveTime, RepositoryError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|e| RepositoryError::Serialization(format!("invalid time '{value}': {e}")))
}

fn row_to_schedule(row: ScheduleRow) -> Result<Schedule, RepositoryError> {
    Ok(Schedule {
        id: row.id,
        day_of_week: row
            .day_of_week
            .parse::<DayOfWeek>()
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?,
        start_time: parse_time(&row.start_time)?,
        end_time: parse_time(&row.end_time)?,
        status: row.status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_schedules(rows: Vec<ScheduleRow>) -> Result<Vec<Schedule>, RepositoryError> {
    rows.into_iter().map(row_to_schedule).collect()
}

#[async_trait]
impl ScheduleRepository for SqliteScheduleRepository {
    async fn insert(&self, schedule: &NewSchedule) -> Result<Schedule, RepositoryError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, ScheduleRow>(&format!(
            "INSERT INTO schedules (day_of_week, start_time, end_time, status, created_at, updated_at)
             VALUES (?, ?, ?, 1, ?, ?)
             RETURNING {COLUMNS}"
        ))
        .bind(schedule.day_of_week.as_str())
        .bind(format_time(schedule.start_time))
        .bind(format_time(schedule.end_time))
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        row_to_schedule(row)
    }

    async fn get_by_id(&self, id: i64) -> Result<Schedule, RepositoryError> {
        let row = sqlx::query_as::<_, ScheduleRow>(&format!(
            "SELECT {COLUMNS} FROM schedules WHERE id = ? AND status = 1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .ok_or_else(|| not_found(ENTITY, id))?;
        row_to_schedule(row)
    }

    async fn find_by_slot(
        &self,
        day_of_week: DayOfWeek,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Option<Schedule>, RepositoryError> {
        sqlx::query_as::<_, ScheduleRow>(&format!(
            "SELECT {COLUMNS} FROM schedules
             WHERE day_of_week = ? AND start_time = ? AND end_time = ? AND status = 1"
        ))
        .bind(day_of_week.as_str())
        .bind(format_time(start_time))
        .bind(format_time(end_time))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .map(row_to_schedule)
        .transpose()
    }

    async fn list(&self, page: Page) -> Result<Vec<Schedule>, RepositoryError> {
        let rows = sqlx::query_as::<_, ScheduleRow>(&format!(
            "SELECT {COLUMNS} FROM schedules WHERE status = 1
             ORDER BY {DAY_ORDER}, start_time, id LIMIT ? OFFSET ?"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        rows_to_schedules(rows)
    }

    async fn search(&self, query: &str, page: Page) -> Result<Vec<Schedule>, RepositoryError> {
        let rows = sqlx::query_as::<_, ScheduleRow>(&format!(
            r"SELECT {COLUMNS} FROM schedules
              WHERE status = 1 AND day_of_week LIKE ?1 ESCAPE '\'
              ORDER BY {DAY_ORDER}, start_time, id LIMIT ?2 OFFSET ?3"
        ))
        .bind(like_pattern(query))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        rows_to_schedules(rows)
    }

    async fn update(&self, schedule: &Schedule) -> Result<Schedule, RepositoryError> {
        let row = sqlx::query_as::<_, ScheduleRow>(&format!(
            "UPDATE schedules SET day_of_week = ?, start_time = ?, end_time = ?, updated_at = ?
             WHERE id = ? AND status = 1
             RETURNING {COLUMNS}"
        ))
        .bind(schedule.day_of_week.as_str())
        .bind(format_time(schedule.start_time))
        .bind(format_time(schedule.end_time))
        .bind(Utc::now())
        .bind(schedule.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .ok_or_else(|| not_found(ENTITY, schedule.id))?;
        row_to_schedule(row)
    }

    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE schedules SET status = 0, updated_at = ? WHERE id = ? AND status = 1",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        if result.rows_affected() == 0 {
            return Err(not_found(ENTITY, id));
        }
        Ok(())
    }
}

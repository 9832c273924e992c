//! `SQLite` implementation of the class repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use acadmin_core::domain::{Class, NewClass, Page};
use acadmin_core::ports::{ClassRepository, RepositoryError};

use super::row_mappers::{like_pattern, map_sqlx_error, not_found};

const ENTITY: &str = "class";
const COLUMNS: &str =
    "id, name, description, teacher_id, space_id, schedule_id, status, created_at, updated_at";

/// `SQLite` implementation of the class repository.
pub struct SqliteClassRepository {
    pool: SqlitePool,
}

impl SqliteClassRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_in_slot(
        &self,
        holder_column: &str,
        holder_id: i64,
        schedule_id: i64,
    ) -> Result<Option<Class>, RepositoryError> {
        let row = sqlx::query_as::<_, ClassRow>(&format!(
            "SELECT {COLUMNS} FROM classes
             WHERE {holder_column} = ? AND schedule_id = ? AND status = 1"
        ))
        .bind(holder_id)
        .bind(schedule_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(row.map(Class::from))
    }
}

#[derive(sqlx::FromRow)]
struct ClassRow {
    id: i64,
    name: String,
    description: Option<String>,
    teacher_id: i64,
    space_id: i64,
    schedule_id: i64,
    status: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ClassRow> for Class {
    fn from(row: ClassRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            teacher_id: row.teacher_id,
            space_id: row.space_id,
            schedule_id: row.schedule_id,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ClassRepository for SqliteClassRepository {
    async fn insert(&self, class: &NewClass) -> Result<Class, RepositoryError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, ClassRow>(&format!(
            "INSERT INTO classes (name, description, teacher_id, space_id, schedule_id,
                                  status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, 1, ?, ?)
             RETURNING {COLUMNS}"
        ))
        .bind(&class.name)
        .bind(&class.description)
        .bind(class.teacher_id)
        .bind(class.space_id)
        .bind(class.schedule_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(row.into())
    }

    async fn get_by_id(&self, id: i64) -> Result<Class, RepositoryError> {
        let row = sqlx::query_as::<_, ClassRow>(&format!(
            "SELECT {COLUMNS} FROM classes WHERE id = ? AND status = 1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .ok_or_else(|| not_found(ENTITY, id))?;
        Ok(row.into())
    }

    async fn find_by_space_and_schedule(
        &self,
        space_id: i64,
        schedule_id: i64,
    ) -> Result<Option<Class>, RepositoryError> {
        self.find_in_slot("space_id", space_id, schedule_id).await
    }

    async fn find_by_teacher_and_schedule(
        &self,
        teacher_id: i64,
        schedule_id: i64,
    ) -> Result<Option<Class>, RepositoryError> {
        self.find_in_slot("teacher_id", teacher_id, schedule_id)
            .await
    }

    async fn list(&self, page: Page) -> Result<Vec<Class>, RepositoryError> {
        let rows = sqlx::query_as::<_, ClassRow>(&format!(
            "SELECT {COLUMNS} FROM classes WHERE status = 1 ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(rows.into_iter().map(Class::from).collect())
    }

    async fn list_by_teacher(
        &self,
        teacher_id: i64,
        page: Page,
    ) -> Result<Vec<Class>, RepositoryError> {
        let rows = sqlx::query_as::<_, ClassRow>(&format!(
            "SELECT {COLUMNS} FROM classes
             WHERE teacher_id = ? AND status = 1
             ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(teacher_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(rows.into_iter().map(Class::from).collect())
    }

    async fn search(&self, query: &str, page: Page) -> Result<Vec<Class>, RepositoryError> {
        let rows = sqlx::query_as::<_, ClassRow>(&format!(
            r"SELECT {COLUMNS} FROM classes
              WHERE status = 1
                AND (name LIKE ?1 ESCAPE '\' OR description LIKE ?1 ESCAPE '\')
              ORDER BY id LIMIT ?2 OFFSET ?3"
        ))
        .bind(like_pattern(query))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(rows.into_iter().map(Class::from).collect())
    }

    async fn update(&self, class: &Class) -> Result<Class, RepositoryError> {
        let row = sqlx::query_as::<_, ClassRow>(&format!(
            "UPDATE classes
             SET name = ?, description = ?, teacher_id = ?, space_id = ?, schedule_id = ?,
                 updated_at = ?
             WHERE id = ? AND status = 1
             RETURNING {COLUMNS}"
        ))
        .bind(&class.name)
        .bind(&class.description)
        .bind(class.teacher_id)
        .bind(class.space_id)
        .bind(class.schedule_id)
        .bind(Utc::now())
        .bind(class.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .ok_or_else(|| not_found(ENTITY, class.id))?;
        Ok(row.into())
    }

    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE classes SET status = 0, updated_at = ? WHERE id = ? AND status = 1")
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

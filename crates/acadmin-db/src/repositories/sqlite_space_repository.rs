//! `SQLite` implementation of the space repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use acadmin_core::domain::{NewSpace, Page, Space, SpaceType};
use acadmin_core::ports::{RepositoryError, SpaceRepository};

use super::row_mappers::{like_pattern, map_sqlx_error, not_found};

const ENTITY: &str = "space";
const COLUMNS: &str = "id, campus_id, name, space_type, capacity, status, created_at, updated_at";

/// `SQLite` implementation of the space repository.
pub struct SqliteSpaceRepository {
    pool: SqlitePool,
}

impl SqliteSpaceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SpaceRow {
    id: i64,
    campus_id: i64,
    name: String,
    space_type: String,
    capacity: i64,
    status: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn row_to_space(row: SpaceRow) -> Result<Space, RepositoryError> {
    let space_type = row
        .space_type
        .parse::<SpaceType>()
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    Ok(Space {
        id: row.id,
        campus_id: row.campus_id,
        name: row.name,
        space_type,
        capacity: row.capacity,
        status: row.status,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn rows_to_spaces(rows: Vec<SpaceRow>) -> Result<Vec<Space>, RepositoryError> {
    rows.into_iter().map(row_to_space).collect()
}

#[async_trait]
impl SpaceRepository for SqliteSpaceRepository {
    async fn insert(&self, space: &NewSpace) -> Result<Space, RepositoryError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, SpaceRow>(&format!(
            "INSERT INTO spaces (campus_id, name, space_type, capacity, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, 1, ?, ?)
             RETURNING {COLUMNS}"
        ))
        .bind(space.campus_id)
        .bind(&space.name)
        .bind(space.space_type.as_str())
        .bind(space.capacity)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        row_to_space(row)
    }

    async fn get_by_id(&self, id: i64) -> Result<Space, RepositoryError> {
        let row = sqlx::query_as::<_, SpaceRow>(&format!(
            "SELECT {COLUMNS} FROM spaces WHERE id = ? AND status = 1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .ok_or_else(|| not_found(ENTITY, id))?;
        row_to_space(row)
    }

    async fn find_by_campus_and_name(
        &self,
        campus_id: i64,
        name: &str,
    ) -> Result<Option<Space>, RepositoryError> {
        sqlx::query_as::<_, SpaceRow>(&format!(
            "SELECT {COLUMNS} FROM spaces
             WHERE campus_id = ? AND name = ? COLLATE NOCASE AND status = 1"
        ))
        .bind(campus_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .map(row_to_space)
        .transpose()
    }

    async fn list(&self, page: Page) -> Result<Vec<Space>, RepositoryError> {
        let rows = sqlx::query_as::<_, SpaceRow>(&format!(
            "SELECT {COLUMNS} FROM spaces WHERE status = 1 ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        rows_to_spaces(rows)
    }

    async fn list_by_campus(
        &self,
        campus_id: i64,
        page: Page,
    ) -> Result<Vec<Space>, RepositoryError> {
        let rows = sqlx::query_as::<_, SpaceRow>(&format!(
            "SELECT {COLUMNS} FROM spaces
             WHERE campus_id = ? AND status = 1
             ORDER BY name COLLATE NOCASE LIMIT ? OFFSET ?"
        ))
        .bind(campus_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        rows_to_spaces(rows)
    }

    async fn search(&self, query: &str, page: Page) -> Result<Vec<Space>, RepositoryError> {
        let rows = sqlx::query_as::<_, SpaceRow>(&format!(
            r"SELECT {COLUMNS} FROM spaces
              WHERE status = 1
                AND (name LIKE ?1 ESCAPE '\' OR space_type LIKE ?1 ESCAPE '\')
              ORDER BY id LIMIT ?2 OFFSET ?3"
        ))
        .bind(like_pattern(query))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        rows_to_spaces(rows)
    }

    async fn update(&self, space: &Space) -> Result<Space, RepositoryError> {
        let row = sqlx::query_as::<_, SpaceRow>(&format!(
            "UPDATE spaces SET campus_id = ?, name = ?, space_type = ?, capacity = ?, updated_at = ?
             WHERE id = ? AND status = 1
             RETURNING {COLUMNS}"
        ))
        .bind(space.campus_id)
        .bind(&space.name)
        .bind(space.space_type.as_str())
        .bind(space.capacity)
        .bind(Utc::now())
        .bind(space.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .ok_or_else(|| not_found(ENTITY, space.id))?;
        row_to_space(row)
    }

    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE spaces SET status = 0, updated_at = ? WHERE id = ? AND status = 1")
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

//! `SQLite` implementation of the campus repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use acadmin_core::domain::{Campus, NewCampus, Page};
use acadmin_core::ports::{CampusRepository, RepositoryError};

use super::row_mappers::{like_pattern, map_sqlx_error, not_found};

const ENTITY: &str = "campus";
const COLUMNS: &str = "id, name, address, city, phone, status, created_at, updated_at";

/// `SQLite` implementation of the campus repository.
pub struct SqliteCampusRepository {
    pool: SqlitePool,
}

impl SqliteCampusRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CampusRow {
    id: i64,
    name: String,
    address: String,
    city: String,
    phone: Option<String>,
    status: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CampusRow> for Campus {
    fn from(row: CampusRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            address: row.address,
            city: row.city,
            phone: row.phone,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CampusRepository for SqliteCampusRepository {
    async fn insert(&self, campus: &NewCampus) -> Result<Campus, RepositoryError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, CampusRow>(&format!(
            "INSERT INTO campuses (name, address, city, phone, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, 1, ?, ?)
             RETURNING {COLUMNS}"
        ))
        .bind(&campus.name)
        .bind(&campus.address)
        .bind(&campus.city)
        .bind(&campus.phone)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(row.into())
    }

    async fn get_by_id(&self, id: i64) -> Result<Campus, RepositoryError> {
        sqlx::query_as::<_, CampusRow>(&format!(
            "SELECT {COLUMNS} FROM campuses WHERE id = ? AND status = 1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .map(Campus::from)
        .ok_or_else(|| not_found(ENTITY, id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Campus>, RepositoryError> {
        let row = sqlx::query_as::<_, CampusRow>(&format!(
            "SELECT {COLUMNS} FROM campuses WHERE name = ? COLLATE NOCASE AND status = 1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(row.map(Campus::from))
    }

    async fn list(&self, page: Page) -> Result<Vec<Campus>, RepositoryError> {
        let rows = sqlx::query_as::<_, CampusRow>(&format!(
            "SELECT {COLUMNS} FROM campuses WHERE status = 1 ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(rows.into_iter().map(Campus::from).collect())
    }

    async fn search(&self, query: &str, page: Page) -> Result<Vec<Campus>, RepositoryError> {
        let rows = sqlx::query_as::<_, CampusRow>(&format!(
            r"SELECT {COLUMNS} FROM campuses
              WHERE status = 1
                AND (name LIKE ?1 ESCAPE '\' OR address LIKE ?1 ESCAPE '\'
                     OR city LIKE ?1 ESCAPE '\')
              ORDER BY id LIMIT ?2 OFFSET ?3"
        ))
        .bind(like_pattern(query))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(rows.into_iter().map(Campus::from).collect())
    }

    async fn update(&self, campus: &Campus) -> Result<Campus, RepositoryError> {
        sqlx::query_as::<_, CampusRow>(&format!(
            "UPDATE campuses SET name = ?, address = ?, city = ?, phone = ?, updated_at = ?
             WHERE id = ? AND status = 1
             RETURNING {COLUMNS}"
        ))
        .bind(&campus.name)
        .bind(&campus.address)
        .bind(&campus.city)
        .bind(&campus.phone)
        .bind(Utc::now())
        .bind(campus.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .map(Campus::from)
        .ok_or_else(|| not_found(ENTITY, campus.id))
    }

    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE campuses SET status = 0, updated_at = ? WHERE id = ? AND status = 1",
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

//! `SQLite` implementation of the user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use acadmin_core::domain::{NewUser, Page, User};
use acadmin_core::ports::{RepositoryError, UserRepository};

use super::row_mappers::{like_pattern, map_sqlx_error, not_found};

const ENTITY: &str = "user";
const COLUMNS: &str = "id, first_name, last_name, email, document_number, phone, role_id, \
                       salary_id, status, created_at, updated_at";

/// `SQLite` implementation of the user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, value: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {COLUMNS} FROM users WHERE {filter} AND status = 1"
        ))
        .bind(value)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(row.map(User::from))
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    first_name: String,
    last_name: String,
    email: String,
    document_number: String,
    phone: Option<String>,
    role_id: i64,
    salary_id: Option<i64>,
    status: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            document_number: row.document_number,
            phone: row.phone,
            role_id: row.role_id,
            salary_id: row.salary_id,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (first_name, last_name, email, document_number, phone, role_id,
                                salary_id, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, 1, ?, ?)
             RETURNING {COLUMNS}"
        ))
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.document_number)
        .bind(&user.phone)
        .bind(user.role_id)
        .bind(user.salary_id)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(row.into())
    }

    async fn get_by_id(&self, id: i64) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {COLUMNS} FROM users WHERE id = ? AND status = 1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .map(User::from)
        .ok_or_else(|| not_found(ENTITY, id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        self.find_one("email = ? COLLATE NOCASE", email).await
    }

    async fn find_by_document_number(
        &self,
        document_number: &str,
    ) -> Result<Option<User>, RepositoryError> {
        self.find_one("document_number = ?", document_number).await
    }

    async fn list(&self, page: Page) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {COLUMNS} FROM users WHERE status = 1 ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn search(&self, query: &str, page: Page) -> Result<Vec<User>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r"SELECT {COLUMNS} FROM users
              WHERE status = 1
                AND (first_name LIKE ?1 ESCAPE '\' OR last_name LIKE ?1 ESCAPE '\'
                     OR email LIKE ?1 ESCAPE '\' OR document_number LIKE ?1 ESCAPE '\')
              ORDER BY id LIMIT ?2 OFFSET ?3"
        ))
        .bind(like_pattern(query))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "UPDATE users SET first_name = ?, last_name = ?, email = ?, document_number = ?,
                              phone = ?, role_id = ?, salary_id = ?, updated_at = ?
             WHERE id = ? AND status = 1
             RETURNING {COLUMNS}"
        ))
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.document_number)
        .bind(&user.phone)
        .bind(user.role_id)
        .bind(user.salary_id)
        .bind(Utc::now())
        .bind(user.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .map(User::from)
        .ok_or_else(|| not_found(ENTITY, user.id))
    }

    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE users SET status = 0, updated_at = ? WHERE id = ? AND status = 1")
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

//! `SQLite` implementation of the role repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use acadmin_core::domain::{NewRole, Page, Role};
use acadmin_core::ports::{RepositoryError, RoleRepository};

use super::row_mappers::{like_pattern, map_sqlx_error, not_found};

const ENTITY: &str = "role";
const COLUMNS: &str = "id, name, description, status, created_at, updated_at";

/// `SQLite` implementation of the role repository.
pub struct SqliteRoleRepository {
    pool: SqlitePool,
}

impl SqliteRoleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: i64,
    name: String,
    description: Option<String>,
    status: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl RoleRepository for SqliteRoleRepository {
    async fn insert(&self, role: &NewRole) -> Result<Role, RepositoryError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, RoleRow>(&format!(
            "INSERT INTO roles (name, description, status, created_at, updated_at)
             VALUES (?, ?, 1, ?, ?)
             RETURNING {COLUMNS}"
        ))
        .bind(&role.name)
        .bind(&role.description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(row.into())
    }

    async fn get_by_id(&self, id: i64) -> Result<Role, RepositoryError> {
        sqlx::query_as::<_, RoleRow>(&format!(
            "SELECT {COLUMNS} FROM roles WHERE id = ? AND status = 1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .map(Role::from)
        .ok_or_else(|| not_found(ENTITY, id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepositoryError> {
        let row = sqlx::query_as::<_, RoleRow>(&format!(
            "SELECT {COLUMNS} FROM roles WHERE name = ? COLLATE NOCASE AND status = 1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(row.map(Role::from))
    }

    async fn list(&self, page: Page) -> Result<Vec<Role>, RepositoryError> {
        let rows = sqlx::query_as::<_, RoleRow>(&format!(
            "SELECT {COLUMNS} FROM roles WHERE status = 1 ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn search(&self, query: &str, page: Page) -> Result<Vec<Role>, RepositoryError> {
        let pattern = like_pattern(query);
        let rows = sqlx::query_as::<_, RoleRow>(&format!(
            r"SELECT {COLUMNS} FROM roles
              WHERE status = 1
                AND (name LIKE ?1 ESCAPE '\' OR description LIKE ?1 ESCAPE '\')
              ORDER BY id LIMIT ?2 OFFSET ?3"
        ))
        .bind(&pattern)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(rows.into_iter().map(Role::from).collect())
    }

    async fn update(&self, role: &Role) -> Result<Role, RepositoryError> {
        sqlx::query_as::<_, RoleRow>(&format!(
            "UPDATE roles SET name = ?, description = ?, updated_at = ?
             WHERE id = ? AND status = 1
             RETURNING {COLUMNS}"
        ))
        .bind(&role.name)
        .bind(&role.description)
        .bind(Utc::now())
        .bind(role.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .map(Role::from)
        .ok_or_else(|| not_found(ENTITY, role.id))
    }

    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE roles SET status = 0, updated_at = ? WHERE id = ? AND status = 1")
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_test_database;

    async fn repo() -> SqliteRoleRepository {
        SqliteRoleRepository::new(setup_test_database().await.unwrap())
    }

    fn new_role(name: &str) -> NewRole {
        NewRole {
            name: name.to_string(),
            description: Some(format!("{name} role")),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = repo().await;
        let role = repo.insert(&new_role("Teacher")).await.unwrap();

        assert!(role.id > 0);
        assert!(role.status);
        let fetched = repo.get_by_id(role.id).await.unwrap();
        assert_eq!(fetched.name, "Teacher");
        assert_eq!(fetched.description.as_deref(), Some("Teacher role"));
    }

    #[tokio::test]
    async fn test_unique_name_among_active_rows() {
        let repo = repo().await;
        let role = repo.insert(&new_role("Teacher")).await.unwrap();

        let err = repo.insert(&new_role("TEACHER")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::AlreadyExists(_)));

        repo.deactivate(role.id).await.unwrap();
        let again = repo.insert(&new_role("Teacher")).await.unwrap();
        assert_ne!(again.id, role.id);
    }

    #[tokio::test]
    async fn test_find_by_name_is_case_insensitive() {
        let repo = repo().await;
        repo.insert(&new_role("Administrator")).await.unwrap();

        assert!(repo.find_by_name("administrator").await.unwrap().is_some());
        assert!(repo.find_by_name("admin").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deactivated_role_is_invisible() {
        let repo = repo().await;
        let role = repo.insert(&new_role("Teacher")).await.unwrap();
        repo.deactivate(role.id).await.unwrap();

        assert!(matches!(
            repo.get_by_id(role.id).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(repo.list(Page::default()).await.unwrap().is_empty());
        assert!(
            repo.search("teach", Page::default())
                .await
                .unwrap()
                .is_empty()
        );
        assert!(matches!(
            repo.update(&role).await,
            Err(RepositoryError::NotFound(_))
        ));
        assert!(matches!(
            repo.deactivate(role.id).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_returns_stored_row() {
        let repo = repo().await;
        let mut role = repo.insert(&new_role("Teacher")).await.unwrap();
        role.description = None;
        role.name = "Lecturer".to_string();

        let updated = repo.update(&role).await.unwrap();
        assert_eq!(updated.name, "Lecturer");
        assert_eq!(updated.description, None);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_list_pagination_and_search() {
        let repo = repo().await;
        for name in ["Teacher", "Administrator", "Student", "Teaching assistant"] {
            repo.insert(&new_role(name)).await.unwrap();
        }

        let first = repo.list(Page::new(0, 2).unwrap()).await.unwrap();
        let rest = repo.list(Page::new(2, 10).unwrap()).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(rest.len(), 2);
        assert_eq!(first[0].name, "Teacher");

        let found = repo.search("TEACH", Page::default()).await.unwrap();
        assert_eq!(found.len(), 2);
        assert!(repo.search("%", Page::default()).await.unwrap().is_empty());
    }
}

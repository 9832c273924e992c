//! `SQLite` implementation of the salary repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use acadmin_core::domain::{NewSalary, Page, Salary};
use acadmin_core::ports::{RepositoryError, SalaryRepository};

use super::row_mappers::{like_pattern, map_sqlx_error, not_found};

const ENTITY: &str = "salary";
const COLUMNS: &str = "id, name, amount, currency, description, status, created_at, updated_at";

/// `SQLite` implementation of the salary repository.
pub struct SqliteSalaryRepository {
    pool: SqlitePool,
}

impl SqliteSalaryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SalaryRow {
    id: i64,
    name: String,
    amount: f64,
    currency: String,
    description: Option<String>,
    status: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SalaryRow> for Salary {
    fn from(row: SalaryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            amount: row.amount,
            currency: row.currency,
            description: row.description,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SalaryRepository for SqliteSalaryRepository {
    async fn insert(&self, salary: &NewSalary) -> Result<Salary, RepositoryError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, SalaryRow>(&format!(
            "INSERT INTO salaries (name, amount, currency, description, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, 1, ?, ?)
             RETURNING {COLUMNS}"
        ))
        .bind(&salary.name)
        .bind(salary.amount)
        .bind(&salary.currency)
        .bind(&salary.description)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(row.into())
    }

    async fn get_by_id(&self, id: i64) -> Result<Salary, RepositoryError> {
        sqlx::query_as::<_, SalaryRow>(&format!(
            "SELECT {COLUMNS} FROM salaries WHERE id = ? AND status = 1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .map(Salary::from)
        .ok_or_else(|| not_found(ENTITY, id))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Salary>, RepositoryError> {
        let row = sqlx::query_as::<_, SalaryRow>(&format!(
            "SELECT {COLUMNS} FROM salaries WHERE name = ? COLLATE NOCASE AND status = 1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(row.map(Salary::from))
    }

    async fn list(&self, page: Page) -> Result<Vec<Salary>, RepositoryError> {
        let rows = sqlx::query_as::<_, SalaryRow>(&format!(
            "SELECT {COLUMNS} FROM salaries WHERE status = 1 ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(rows.into_iter().map(Salary::from).collect())
    }

    async fn search(&self, query: &str, page: Page) -> Result<Vec<Salary>, RepositoryError> {
        let rows = sqlx::query_as::<_, SalaryRow>(&format!(
            r"SELECT {COLUMNS} FROM salaries
              WHERE status = 1
                AND (name LIKE ?1 ESCAPE '\' OR currency LIKE ?1 ESCAPE '\'
                     OR description LIKE ?1 ESCAPE '\')
              ORDER BY id LIMIT ?2 OFFSET ?3"
        ))
        .bind(like_pattern(query))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(rows.into_iter().map(Salary::from).collect())
    }

    async fn update(&self, salary: &Salary) -> Result<Salary, RepositoryError> {
        sqlx::query_as::<_, SalaryRow>(&format!(
            "UPDATE salaries SET name = ?, amount = ?, currency = ?, description = ?, updated_at = ?
             WHERE id = ? AND status = 1
             RETURNING {COLUMNS}"
        ))
        .bind(&salary.name)
        .bind(salary.amount)
        .bind(&salary.currency)
        .bind(&salary.description)
        .bind(Utc::now())
        .bind(salary.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .map(Salary::from)
        .ok_or_else(|| not_found(ENTITY, salary.id))
    }

    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE salaries SET status = 0, updated_at = ? WHERE id = ? AND status = 1",
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

//! `SQLite` implementation of the evaluation repository.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use acadmin_core::domain::{Evaluation, NewEvaluation, Page};
use acadmin_core::ports::{EvaluationRepository, RepositoryError};

use super::row_mappers::{like_pattern, map_sqlx_error, not_found};

const ENTITY: &str = "evaluation";
const COLUMNS: &str = "id, class_id, name, description, evaluation_date, weight, status, \
                       created_at, updated_at";

/// `SQLite` implementation of the evaluation repository.
pub struct SqliteEvaluationRepository {
    pool: SqlitePool,
}

impl SqliteEvaluationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EvaluationRow {
    id: i64,
    class_id: i64,
    name: String,
    description: Option<String>,
    evaluation_date: NaiveDate,
    weight: f64,
    status: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<EvaluationRow> for Evaluation {
    fn from(row: EvaluationRow) -> Self {
        Self {
            id: row.id,
            class_id: row.class_id,
            name: row.name,
            description: row.description,
            evaluation_date: row.evaluation_date,
            weight: row.weight,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl EvaluationRepository for SqliteEvaluationRepository {
    async fn insert(&self, evaluation: &NewEvaluation) -> Result<Evaluation, RepositoryError> {
        let now = Utc::now();
        let row = sqlx::query_as::<_, EvaluationRow>(&format!(
            "INSERT INTO evaluations (class_id, name, description, evaluation_date, weight,
                                      status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, 1, ?, ?)
             RETURNING {COLUMNS}"
        ))
        .bind(evaluation.class_id)
        .bind(&evaluation.name)
        .bind(&evaluation.description)
        .bind(evaluation.evaluation_date)
        .bind(evaluation.weight)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(row.into())
    }

    async fn get_by_id(&self, id: i64) -> Result<Evaluation, RepositoryError> {
        let row = sqlx::query_as::<_, EvaluationRow>(&format!(
            "SELECT {COLUMNS} FROM evaluations WHERE id = ? AND status = 1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .ok_or_else(|| not_found(ENTITY, id))?;
        Ok(row.into())
    }

    async fn find_by_class_and_name(
        &self,
        class_id: i64,
        name: &str,
    ) -> Result<Option<Evaluation>, RepositoryError> {
        let row = sqlx::query_as::<_, EvaluationRow>(&format!(
            "SELECT {COLUMNS} FROM evaluations
             WHERE class_id = ? AND name = ? COLLATE NOCASE AND status = 1"
        ))
        .bind(class_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(row.map(Evaluation::from))
    }

    async fn list(&self, page: Page) -> Result<Vec<Evaluation>, RepositoryError> {
        let rows = sqlx::query_as::<_, EvaluationRow>(&format!(
            "SELECT {COLUMNS} FROM evaluations WHERE status = 1 ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(rows.into_iter().map(Evaluation::from).collect())
    }

    async fn list_by_class(
        &self,
        class_id: i64,
        page: Page,
    ) -> Result<Vec<Evaluation>, RepositoryError> {
        let rows = sqlx::query_as::<_, EvaluationRow>(&format!(
            "SELECT {COLUMNS} FROM evaluations
             WHERE class_id = ? AND status = 1
             ORDER BY evaluation_date, id LIMIT ? OFFSET ?"
        ))
        .bind(class_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?;
        Ok(rows.into_iter().map(Evaluation::from).collect())
    }

    async fn search(&self, query: &str, page: Page) -> Result<Vec<Evaluation>, RepositoryError> {
        let rows = sqlx::query_as::<_, EvaluationRow>(&format!(
            r"SELECT {COLUMNS} FROM evaluations
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
        Ok(rows.into_iter().map(Evaluation::from).collect())
    }

    async fn update(&self, evaluation: &Evaluation) -> Result<Evaluation, RepositoryError> {
        let row = sqlx::query_as::<_, EvaluationRow>(&format!(
            "UPDATE evaluations
             SET class_id = ?, name = ?, description = ?, evaluation_date = ?, weight = ?,
                 updated_at = ?
             WHERE id = ? AND status = 1
             RETURNING {COLUMNS}"
        ))
        .bind(evaluation.class_id)
        .bind(&evaluation.name)
        .bind(&evaluation.description)
        .bind(evaluation.evaluation_date)
        .bind(evaluation.weight)
        .bind(Utc::now())
        .bind(evaluation.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(ENTITY, e))?
        .ok_or_else(|| not_found(ENTITY, evaluation.id))?;
        Ok(row.into())
    }

    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE evaluations SET status = 0, updated_at = ? WHERE id = ? AND status = 1",
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::SqliteClassRepository;
    use crate::repositories::test_fixtures::seed_class_deps;
    use crate::setup::setup_test_database;
    use acadmin_core::domain::NewClass;
    use acadmin_core::ports::ClassRepository;

    async fn setup() -> (SqliteEvaluationRepository, i64) {
        let pool = setup_test_database().await.unwrap();
        let deps = seed_class_deps(&pool).await;
        let class = SqliteClassRepository::new(pool.clone())
            .insert(&NewClass {
                name: "Physics".to_string(),
                description: None,
                teacher_id: deps.teacher_id,
                space_id: deps.space_id,
                schedule_id: deps.schedule_id,
            })
            .await
            .unwrap();
        (SqliteEvaluationRepository::new(pool), class.id)
    }

    fn new_evaluation(class_id: i64, name: &str, date: &str, weight: f64) -> NewEvaluation {
        NewEvaluation {
            class_id,
            name: name.to_string(),
            description: None,
            evaluation_date: date.parse().unwrap(),
            weight,
        }
    }

    #[tokio::test]
    async fn test_list_by_class_orders_by_date() {
        let (repo, class_id) = setup().await;
        repo.insert(&new_evaluation(class_id, "Final", "2026-12-01", 50.0))
            .await
            .unwrap();
        repo.insert(&new_evaluation(class_id, "Midterm", "2026-10-01", 30.0))
            .await
            .unwrap();

        let names: Vec<_> = repo
            .list_by_class(class_id, Page::default())
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Midterm", "Final"]);
    }

    #[tokio::test]
    async fn test_name_unique_within_class() {
        let (repo, class_id) = setup().await;
        repo.insert(&new_evaluation(class_id, "Quiz", "2026-09-01", 10.0))
            .await
            .unwrap();
        assert!(matches!(
            repo.insert(&new_evaluation(class_id, "QUIZ", "2026-09-08", 10.0))
                .await,
            Err(RepositoryError::AlreadyExists(_))
        ));
        assert!(
            repo.find_by_class_and_name(class_id, "quiz")
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_update_persists_fields() {
        let (repo, class_id) = setup().await;
        let mut evaluation = repo
            .insert(&new_evaluation(class_id, "Lab", "2026-09-15", 20.0))
            .await
            .unwrap();
        evaluation.weight = 25.5;
        evaluation.evaluation_date = "2026-09-22".parse().unwrap();

        let updated = repo.update(&evaluation).await.unwrap();
        assert!((updated.weight - 25.5).abs() < f64::EPSILON);
        assert_eq!(
            repo.get_by_id(evaluation.id).await.unwrap().evaluation_date,
            "2026-09-22".parse::<NaiveDate>().unwrap()
        );
    }

    #[tokio::test]
    async fn test_weight_out_of_range_hits_check_constraint() {
        let (repo, class_id) = setup().await;
        assert!(matches!(
            repo.insert(&new_evaluation(class_id, "Huge", "2026-09-15", 150.0))
                .await,
            Err(RepositoryError::Constraint(_))
        ));
    }
}

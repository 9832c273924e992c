//! Rows shared by repository tests that need a full reference chain.

use chrono::Utc;
use sqlx::SqlitePool;

/// Ids of a teacher, a space and a schedule slot, ready to hold a class.
pub(crate) struct ClassDeps {
    pub teacher_id: i64,
    pub space_id: i64,
    pub schedule_id: i64,
}

async fn insert(pool: &SqlitePool, sql: &str) -> i64 {
    sqlx::query(sql)
        .bind(Utc::now())
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

pub(crate) async fn seed_class_deps(pool: &SqlitePool) -> ClassDeps {
    let role_id = insert(
        pool,
        "INSERT INTO roles (name, status, created_at, updated_at) VALUES ('teacher', 1, ?1, ?1)",
    )
    .await;
    let teacher_id = insert(
        pool,
        &format!(
            "INSERT INTO users (first_name, last_name, email, document_number, role_id, status,
                                created_at, updated_at)
             VALUES ('Ada', 'Lovelace', 'ada@example.edu', 'DOC-1', {role_id}, 1, ?1, ?1)"
        ),
    )
    .await;
    let campus_id = insert(
        pool,
        "INSERT INTO campuses (name, address, city, status, created_at, updated_at)
         VALUES ('Main', 'Main St 1', 'Lima', 1, ?1, ?1)",
    )
    .await;
    let space_id = insert(
        pool,
        &format!(
            "INSERT INTO spaces (campus_id, name, space_type, capacity, status, created_at, updated_at)
             VALUES ({campus_id}, 'Room 101', 'classroom', 30, 1, ?1, ?1)"
        ),
    )
    .await;
    let schedule_id = insert(
        pool,
        "INSERT INTO schedules (day_of_week, start_time, end_time, status, created_at, updated_at)
         VALUES ('monday', '08:00:00', '10:00:00', 1, ?1, ?1)",
    )
    .await;
    ClassDeps {
        teacher_id,
        space_id,
        schedule_id,
    }
}

//! Database setup and initialization.
//!
//! This module provides the `setup_database()` function for initializing
//! the `SQLite` database with full schema. Entry points call this with the
//! configured `DATABASE_URL`.

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

/// Sets up the `SQLite` database connection and ensures the schema exists.
///
/// This function:
/// 1. Parses the `sqlite://` connection URL
/// 2. Creates the parent directory and database file if they don't exist
/// 3. Enables foreign key enforcement
/// 4. Creates all tables and indexes
///
/// # Errors
///
/// Returns an error if the URL is malformed, the file cannot be opened or
/// created, or schema creation fails.
///
/// # Example
///
/// ```rust,no_run
/// use acadmin_db::setup_database;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = setup_database("sqlite://data/acadmin.db").await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("invalid database URL: {database_url}"))?
        .create_if_missing(true)
        .foreign_keys(true);

    if let Some(parent) = options.get_filename().parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    let pool = SqlitePool::connect_with(options).await?;
    create_schema(&pool).await?;

    tracing::info!(url = %database_url, "database ready");
    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// The pool holds a single connection: every in-memory connection is a
/// separate database, so a second connection would see an empty schema.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    create_schema(&pool).await?;
    Ok(pool)
}

/// Table definitions. Order matters: referenced tables come first.
const TABLES: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS roles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT,
        status INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS salaries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        amount REAL NOT NULL CHECK (amount >= 0),
        currency TEXT NOT NULL CHECK (length(currency) = 3),
        description TEXT,
        status INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL,
        document_number TEXT NOT NULL,
        phone TEXT,
        role_id INTEGER NOT NULL REFERENCES roles(id),
        salary_id INTEGER REFERENCES salaries(id),
        status INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS campuses (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        address TEXT NOT NULL,
        city TEXT NOT NULL,
        phone TEXT,
        status INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS spaces (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        campus_id INTEGER NOT NULL REFERENCES campuses(id),
        name TEXT NOT NULL,
        space_type TEXT NOT NULL
            CHECK (space_type IN ('classroom', 'laboratory', 'auditorium', 'office', 'other')),
        capacity INTEGER NOT NULL CHECK (capacity > 0),
        status INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS schedules (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        day_of_week TEXT NOT NULL
            CHECK (day_of_week IN ('monday', 'tuesday', 'wednesday', 'thursday', 'friday', 'saturday', 'sunday')),
        start_time TEXT NOT NULL,
        end_time TEXT NOT NULL,
        status INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        CHECK (start_time < end_time)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS classes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT,
        teacher_id INTEGER NOT NULL REFERENCES users(id),
        space_id INTEGER NOT NULL REFERENCES spaces(id),
        schedule_id INTEGER NOT NULL REFERENCES schedules(id),
        status INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS evaluations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        class_id INTEGER NOT NULL REFERENCES classes(id),
        name TEXT NOT NULL,
        description TEXT,
        evaluation_date TEXT NOT NULL,
        weight REAL NOT NULL CHECK (weight > 0 AND weight <= 100),
        status INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    ",
];

/// Unique keys only bind active rows; lookup indexes back the list filters.
const INDEXES: &[&str] = &[
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_roles_name ON roles(name COLLATE NOCASE) WHERE status = 1",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_salaries_name ON salaries(name COLLATE NOCASE) WHERE status = 1",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_users_email ON users(email COLLATE NOCASE) WHERE status = 1",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_users_document ON users(document_number) WHERE status = 1",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_campuses_name ON campuses(name COLLATE NOCASE) WHERE status = 1",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_spaces_campus_name ON spaces(campus_id, name COLLATE NOCASE) WHERE status = 1",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_schedules_slot ON schedules(day_of_week, start_time, end_time) WHERE status = 1",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_classes_space_slot ON classes(space_id, schedule_id) WHERE status = 1",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_classes_teacher_slot ON classes(teacher_id, schedule_id) WHERE status = 1",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_evaluations_class_name ON evaluations(class_id, name COLLATE NOCASE) WHERE status = 1",
    "CREATE INDEX IF NOT EXISTS idx_users_role ON users(role_id)",
    "CREATE INDEX IF NOT EXISTS idx_spaces_campus ON spaces(campus_id)",
    "CREATE INDEX IF NOT EXISTS idx_classes_teacher ON classes(teacher_id)",
    "CREATE INDEX IF NOT EXISTS idx_evaluations_class ON evaluations(class_id)",
];

/// Creates the complete database schema.
///
/// Safe to call multiple times as all statements use IF NOT EXISTS.
async fn create_schema(pool: &SqlitePool) -> Result<()> {
    for statement in TABLES.iter().chain(INDEXES) {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod row_mappers;
mod sqlite_campus_repository;
mod sqlite_class_repository;
mod sqlite_evaluation_repository;
mod sqlite_role_repository;
mod sqlite_salary_repository;
mod sqlite_schedule_repository;
mod sqlite_space_repository;
mod sqlite_user_repository;

#[cfg(test)]
mod test_fixtures;

pub use sqlite_campus_repository::SqliteCampusRepository;
pub use sqlite_class_repository::SqliteClassRepository;
pub use sqlite_evaluation_repository::SqliteEvaluationRepository;
pub use sqlite_role_repository::SqliteRoleRepository;
pub use sqlite_salary_repository::SqliteSalaryRepository;
pub use sqlite_schedule_repository::SqliteScheduleRepository;
pub use sqlite_space_repository::SqliteSpaceRepository;
pub use sqlite_user_repository::SqliteUserRepository;

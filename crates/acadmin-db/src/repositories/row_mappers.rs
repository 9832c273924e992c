//! Shared helpers for `SQLite` queries and row mapping.

use acadmin_core::RepositoryError;

/// Map `SQLx` errors to `RepositoryError`.
///
/// Unique-index hits become `AlreadyExists`, foreign key and CHECK failures
/// become `Constraint`; everything else is `Storage`.
pub fn map_sqlx_error(entity: &str, e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::AlreadyExists(format!("{entity}: {}", db.message()))
        }
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => RepositoryError::Constraint(
            format!("{entity} references a record that does not exist"),
        ),
        sqlx::Error::Database(db) if db.is_check_violation() => {
            RepositoryError::Constraint(format!("{entity}: {}", db.message()))
        }
        sqlx::Error::RowNotFound => RepositoryError::NotFound(entity.to_string()),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            RepositoryError::Serialization(e.to_string())
        }
        _ => RepositoryError::Storage(e.to_string()),
    }
}

/// `NotFound` for an id that is missing or soft-deleted.
pub fn not_found(entity: &str, id: i64) -> RepositoryError {
    RepositoryError::NotFound(format!("{entity} id={id}"))
}

/// Build a `LIKE` pattern matching `term` anywhere, escaping wildcards.
///
/// Queries using it must declare `ESCAPE '\'`.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

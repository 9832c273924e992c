//! Helpers shared by the entity services.

use std::sync::Arc;

use serde::Serialize;

use crate::events::{EventAction, EventEnvelope};
use crate::ports::{CoreError, EventPublisherPort, RepositoryError};

/// Best-effort publisher used after successful writes.
///
/// Failures are logged and swallowed: a write that reached the database is
/// never reported as failed because the broker hiccuped.
#[derive(Clone)]
pub(crate) struct EventSink {
    publisher: Arc<dyn EventPublisherPort>,
}

impl EventSink {
    pub(crate) fn new(publisher: Arc<dyn EventPublisherPort>) -> Self {
        Self { publisher }
    }

    pub(crate) async fn emit<T: Serialize + Sync>(
        &self,
        entity: &str,
        action: EventAction,
        body: &T,
    ) {
        let event_type = action.event_type(entity);
        let payload = match serde_json::to_value(body) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(entity, event_type = %event_type, error = %e, "failed to encode event payload");
                return;
            }
        };
        let envelope = EventEnvelope::builder(event_type).payload(payload).build();
        if let Err(e) = self.publisher.publish(&envelope).await {
            tracing::warn!(
                entity,
                event_type = %envelope.event_type,
                event_id = %envelope.event_id,
                error = %e,
                "failed to publish event"
            );
        }
    }

    pub(crate) async fn deleted(&self, entity: &str, id: i64) {
        self.emit(entity, EventAction::Deleted, &serde_json::json!({ "id": id }))
            .await;
    }
}

/// Repository `NotFound` for the entity being addressed becomes a 404.
pub(crate) fn not_found(err: RepositoryError, entity: &str, id: i64) -> CoreError {
    CoreError::from(err).not_found_as(entity, id)
}

/// A referenced entity that is missing or inactive is bad input, not a 404.
pub(crate) fn invalid_reference(err: RepositoryError, field: &str, id: i64) -> CoreError {
    match err {
        RepositoryError::NotFound(_) => CoreError::Validation(format!(
            "{field} {id} does not reference an active record"
        )),
        other => CoreError::from(other),
    }
}

/// Translate storage-level write failures into semantic errors.
///
/// `AlreadyExists` is the unique index catching a race with a concurrent
/// writer; `Constraint` is a foreign key the pre-checks didn't cover.
pub(crate) fn write_error(err: RepositoryError, entity: &str, id: Option<i64>) -> CoreError {
    match err {
        RepositoryError::AlreadyExists(msg) => CoreError::Conflict(msg),
        RepositoryError::Constraint(msg) => CoreError::Validation(msg),
        RepositoryError::NotFound(msg) => match id {
            Some(id) => CoreError::NotFound(format!("{entity} {id} not found")),
            None => CoreError::NotFound(msg),
        },
        other => CoreError::from(other),
    }
}

/// Whether a reference must be checked: always on create (`previous` is
/// `None`), and on update only when the id changed. Rows keep pointing at a
/// referenced record that was deactivated after they were written.
pub(crate) fn reference_changed<T: PartialEq>(previous: Option<T>, next: T) -> bool {
    previous.is_none_or(|p| p != next)
}

/// Fail with `Conflict` when an active row other than `exclude` holds the key.
pub(crate) fn ensure_free(
    holder: Option<i64>,
    exclude: Option<i64>,
    message: impl FnOnce() -> String,
) -> Result<(), CoreError> {
    match holder {
        Some(holder) if Some(holder) != exclude => Err(CoreError::Conflict(message())),
        _ => Ok(()),
    }
}

/// Trimmed, non-empty search term.
pub(crate) fn search_term(query: &str) -> Result<&str, CoreError> {
    let term = query.trim();
    if term.is_empty() {
        return Err(CoreError::Validation(
            "search query must not be empty".to_string(),
        ));
    }
    Ok(term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_free_ignores_self() {
        assert!(ensure_free(None, None, || "taken".into()).is_ok());
        assert!(ensure_free(Some(4), Some(4), || "taken".into()).is_ok());
        assert!(matches!(
            ensure_free(Some(4), Some(5), || "taken".into()),
            Err(CoreError::Conflict(msg)) if msg == "taken"
        ));
        assert!(ensure_free(Some(4), None, || "taken".into()).is_err());
    }

    #[test]
    fn test_write_error_mapping() {
        assert!(matches!(
            write_error(RepositoryError::AlreadyExists("x".into()), "role", None),
            CoreError::Conflict(_)
        ));
        assert!(matches!(
            write_error(RepositoryError::Constraint("fk".into()), "user", None),
            CoreError::Validation(_)
        ));
        assert!(matches!(
            write_error(RepositoryError::NotFound("x".into()), "role", Some(3)),
            CoreError::NotFound(msg) if msg == "role 3 not found"
        ));
        assert!(matches!(
            write_error(RepositoryError::Storage("disk".into()), "role", Some(3)),
            CoreError::Repository(RepositoryError::Storage(_))
        ));
    }

    #[test]
    fn test_invalid_reference_is_validation() {
        assert!(matches!(
            invalid_reference(RepositoryError::NotFound("x".into()), "role_id", 9),
            CoreError::Validation(msg) if msg.contains("role_id 9")
        ));
    }

    #[test]
    fn test_reference_changed() {
        assert!(reference_changed(None, 3));
        assert!(reference_changed(Some(2), 3));
        assert!(!reference_changed(Some(3), 3));
    }

    #[test]
    fn test_search_term() {
        assert_eq!(search_term("  math ").unwrap(), "math");
        assert!(search_term("   ").is_err());
    }
}

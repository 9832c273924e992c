//! Evaluation service - CRUD with `(class_id, name)` uniqueness and class
//! reference checks.

use std::sync::Arc;

use super::common::{
    EventSink, ensure_free, invalid_reference, not_found, reference_changed, search_term,
    write_error,
};
use crate::domain::{Evaluation, EvaluationUpdate, NewEvaluation, Page};
use crate::events::EventAction;
use crate::ports::{ClassRepository, CoreError, EvaluationRepository, EventPublisherPort};

const ENTITY: &str = "evaluation";

/// Service for evaluation operations.
pub struct EvaluationService {
    repo: Arc<dyn EvaluationRepository>,
    classes: Arc<dyn ClassRepository>,
    events: EventSink,
}

impl EvaluationService {
    pub(crate) fn new(
        repo: Arc<dyn EvaluationRepository>,
        classes: Arc<dyn ClassRepository>,
        publisher: Arc<dyn EventPublisherPort>,
    ) -> Self {
        Self {
            repo,
            classes,
            events: EventSink::new(publisher),
        }
    }

    pub async fn create(&self, evaluation: NewEvaluation) -> Result<Evaluation, CoreError> {
        evaluation.validate()?;
        self.check_constraints(&evaluation, None).await?;

        let created = self
            .repo
            .insert(&evaluation)
            .await
            .map_err(|e| write_error(e, ENTITY, None))?;
        tracing::info!(entity = ENTITY, id = created.id, "created");
        self.events.emit(ENTITY, EventAction::Created, &created).await;
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> Result<Evaluation, CoreError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| not_found(e, ENTITY, id))
    }

    pub async fn list(&self, page: Page) -> Result<Vec<Evaluation>, CoreError> {
        Ok(self.repo.list(page).await?)
    }

    pub async fn search(&self, query: &str, page: Page) -> Result<Vec<Evaluation>, CoreError> {
        Ok(self.repo.search(search_term(query)?, page).await?)
    }

    pub async fn update(
        &self,
        id: i64,
        update: EvaluationUpdate,
    ) -> Result<Evaluation, CoreError> {
        let mut evaluation = self.get(id).await?;
        let previous = evaluation.clone();
        update.apply(&mut evaluation);
        let draft = evaluation.to_new();
        draft.validate()?;
        self.check_constraints(&draft, Some(&previous)).await?;

        let updated = self
            .repo
            .update(&evaluation)
            .await
            .map_err(|e| write_error(e, ENTITY, Some(id)))?;
        tracing::info!(entity = ENTITY, id, "updated");
        self.events.emit(ENTITY, EventAction::Updated, &updated).await;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), CoreError> {
        self.repo
            .deactivate(id)
            .await
            .map_err(|e| not_found(e, ENTITY, id))?;
        tracing::info!(entity = ENTITY, id, "deactivated");
        self.events.deleted(ENTITY, id).await;
        Ok(())
    }

    /// Uniqueness against active rows, plus every reference that is new or
    /// changed relative to `previous`.
    async fn check_constraints(
        &self,
        evaluation: &NewEvaluation,
        previous: Option<&Evaluation>,
    ) -> Result<(), CoreError> {
        let exclude = previous.map(|p| p.id);

        if reference_changed(previous.map(|p| p.class_id), evaluation.class_id) {
            self.classes
                .get_by_id(evaluation.class_id)
                .await
                .map_err(|e| invalid_reference(e, "class_id", evaluation.class_id))?;
        }

        let holder = self
            .repo
            .find_by_class_and_name(evaluation.class_id, &evaluation.name)
            .await?
            .map(|e| e.id);
        ensure_free(holder, exclude, || {
            format!(
                "class {} already has an evaluation named '{}'",
                evaluation.class_id, evaluation.name
            )
        })
    }
}

//! User service - CRUD with email/document uniqueness and role/salary
//! reference checks.

use std::sync::Arc;

use super::common::{
    EventSink, ensure_free, invalid_reference, not_found, reference_changed, search_term,
    write_error,
};
use crate::domain::{Class, NewUser, Page, User, UserUpdate};
use crate::events::EventAction;
use crate::ports::{
    ClassRepository, CoreError, EventPublisherPort, RoleRepository, SalaryRepository,
    UserRepository,
};

const ENTITY: &str = "user";

/// Service for user operations.
pub struct UserService {
    repo: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    salaries: Arc<dyn SalaryRepository>,
    classes: Arc<dyn ClassRepository>,
    events: EventSink,
}

impl UserService {
    pub(crate) fn new(
        repo: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        salaries: Arc<dyn SalaryRepository>,
        classes: Arc<dyn ClassRepository>,
        publisher: Arc<dyn EventPublisherPort>,
    ) -> Self {
        Self {
            repo,
            roles,
            salaries,
            classes,
            events: EventSink::new(publisher),
        }
    }

    pub async fn create(&self, user: NewUser) -> Result<User, CoreError> {
        user.validate()?;
        self.check_constraints(&user, None).await?;

        let created = self
            .repo
            .insert(&user)
            .await
            .map_err(|e| write_error(e, ENTITY, None))?;
        tracing::info!(entity = ENTITY, id = created.id, "created");
        self.events.emit(ENTITY, EventAction::Created, &created).await;
        Ok(created)
    }

    pub async fn get(&self, id: i64) -> Result<User, CoreError> {
        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| not_found(e, ENTITY, id))
    }

    pub async fn list(&self, page: Page) -> Result<Vec<User>, CoreError> {
        Ok(self.repo.list(page).await?)
    }

    pub async fn search(&self, query: &str, page: Page) -> Result<Vec<User>, CoreError> {
        Ok(self.repo.search(search_term(query)?, page).await?)
    }

    /// Active classes taught by an active user.
    pub async fn classes(&self, id: i64, page: Page) -> Result<Vec<Class>, CoreError> {
        self.get(id).await?;
        Ok(self.classes.list_by_teacher(id, page).await?)
    }

    pub async fn update(&self, id: i64, update: UserUpdate) -> Result<User, CoreError> {
        let mut user = self.get(id).await?;
        let previous = user.clone();
        update.apply(&mut user);
        let draft = user.to_new();
        draft.validate()?;
        self.check_constraints(&draft, Some(&previous)).await?;

        let updated = self
            .repo
            .update(&user)
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
        user: &NewUser,
        previous: Option<&User>,
    ) -> Result<(), CoreError> {
        let exclude = previous.map(|p| p.id);

        let holder = self.repo.find_by_email(&user.email).await?.map(|u| u.id);
        ensure_free(holder, exclude, || {
            format!("a user with email '{}' already exists", user.email)
        })?;

        let holder = self
            .repo
            .find_by_document_number(&user.document_number)
            .await?
            .map(|u| u.id);
        ensure_free(holder, exclude, || {
            format!(
                "a user with document number '{}' already exists",
                user.document_number
            )
        })?;

        if reference_changed(previous.map(|p| p.role_id), user.role_id) {
            self.roles
                .get_by_id(user.role_id)
                .await
                .map_err(|e| invalid_reference(e, "role_id", user.role_id))?;
        }

        if let Some(salary_id) = user.salary_id {
            if reference_changed(previous.and_then(|p| p.salary_id), salary_id) {
                self.salaries
                    .get_by_id(salary_id)
                    .await
                    .map_err(|e| invalid_reference(e, "salary_id", salary_id))?;
            }
        }
        Ok(())
    }
}

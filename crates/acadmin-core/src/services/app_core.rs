//! `AppCore` - the primary application facade.
//!
//! This is the composition root for core services. Adapters receive an
//! `AppCore` instance and use it to access all functionality.

use std::sync::Arc;

use crate::ports::{EventPublisherPort, Repos};

use super::{
    CampusService, ClassService, EvaluationService, RoleService, SalaryService, ScheduleService,
    SpaceService, UserService,
};

/// The core application facade.
///
/// # Example
///
/// ```ignore
/// let repos = CoreFactory::build_repos(pool);
/// let core = AppCore::new(repos, Arc::new(NoopEventPublisher::new()));
///
/// let roles = core.roles().list(Page::default()).await?;
/// ```
pub struct AppCore {
    roles: RoleService,
    salaries: SalaryService,
    users: UserService,
    campuses: CampusService,
    spaces: SpaceService,
    schedules: ScheduleService,
    classes: ClassService,
    evaluations: EvaluationService,
}

impl AppCore {
    /// Wire every service against the given repositories and event publisher.
    pub fn new(repos: Repos, publisher: Arc<dyn EventPublisherPort>) -> Self {
        Self {
            roles: RoleService::new(repos.roles.clone(), publisher.clone()),
            salaries: SalaryService::new(repos.salaries.clone(), publisher.clone()),
            users: UserService::new(
                repos.users.clone(),
                repos.roles.clone(),
                repos.salaries.clone(),
                repos.classes.clone(),
                publisher.clone(),
            ),
            campuses: CampusService::new(
                repos.campuses.clone(),
                repos.spaces.clone(),
                publisher.clone(),
            ),
            spaces: SpaceService::new(
                repos.spaces.clone(),
                repos.campuses.clone(),
                publisher.clone(),
            ),
            schedules: ScheduleService::new(repos.schedules.clone(), publisher.clone()),
            classes: ClassService::new(
                repos.classes.clone(),
                repos.users.clone(),
                repos.spaces.clone(),
                repos.schedules.clone(),
                repos.evaluations.clone(),
                publisher.clone(),
            ),
            evaluations: EvaluationService::new(repos.evaluations, repos.classes, publisher),
        }
    }

    pub const fn roles(&self) -> &RoleService {
        &self.roles
    }

    pub const fn salaries(&self) -> &SalaryService {
        &self.salaries
    }

    pub const fn users(&self) -> &UserService {
        &self.users
    }

    pub const fn campuses(&self) -> &CampusService {
        &self.campuses
    }

    pub const fn spaces(&self) -> &SpaceService {
        &self.spaces
    }

    pub const fn schedules(&self) -> &ScheduleService {
        &self.schedules
    }

    pub const fn classes(&self) -> &ClassService {
        &self.classes
    }

    pub const fn evaluations(&self) -> &EvaluationService {
        &self.evaluations
    }
}

//! In-memory repositories and a recording publisher for service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveTime, Utc};

use crate::domain::{
    Campus, Class, DayOfWeek, Evaluation, NewCampus, NewClass, NewEvaluation, NewRole, NewSalary,
    NewSchedule, NewSpace, NewUser, Page, Role, Salary, Schedule, Space, User,
};
use crate::events::EventEnvelope;
use crate::ports::{
    CampusRepository, ClassRepository, EvaluationRepository, EventPublisherPort, PublishError,
    Repos, RepositoryError, RoleRepository, SalaryRepository, ScheduleRepository,
    SpaceRepository, UserRepository,
};

pub(crate) trait Row: Clone {
    fn id(&self) -> i64;
    fn active(&self) -> bool;
    fn deactivate(&mut self);
    fn matches(&self, term: &str) -> bool;
}

fn contains(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(&term.to_lowercase())
}

/// A `Mutex<Vec<T>>` table with soft-delete semantics.
pub(crate) struct Table<T> {
    rows: Mutex<Vec<T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Row> Table<T> {
    fn push(&self, build: impl FnOnce(i64) -> T) -> T {
        let mut rows = self.rows.lock().unwrap();
        let row = build(i64::try_from(rows.len()).unwrap() + 1);
        rows.push(row.clone());
        row
    }

    fn get(&self, id: i64) -> Result<T, RepositoryError> {
        self.find(|r| r.id() == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("id={id}")))
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.active() && pred(r))
            .cloned()
    }

    fn select(&self, pred: impl Fn(&T) -> bool, page: Page) -> Vec<T> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.active() && pred(r))
            .skip(page.skip as usize)
            .take(page.limit as usize)
            .cloned()
            .collect()
    }

    fn replace(&self, row: &T) -> Result<T, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|r| r.active() && r.id() == row.id())
            .ok_or_else(|| RepositoryError::NotFound(format!("id={}", row.id())))?;
        *slot = row.clone();
        Ok(row.clone())
    }

    fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|r| r.active() && r.id() == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("id={id}")))?;
        slot.deactivate();
        Ok(())
    }
}

macro_rules! soft_delete_row {
    ($ty:ty, |$row:ident, $term:ident| $matches:expr) => {
        impl Row for $ty {
            fn id(&self) -> i64 {
                self.id
            }
            fn active(&self) -> bool {
                self.status
            }
            fn deactivate(&mut self) {
                self.status = false;
            }
            fn matches(&self, $term: &str) -> bool {
                let $row = self;
                $matches
            }
        }
    };
}

soft_delete_row!(Role, |r, t| contains(&r.name, t));
soft_delete_row!(Salary, |r, t| contains(&r.name, t));
soft_delete_row!(User, |r, t| contains(&r.first_name, t)
    || contains(&r.last_name, t)
    || contains(&r.email, t));
soft_delete_row!(Campus, |r, t| contains(&r.name, t) || contains(&r.city, t));
soft_delete_row!(Space, |r, t| contains(&r.name, t));
soft_delete_row!(Schedule, |r, t| contains(r.day_of_week.as_str(), t));
soft_delete_row!(Class, |r, t| contains(&r.name, t));
soft_delete_row!(Evaluation, |r, t| contains(&r.name, t));

#[derive(Default)]
pub(crate) struct MockRoleRepo(Table<Role>);

#[async_trait]
impl RoleRepository for MockRoleRepo {
    async fn insert(&self, role: &NewRole) -> Result<Role, RepositoryError> {
        let now = Utc::now();
        Ok(self.0.push(|id| Role {
            id,
            name: role.name.clone(),
            description: role.description.clone(),
            status: true,
            created_at: now,
            updated_at: now,
        }))
    }
    async fn get_by_id(&self, id: i64) -> Result<Role, RepositoryError> {
        self.0.get(id)
    }
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RepositoryError> {
        Ok(self.0.find(|r| r.name.eq_ignore_ascii_case(name)))
    }
    async fn list(&self, page: Page) -> Result<Vec<Role>, RepositoryError> {
        Ok(self.0.select(|_| true, page))
    }
    async fn search(&self, query: &str, page: Page) -> Result<Vec<Role>, RepositoryError> {
        Ok(self.0.select(|r| r.matches(query), page))
    }
    async fn update(&self, role: &Role) -> Result<Role, RepositoryError> {
        self.0.replace(role)
    }
    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        self.0.deactivate(id)
    }
}

#[derive(Default)]
pub(crate) struct MockSalaryRepo(Table<Salary>);

#[async_trait]
impl SalaryRepository for MockSalaryRepo {
    async fn insert(&self, salary: &NewSalary) -> Result<Salary, RepositoryError> {
        let now = Utc::now();
        Ok(self.0.push(|id| Salary {
            id,
            name: salary.name.clone(),
            amount: salary.amount,
            currency: salary.currency.clone(),
            description: salary.description.clone(),
            status: true,
            created_at: now,
            updated_at: now,
        }))
    }
    async fn get_by_id(&self, id: i64) -> Result<Salary, RepositoryError> {
        self.0.get(id)
    }
    async fn find_by_name(&self, name: &str) -> Result<Option<Salary>, RepositoryError> {
        Ok(self.0.find(|s| s.name.eq_ignore_ascii_case(name)))
    }
    async fn list(&self, page: Page) -> Result<Vec<Salary>, RepositoryError> {
        Ok(self.0.select(|_| true, page))
    }
    async fn search(&self, query: &str, page: Page) -> Result<Vec<Salary>, RepositoryError> {
        Ok(self.0.select(|s| s.matches(query), page))
    }
    async fn update(&self, salary: &Salary) -> Result<Salary, RepositoryError> {
        self.0.replace(salary)
    }
    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        self.0.deactivate(id)
    }
}

#[derive(Default)]
pub(crate) struct MockUserRepo(Table<User>);

#[async_trait]
impl UserRepository for MockUserRepo {
    async fn insert(&self, user: &NewUser) -> Result<User, RepositoryError> {
        let now = Utc::now();
        Ok(self.0.push(|id| User {
            id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            document_number: user.document_number.clone(),
            phone: user.phone.clone(),
            role_id: user.role_id,
            salary_id: user.salary_id,
            status: true,
            created_at: now,
            updated_at: now,
        }))
    }
    async fn get_by_id(&self, id: i64) -> Result<User, RepositoryError> {
        self.0.get(id)
    }
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.0.find(|u| u.email.eq_ignore_ascii_case(email)))
    }
    async fn find_by_document_number(
        &self,
        document_number: &str,
    ) -> Result<Option<User>, RepositoryError> {
        Ok(self.0.find(|u| u.document_number == document_number))
    }
    async fn list(&self, page: Page) -> Result<Vec<User>, RepositoryError> {
        Ok(self.0.select(|_| true, page))
    }
    async fn search(&self, query: &str, page: Page) -> Result<Vec<User>, RepositoryError> {
        Ok(self.0.select(|u| u.matches(query), page))
    }
    async fn update(&self, user: &User) -> Result<User, RepositoryError> {
        self.0.replace(user)
    }
    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        self.0.deactivate(id)
    }
}

#[derive(Default)]
pub(crate) struct MockCampusRepo(Table<Campus>);

#[async_trait]
impl CampusRepository for MockCampusRepo {
    async fn insert(&self, campus: &NewCampus) -> Result<Campus, RepositoryError> {
        let now = Utc::now();
        Ok(self.0.push(|id| Campus {
            id,
            name: campus.name.clone(),
            address: campus.address.clone(),
            city: campus.city.clone(),
            phone: campus.phone.clone(),
            status: true,
            created_at: now,
            updated_at: now,
        }))
    }
    async fn get_by_id(&self, id: i64) -> Result<Campus, RepositoryError> {
        self.0.get(id)
    }
    async fn find_by_name(&self, name: &str) -> Result<Option<Campus>, RepositoryError> {
        Ok(self.0.find(|c| c.name.eq_ignore_ascii_case(name)))
    }
    async fn list(&self, page: Page) -> Result<Vec<Campus>, RepositoryError> {
        Ok(self.0.select(|_| true, page))
    }
    async fn search(&self, query: &str, page: Page) -> Result<Vec<Campus>, RepositoryError> {
        Ok(self.0.select(|c| c.matches(query), page))
    }
    async fn update(&self, campus: &Campus) -> Result<Campus, RepositoryError> {
        self.0.replace(campus)
    }
    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        self.0.deactivate(id)
    }
}

#[derive(Default)]
pub(crate) struct MockSpaceRepo(Table<Space>);

#[async_trait]
impl SpaceRepository for MockSpaceRepo {
    async fn insert(&self, space: &NewSpace) -> Result<Space, RepositoryError> {
        let now = Utc::now();
        Ok(self.0.push(|id| Space {
            id,
            campus_id: space.campus_id,
            name: space.name.clone(),
            space_type: space.space_type,
            capacity: space.capacity,
            status: true,
            created_at: now,
            updated_at: now,
        }))
    }
    async fn get_by_id(&self, id: i64) -> Result<Space, RepositoryError> {
        self.0.get(id)
    }
    async fn find_by_campus_and_name(
        &self,
        campus_id: i64,
        name: &str,
    ) -> Result<Option<Space>, RepositoryError> {
        Ok(self
            .0
            .find(|s| s.campus_id == campus_id && s.name.eq_ignore_ascii_case(name)))
    }
    async fn list(&self, page: Page) -> Result<Vec<Space>, RepositoryError> {
        Ok(self.0.select(|_| true, page))
    }
    async fn list_by_campus(
        &self,
        campus_id: i64,
        page: Page,
    ) -> Result<Vec<Space>, RepositoryError> {
        Ok(self.0.select(|s| s.campus_id == campus_id, page))
    }
    async fn search(&self, query: &str, page: Page) -> Result<Vec<Space>, RepositoryError> {
        Ok(self.0.select(|s| s.matches(query), page))
    }
    async fn update(&self, space: &Space) -> Result<Space, RepositoryError> {
        self.0.replace(space)
    }
    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        self.0.deactivate(id)
    }
}

#[derive(Default)]
pub(crate) struct MockScheduleRepo(Table<Schedule>);

#[async_trait]
impl ScheduleRepository for MockScheduleRepo {
    async fn insert(&self, schedule: &NewSchedule) -> Result<Schedule, RepositoryError> {
        let now = Utc::now();
        Ok(self.0.push(|id| Schedule {
            id,
            day_of_week: schedule.day_of_week,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            status: true,
            created_at: now,
            updated_at: now,
        }))
    }
    async fn get_by_id(&self, id: i64) -> Result<Schedule, RepositoryError> {
        self.0.get(id)
    }
    async fn find_by_slot(
        &self,
        day_of_week: DayOfWeek,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<Option<Schedule>, RepositoryError> {
        Ok(self.0.find(|s| {
            s.day_of_week == day_of_week && s.start_time == start_time && s.end_time == end_time
        }))
    }
    async fn list(&self, page: Page) -> Result<Vec<Schedule>, RepositoryError> {
        Ok(self.0.select(|_| true, page))
    }
    async fn search(&self, query: &str, page: Page) -> Result<Vec<Schedule>, RepositoryError> {
        Ok(self.0.select(|s| s.matches(query), page))
    }
    async fn update(&self, schedule: &Schedule) -> Result<Schedule, RepositoryError> {
        self.0.replace(schedule)
    }
    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        self.0.deactivate(id)
    }
}

#[derive(Default)]
pub(crate) struct MockClassRepo(Table<Class>);

#[async_trait]
impl ClassRepository for MockClassRepo {
    async fn insert(&self, class: &NewClass) -> Result<Class, RepositoryError> {
        let now = Utc::now();
        Ok(self.0.push(|id| Class {
            id,
            name: class.name.clone(),
            description: class.description.clone(),
            teacher_id: class.teacher_id,
            space_id: class.space_id,
            schedule_id: class.schedule_id,
            status: true,
            created_at: now,
            updated_at: now,
        }))
    }
    async fn get_by_id(&self, id: i64) -> Result<Class, RepositoryError> {
        self.0.get(id)
    }
    async fn find_by_space_and_schedule(
        &self,
        space_id: i64,
        schedule_id: i64,
    ) -> Result<Option<Class>, RepositoryError> {
        Ok(self
            .0
            .find(|c| c.space_id == space_id && c.schedule_id == schedule_id))
    }
    async fn find_by_teacher_and_schedule(
        &self,
        teacher_id: i64,
        schedule_id: i64,
    ) -> Result<Option<Class>, RepositoryError> {
        Ok(self
            .0
            .find(|c| c.teacher_id == teacher_id && c.schedule_id == schedule_id))
    }
    async fn list(&self, page: Page) -> Result<Vec<Class>, RepositoryError> {
        Ok(self.0.select(|_| true, page))
    }
    async fn list_by_teacher(
        &self,
        teacher_id: i64,
        page: Page,
    ) -> Result<Vec<Class>, RepositoryError> {
        Ok(self.0.select(|c| c.teacher_id == teacher_id, page))
    }
    async fn search(&self, query: &str, page: Page) -> Result<Vec<Class>, RepositoryError> {
        Ok(self.0.select(|c| c.matches(query), page))
    }
    async fn update(&self, class: &Class) -> Result<Class, RepositoryError> {
        self.0.replace(class)
    }
    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        self.0.deactivate(id)
    }
}

#[derive(Default)]
pub(crate) struct MockEvaluationRepo(Table<Evaluation>);

#[async_trait]
impl EvaluationRepository for MockEvaluationRepo {
    async fn insert(&self, evaluation: &NewEvaluation) -> Result<Evaluation, RepositoryError> {
        let now = Utc::now();
        Ok(self.0.push(|id| Evaluation {
            id,
            class_id: evaluation.class_id,
            name: evaluation.name.clone(),
            description: evaluation.description.clone(),
            evaluation_date: evaluation.evaluation_date,
            weight: evaluation.weight,
            status: true,
            created_at: now,
            updated_at: now,
        }))
    }
    async fn get_by_id(&self, id: i64) -> Result<Evaluation, RepositoryError> {
        self.0.get(id)
    }
    async fn find_by_class_and_name(
        &self,
        class_id: i64,
        name: &str,
    ) -> Result<Option<Evaluation>, RepositoryError> {
        Ok(self
            .0
            .find(|e| e.class_id == class_id && e.name.eq_ignore_ascii_case(name)))
    }
    async fn list(&self, page: Page) -> Result<Vec<Evaluation>, RepositoryError> {
        Ok(self.0.select(|_| true, page))
    }
    async fn list_by_class(
        &self,
        class_id: i64,
        page: Page,
    ) -> Result<Vec<Evaluation>, RepositoryError> {
        Ok(self.0.select(|e| e.class_id == class_id, page))
    }
    async fn search(
        &self,
        query: &str,
        page: Page,
    ) -> Result<Vec<Evaluation>, RepositoryError> {
        Ok(self.0.select(|e| e.matches(query), page))
    }
    async fn update(&self, evaluation: &Evaluation) -> Result<Evaluation, RepositoryError> {
        self.0.replace(evaluation)
    }
    async fn deactivate(&self, id: i64) -> Result<(), RepositoryError> {
        self.0.deactivate(id)
    }
}

pub(crate) fn mock_repos() -> Repos {
    Repos {
        roles: Arc::new(MockRoleRepo::default()),
        salaries: Arc::new(MockSalaryRepo::default()),
        users: Arc::new(MockUserRepo::default()),
        campuses: Arc::new(MockCampusRepo::default()),
        spaces: Arc::new(MockSpaceRepo::default()),
        schedules: Arc::new(MockScheduleRepo::default()),
        classes: Arc::new(MockClassRepo::default()),
        evaluations: Arc::new(MockEvaluationRepo::default()),
    }
}

/// Captures published envelopes; optionally fails every publish.
#[derive(Default)]
pub(crate) struct RecordingPublisher {
    events: Mutex<Vec<EventEnvelope>>,
    fail: bool,
}

impl RecordingPublisher {
    pub(crate) fn failing() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub(crate) fn event_types(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }
}

#[async_trait]
impl EventPublisherPort for RecordingPublisher {
    async fn publish(&self, event: &EventEnvelope) -> Result<(), PublishError> {
        if self.fail {
            return Err(PublishError::Transport("broker down".to_string()));
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

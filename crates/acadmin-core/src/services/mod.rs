//! Core services - the application's business logic layer.
//!
//! One service per entity. Each one validates input, enforces uniqueness
//! among active rows and checks referenced entities before delegating to its
//! repository, then publishes a best-effort domain event.

mod access_service;
mod app_core;
mod campus_service;
mod class_service;
mod common;
mod evaluation_service;
#[cfg(test)]
pub(crate) mod mocks;
mod role_service;
mod salary_service;
mod schedule_service;
mod space_service;
mod user_service;

pub use access_service::AccessService;
pub use app_core::AppCore;
pub use campus_service::CampusService;
pub use class_service::ClassService;
pub use evaluation_service::EvaluationService;
pub use role_service::RoleService;
pub use salary_service::SalaryService;
pub use schedule_service::ScheduleService;
pub use space_service::SpaceService;
pub use user_service::UserService;

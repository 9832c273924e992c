#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod ports;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use domain::{
    CallerProfile, Campus, CampusUpdate, Class, ClassUpdate, DayOfWeek, Evaluation,
    EvaluationUpdate, NewCampus, NewClass, NewEvaluation, NewRole, NewSalary, NewSchedule,
    NewSpace, NewUser, Page, Role, RoleUpdate, Salary, SalaryUpdate, Schedule, ScheduleUpdate,
    Space, SpaceType, SpaceUpdate, User, UserUpdate,
};
pub use events::{EventAction, EventBuilder, EventEnvelope};
pub use ports::{
    CampusRepository, ClassRepository, CoreError, EvaluationRepository, EventHandlerError,
    EventHandlerPort, EventPublisherPort, IdentityError, IdentityProviderPort,
    LoggingEventHandler, NoopEventPublisher, PublishError, Repos, RepositoryError,
    RoleRepository, SalaryRepository, ScheduleRepository, SpaceRepository, TokenPrecheckPort,
    UserRepository,
};
pub use services::{AccessService, AppCore};

//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, HTTP, broker).
//!
//! # Structure
//!
//! Each entity module carries three types:
//! - `X` - a persisted row (always has an `id`)
//! - `NewX` - a create payload with `validate()`
//! - `XUpdate` - a partial update with `apply(&mut X)`
//!
//! `pagination` holds `Page`; `caller` holds the authenticated `CallerProfile`.

mod caller;
mod campus;
mod class;
mod evaluation;
mod pagination;
mod role;
mod salary;
mod schedule;
mod space;
mod user;

pub use caller::CallerProfile;
pub use campus::{Campus, CampusUpdate, NewCampus};
pub use class::{Class, ClassUpdate, NewClass};
pub use evaluation::{Evaluation, EvaluationUpdate, NewEvaluation};
pub use pagination::Page;
pub use role::{NewRole, Role, RoleUpdate};
pub use salary::{NewSalary, Salary, SalaryUpdate};
pub use schedule::{DayOfWeek, NewSchedule, Schedule, ScheduleUpdate};
pub use space::{NewSpace, Space, SpaceType, SpaceUpdate};
pub use user::{NewUser, User, UserUpdate};

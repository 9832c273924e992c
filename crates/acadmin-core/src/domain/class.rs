//! Class domain types: a course session held by a teacher in a space at a
//! given schedule slot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::CoreError;
use crate::utils::serde_helpers::double_option;
use crate::utils::validation::{MAX_DESCRIPTION_LEN, optional_text, require_id, require_text};

/// A persisted class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// User teaching the class.
    pub teacher_id: i64,
    pub space_id: i64,
    pub schedule_id: i64,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A class to be inserted (no ID yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClass {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub teacher_id: i64,
    pub space_id: i64,
    pub schedule_id: i64,
}

impl NewClass {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)?;
        optional_text(
            "description",
            self.description.as_deref(),
            MAX_DESCRIPTION_LEN,
        )?;
        require_id("teacher_id", self.teacher_id)?;
        require_id("space_id", self.space_id)?;
        require_id("schedule_id", self.schedule_id)
    }
}

/// Partial update for a class.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub teacher_id: Option<i64>,
    #[serde(default)]
    pub space_id: Option<i64>,
    #[serde(default)]
    pub schedule_id: Option<i64>,
}

impl ClassUpdate {
    pub fn apply(self, class: &mut Class) {
        if let Some(name) = self.name {
            class.name = name;
        }
        if let Some(description) = self.description {
            class.description = description;
        }
        if let Some(teacher_id) = self.teacher_id {
            class.teacher_id = teacher_id;
        }
        if let Some(space_id) = self.space_id {
            class.space_id = space_id;
        }
        if let Some(schedule_id) = self.schedule_id {
            class.schedule_id = schedule_id;
        }
    }
}

impl Class {
    pub fn to_new(&self) -> NewClass {
        NewClass {
            name: self.name.clone(),
            description: self.description.clone(),
            teacher_id: self.teacher_id,
            space_id: self.space_id,
            schedule_id: self.schedule_id,
        }
    }
}

//! Physical space domain types (classrooms, laboratories, ...).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::CoreError;
use crate::utils::validation::{require_id, require_text};

/// Kind of physical space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceType {
    Classroom,
    Laboratory,
    Auditorium,
    Office,
    Other,
}

impl SpaceType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Classroom => "classroom",
            Self::Laboratory => "laboratory",
            Self::Auditorium => "auditorium",
            Self::Office => "office",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for SpaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpaceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classroom" => Ok(Self::Classroom),
            "laboratory" => Ok(Self::Laboratory),
            "auditorium" => Ok(Self::Auditorium),
            "office" => Ok(Self::Office),
            "other" => Ok(Self::Other),
            other => Err(CoreError::Validation(format!(
                "unknown space type: {other}"
            ))),
        }
    }
}

/// A persisted space belonging to a campus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub id: i64,
    pub campus_id: i64,
    /// Unique within its campus among active spaces.
    pub name: String,
    pub space_type: SpaceType,
    pub capacity: i64,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A space to be inserted (no ID yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSpace {
    pub campus_id: i64,
    pub name: String,
    pub space_type: SpaceType,
    pub capacity: i64,
}

impl NewSpace {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_id("campus_id", self.campus_id)?;
        require_text("name", &self.name)?;
        if self.capacity <= 0 {
            return Err(CoreError::Validation(
                "capacity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial update for a space. No nullable columns, so plain options suffice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpaceUpdate {
    #[serde(default)]
    pub campus_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub space_type: Option<SpaceType>,
    #[serde(default)]
    pub capacity: Option<i64>,
}

impl SpaceUpdate {
    pub fn apply(self, space: &mut Space) {
        if let Some(campus_id) = self.campus_id {
            space.campus_id = campus_id;
        }
        if let Some(name) = self.name {
            space.name = name;
        }
        if let Some(space_type) = self.space_type {
            space.space_type = space_type;
        }
        if let Some(capacity) = self.capacity {
            space.capacity = capacity;
        }
    }
}

impl Space {
    pub fn to_new(&self) -> NewSpace {
        NewSpace {
            campus_id: self.campus_id,
            name: self.name.clone(),
            space_type: self.space_type,
            capacity: self.capacity,
        }
    }
}

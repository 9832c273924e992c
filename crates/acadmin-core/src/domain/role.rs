//! Role domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::CoreError;
use crate::utils::serde_helpers::double_option;
use crate::utils::validation::{MAX_DESCRIPTION_LEN, optional_text, require_text};

/// A persisted role (e.g. "teacher", "administrator").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: i64,
    /// Unique among active roles, compared case-insensitively.
    pub name: String,
    pub description: Option<String>,
    /// `false` once soft-deleted.
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A role to be inserted (no ID yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRole {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewRole {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)?;
        optional_text(
            "description",
            self.description.as_deref(),
            MAX_DESCRIPTION_LEN,
        )
    }
}

/// Partial update for a role.
///
/// For nullable columns: `None` = don't change, `Some(None)` = set to null,
/// `Some(Some(v))` = set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

impl RoleUpdate {
    pub fn apply(self, role: &mut Role) {
        if let Some(name) = self.name {
            role.name = name;
        }
        if let Some(description) = self.description {
            role.description = description;
        }
    }
}

impl Role {
    /// The writable fields of this role, for re-validation after an update.
    pub fn to_new(&self) -> NewRole {
        NewRole {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

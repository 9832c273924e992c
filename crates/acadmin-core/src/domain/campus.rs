//! Campus ("sede") domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::CoreError;
use crate::utils::serde_helpers::double_option;
use crate::utils::validation::{MAX_TEXT_LEN, optional_text, require_text};

/// A persisted campus: a physical site that contains spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campus {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub phone: Option<String>,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A campus to be inserted (no ID yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCampus {
    pub name: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl NewCampus {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)?;
        require_text("address", &self.address)?;
        require_text("city", &self.city)?;
        optional_text("phone", self.phone.as_deref(), MAX_TEXT_LEN)
    }
}

/// Partial update for a campus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampusUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
}

impl CampusUpdate {
    pub fn apply(self, campus: &mut Campus) {
        if let Some(name) = self.name {
            campus.name = name;
        }
        if let Some(address) = self.address {
            campus.address = address;
        }
        if let Some(city) = self.city {
            campus.city = city;
        }
        if let Some(phone) = self.phone {
            campus.phone = phone;
        }
    }
}

impl Campus {
    pub fn to_new(&self) -> NewCampus {
        NewCampus {
            name: self.name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            phone: self.phone.clone(),
        }
    }
}

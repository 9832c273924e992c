//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::CoreError;
use crate::utils::serde_helpers::double_option;
use crate::utils::validation::{
    MAX_TEXT_LEN, optional_text, require_email, require_id, require_text,
};

/// A persisted user (staff member, teacher or student).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// Unique among active users.
    pub email: String,
    /// National ID or passport number. Unique among active users.
    pub document_number: String,
    pub phone: Option<String>,
    pub role_id: i64,
    pub salary_id: Option<i64>,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user to be inserted (no ID yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub document_number: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role_id: i64,
    #[serde(default)]
    pub salary_id: Option<i64>,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("first_name", &self.first_name)?;
        require_text("last_name", &self.last_name)?;
        require_email("email", &self.email)?;
        require_text("document_number", &self.document_number)?;
        optional_text("phone", self.phone.as_deref(), MAX_TEXT_LEN)?;
        require_id("role_id", self.role_id)?;
        if let Some(salary_id) = self.salary_id {
            require_id("salary_id", salary_id)?;
        }
        Ok(())
    }
}

/// Partial update for a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default)]
    pub role_id: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    pub salary_id: Option<Option<i64>>,
}

impl UserUpdate {
    pub fn apply(self, user: &mut User) {
        if let Some(first_name) = self.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(document_number) = self.document_number {
            user.document_number = document_number;
        }
        if let Some(phone) = self.phone {
            user.phone = phone;
        }
        if let Some(role_id) = self.role_id {
            user.role_id = role_id;
        }
        if let Some(salary_id) = self.salary_id {
            user.salary_id = salary_id;
        }
    }
}

impl User {
    pub fn to_new(&self) -> NewUser {
        NewUser {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            document_number: self.document_number.clone(),
            phone: self.phone.clone(),
            role_id: self.role_id,
            salary_id: self.salary_id,
        }
    }
}

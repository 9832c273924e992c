//! Salary domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::CoreError;
use crate::utils::serde_helpers::double_option;
use crate::utils::validation::{MAX_DESCRIPTION_LEN, optional_text, require_text};

/// A persisted salary band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salary {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    /// ISO-4217 style code, e.g. `USD`.
    pub currency: String,
    pub description: Option<String>,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A salary band to be inserted (no ID yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSalary {
    pub name: String,
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewSalary {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("name", &self.name)?;
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(CoreError::Validation(
                "amount must be a finite number greater than or equal to 0".to_string(),
            ));
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(CoreError::Validation(
                "currency must be a 3-letter upper-case code".to_string(),
            ));
        }
        optional_text(
            "description",
            self.description.as_deref(),
            MAX_DESCRIPTION_LEN,
        )
    }
}

/// Partial update for a salary band.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalaryUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

impl SalaryUpdate {
    pub fn apply(self, salary: &mut Salary) {
        if let Some(name) = self.name {
            salary.name = name;
        }
        if let Some(amount) = self.amount {
            salary.amount = amount;
        }
        if let Some(currency) = self.currency {
            salary.currency = currency;
        }
        if let Some(description) = self.description {
            salary.description = description;
        }
    }
}

impl Salary {
    pub fn to_new(&self) -> NewSalary {
        NewSalary {
            name: self.name.clone(),
            amount: self.amount,
            currency: self.currency.clone(),
            description: self.description.clone(),
        }
    }
}

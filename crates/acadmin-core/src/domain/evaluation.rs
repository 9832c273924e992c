//! Evaluation domain types (exams, projects, quizzes attached to a class).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::CoreError;
use crate::utils::serde_helpers::double_option;
use crate::utils::validation::{MAX_DESCRIPTION_LEN, optional_text, require_id, require_text};

/// A persisted evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: i64,
    pub class_id: i64,
    /// Unique within its class among active evaluations.
    pub name: String,
    pub description: Option<String>,
    pub evaluation_date: NaiveDate,
    /// Percentage of the final grade, in `(0, 100]`.
    pub weight: f64,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An evaluation to be inserted (no ID yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvaluation {
    pub class_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub evaluation_date: NaiveDate,
    pub weight: f64,
}

impl NewEvaluation {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_id("class_id", self.class_id)?;
        require_text("name", &self.name)?;
        optional_text(
            "description",
            self.description.as_deref(),
            MAX_DESCRIPTION_LEN,
        )?;
        if !self.weight.is_finite() || self.weight <= 0.0 || self.weight > 100.0 {
            return Err(CoreError::Validation(
                "weight must be greater than 0 and at most 100".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial update for an evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationUpdate {
    #[serde(default)]
    pub class_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub evaluation_date: Option<NaiveDate>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl EvaluationUpdate {
    pub fn apply(self, evaluation: &mut Evaluation) {
        if let Some(class_id) = self.class_id {
            evaluation.class_id = class_id;
        }
        if let Some(name) = self.name {
            evaluation.name = name;
        }
        if let Some(description) = self.description {
            evaluation.description = description;
        }
        if let Some(evaluation_date) = self.evaluation_date {
            evaluation.evaluation_date = evaluation_date;
        }
        if let Some(weight) = self.weight {
            evaluation.weight = weight;
        }
    }
}

impl Evaluation {
    pub fn to_new(&self) -> NewEvaluation {
        NewEvaluation {
            class_id: self.class_id,
            name: self.name.clone(),
            description: self.description.clone(),
            evaluation_date: self.evaluation_date,
            weight: self.weight,
        }
    }
}

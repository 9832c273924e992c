//! Weekly schedule slot domain types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::CoreError;

/// Day of the week a slot repeats on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" => Ok(Self::Monday),
            "tuesday" => Ok(Self::Tuesday),
            "wednesday" => Ok(Self::Wednesday),
            "thursday" => Ok(Self::Thursday),
            "friday" => Ok(Self::Friday),
            "saturday" => Ok(Self::Saturday),
            "sunday" => Ok(Self::Sunday),
            other => Err(CoreError::Validation(format!(
                "unknown day of week: {other}"
            ))),
        }
    }
}

/// A persisted weekly time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A time slot to be inserted (no ID yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSchedule {
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl NewSchedule {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.start_time >= self.end_time {
            return Err(CoreError::Validation(
                "start_time must be before end_time".to_string(),
            ));
        }
        Ok(())
    }
}

/// Partial update for a time slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleUpdate {
    #[serde(default)]
    pub day_of_week: Option<DayOfWeek>,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
}

impl ScheduleUpdate {
    pub fn apply(self, schedule: &mut Schedule) {
        if let Some(day_of_week) = self.day_of_week {
            schedule.day_of_week = day_of_week;
        }
        if let Some(start_time) = self.start_time {
            schedule.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            schedule.end_time = end_time;
        }
    }
}

impl Schedule {
    pub fn to_new(&self) -> NewSchedule {
        NewSchedule {
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

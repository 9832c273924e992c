//! Offset pagination for list and search operations.

use serde::{Deserialize, Serialize};

use crate::ports::CoreError;

/// A window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Number of rows to skip.
    pub skip: u32,
    /// Maximum number of rows to return.
    pub limit: u32,
}

impl Page {
    pub const DEFAULT_LIMIT: u32 = 100;
    pub const MAX_LIMIT: u32 = 500;

    /// Build a page, rejecting `limit == 0` and `limit > MAX_LIMIT`.
    pub fn new(skip: u32, limit: u32) -> Result<Self, CoreError> {
        if limit == 0 {
            return Err(CoreError::Validation(
                "limit must be greater than 0".to_string(),
            ));
        }
        if limit > Self::MAX_LIMIT {
            return Err(CoreError::Validation(format!(
                "limit must be at most {}",
                Self::MAX_LIMIT
            )));
        }
        Ok(Self { skip, limit })
    }

    /// Build a page from optional query parameters, filling in defaults.
    pub fn from_query(skip: Option<u32>, limit: Option<u32>) -> Result<Self, CoreError> {
        Self::new(skip.unwrap_or(0), limit.unwrap_or(Self::DEFAULT_LIMIT))
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.skip)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

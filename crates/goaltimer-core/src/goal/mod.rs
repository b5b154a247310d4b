//! Goal records and the registry that holds them.

mod registry;

pub use registry::{GoalRegistry, GoalRow};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result};

/// Stable goal identifier, independent of the goal's row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GoalId(Uuid);

impl GoalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GoalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GoalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A goal and its countdown length. Never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    id: GoalId,
    description: String,
    /// Countdown length in seconds.
    duration_secs: u64,
    created_at: DateTime<Utc>,
}

impl Goal {
    /// Create a goal lasting `minutes` minutes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDuration`] if `minutes * 60` overflows.
    pub fn new(description: impl Into<String>, minutes: u64) -> Result<Self> {
        let duration_secs = minutes
            .checked_mul(60)
            .ok_or_else(|| CoreError::InvalidDuration {
                input: minutes.to_string(),
            })?;
        Ok(Self {
            id: GoalId::new(),
            description: description.into(),
            duration_secs,
            created_at: Utc::now(),
        })
    }

    pub fn id(&self) -> GoalId {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    /// Whole minutes, as entered.
    pub fn minutes(&self) -> u64 {
        self.duration_secs / 60
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Parse the minutes field of the add form.
///
/// Accepts an optionally signed decimal integer with surrounding whitespace.
/// Negative values parse but are not a valid duration.
///
/// # Errors
///
/// Returns [`CoreError::InvalidDuration`] carrying the raw input.
pub fn parse_minutes(input: &str) -> Result<u64> {
    let invalid = || CoreError::InvalidDuration {
        input: input.to_string(),
    };
    let value: i64 = input.trim().parse().map_err(|_| invalid())?;
    u64::try_from(value).map_err(|_| invalid())
}

//! Append-only goal registry.
//!
//! Insertion order is display order, and a goal's position is its row in the
//! presentation layer's table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_minutes, Goal, GoalId};
use crate::error::{CoreError, Result};
use crate::timer::CountdownFormat;

/// One display row of the goal table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalRow {
    pub row: usize,
    pub id: GoalId,
    pub description: String,
    pub minutes: u64,
    /// Initial countdown, formatted.
    pub countdown: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct GoalRegistry {
    goals: Vec<Goal>,
}

impl GoalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `minutes_text` and append a new goal.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDuration`] if the minutes do not parse.
    /// The registry is unchanged on error.
    pub fn append(&mut self, description: &str, minutes_text: &str) -> Result<&Goal> {
        let minutes = parse_minutes(minutes_text)?;
        let goal = Goal::new(description, minutes)?;
        tracing::debug!(goal = %goal.id(), minutes, "goal appended");
        self.goals.push(goal);
        Ok(&self.goals[self.goals.len() - 1])
    }

    /// # Errors
    ///
    /// Returns [`CoreError::IndexOutOfRange`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&Goal> {
        self.goals.get(index).ok_or(CoreError::IndexOutOfRange {
            index,
            len: self.goals.len(),
        })
    }

    /// Look a goal up by id, returning its row as well.
    pub fn find(&self, id: GoalId) -> Option<(usize, &Goal)> {
        self.iter().enumerate().find(|(_, g)| g.id() == id)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Goal> {
        self.goals.iter()
    }

    /// Table rows with the default countdown format.
    pub fn snapshot(&self) -> Vec<GoalRow> {
        self.snapshot_with(CountdownFormat::default())
    }

    pub fn snapshot_with(&self, format: CountdownFormat) -> Vec<GoalRow> {
        self.iter()
            .enumerate()
            .map(|(row, goal)| GoalRow {
                row,
                id: goal.id(),
                description: goal.description().to_string(),
                minutes: goal.minutes(),
                countdown: format.format(goal.duration_secs()),
                created_at: goal.created_at(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_grows_by_one() {
        let mut registry = GoalRegistry::new();
        let goal = registry.append("Read a book", "1").unwrap();
        assert_eq!(goal.duration_secs(), 60);
        assert_eq!(registry.len(), 1);

        registry.append("Write", "30").unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(1).unwrap().description(), "Write");
    }

    #[test]
    fn invalid_minutes_leave_registry_unchanged() {
        let mut registry = GoalRegistry::new();
        registry.append("Keep", "5").unwrap();

        let err = registry.append("Broken", "five").unwrap_err();
        assert!(matches!(err, CoreError::InvalidDuration { .. }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn empty_description_is_accepted() {
        let mut registry = GoalRegistry::new();
        registry.append("", "2").unwrap();
        assert_eq!(registry.get(0).unwrap().description(), "");
    }

    #[test]
    fn get_out_of_range() {
        let mut registry = GoalRegistry::new();
        registry.append("Only", "1").unwrap();
        match registry.get(1) {
            Err(CoreError::IndexOutOfRange { index, len }) => {
                assert_eq!(index, 1);
                assert_eq!(len, 1);
            }
            other => panic!("expected IndexOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn find_returns_row() {
        let mut registry = GoalRegistry::new();
        registry.append("First", "1").unwrap();
        let id = registry.append("Second", "2").unwrap().id();
        let (row, goal) = registry.find(id).unwrap();
        assert_eq!(row, 1);
        assert_eq!(goal.description(), "Second");
    }

    #[test]
    fn snapshot_formats_initial_countdown() {
        let mut registry = GoalRegistry::new();
        registry.append("Short", "1").unwrap();
        registry.append("Long", "45").unwrap();

        let rows = registry.snapshot();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].minutes, 1);
        assert_eq!(rows[0].countdown, "31:00");
        assert_eq!(rows[1].minutes, 45);
        assert_eq!(rows[1].countdown, "45:00");

        let plain = registry.snapshot_with(CountdownFormat::new(false));
        assert_eq!(plain[0].countdown, "01:00");
    }

    #[test]
    fn rows_follow_insertion_order() {
        let mut registry = GoalRegistry::new();
        registry.append("a", "1").unwrap();
        registry.append("b", "2").unwrap();

        let rows = registry.snapshot();
        for (row, goal) in rows.iter().zip(registry.iter()) {
            assert_eq!(row.id, goal.id());
            assert_eq!(row.created_at, goal.created_at());
        }
        assert!(rows[0].created_at <= rows[1].created_at);
    }
}

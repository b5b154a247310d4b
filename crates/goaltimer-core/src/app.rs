//! Application state owned by the presentation layer.
//!
//! `AppState` bundles the goal registry and the countdown engine. Front ends
//! hold one instance, call its methods from their event loop and render the
//! returned [`Event`]s. Nothing here is global.

use chrono::Utc;

use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::goal::{GoalRegistry, GoalRow};
use crate::storage::Config;
use crate::timer::{CountdownEngine, CountdownFormat};

#[derive(Debug, Clone, Default)]
pub struct AppState {
    registry: GoalRegistry,
    engine: CountdownEngine,
}

impl AppState {
    pub fn new(engine: CountdownEngine) -> Self {
        Self {
            registry: GoalRegistry::new(),
            engine,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(CountdownEngine::new(
            config.timer.on_active,
            config.countdown_format(),
        ))
    }

    pub fn registry(&self) -> &GoalRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &CountdownEngine {
        &self.engine
    }

    pub fn format(&self) -> CountdownFormat {
        self.engine.format()
    }

    /// Handle the add form.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidDuration`] when `minutes_text` is not a
    /// whole number; nothing is added.
    pub fn add_goal(&mut self, description: &str, minutes_text: &str) -> Result<Event> {
        let row = self.registry.len();
        let goal = self
            .registry
            .append(description, minutes_text)
            .inspect_err(|e| tracing::debug!(input = minutes_text, error = %e, "goal rejected"))?;
        Ok(Event::GoalAdded {
            row,
            goal_id: goal.id(),
            description: goal.description().to_string(),
            minutes: goal.minutes(),
            message: format!("Goal '{}' added successfully!", goal.description()),
            at: Utc::now(),
        })
    }

    /// Handle the start action for the selected row (`None` = no selection).
    ///
    /// # Errors
    ///
    /// [`CoreError::NoSelection`], [`CoreError::IndexOutOfRange`] or
    /// [`CoreError::SessionAlreadyActive`]. Session state is untouched on
    /// error.
    pub fn start_selected(&mut self, selected: Option<usize>) -> Result<Vec<Event>> {
        let row = selected.ok_or(CoreError::NoSelection)?;
        let goal = self.registry.get(row)?;
        self.engine.start(row, goal)
    }

    pub fn tick(&mut self) -> Vec<Event> {
        self.engine.tick()
    }

    pub fn cancel(&mut self) -> Option<Event> {
        self.engine.cancel()
    }

    pub fn snapshot(&self) -> Event {
        self.engine.snapshot()
    }

    /// Table rows, with the running goal's countdown cell showing its live
    /// value instead of the initial one.
    pub fn rows(&self) -> Vec<GoalRow> {
        let mut rows = self.registry.snapshot_with(self.format());
        if let (Some(row), Some(display)) = (self.engine.active_row(), self.engine.display()) {
            if let Some(cell) = rows.get_mut(row) {
                cell.countdown = display;
            }
        }
        rows
    }
}

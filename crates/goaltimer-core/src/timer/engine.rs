//! Countdown engine implementation.
//!
//! The engine is a tick-counting state machine. It does not use internal
//! threads or read the clock: the caller invokes `tick()` once per interval
//! and every call takes exactly one second off the running session. A slow
//! scheduler therefore delays values but never skips or repeats them.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running --tick() reaches 0, TimerExpired--> Idle
//!            |
//!            +-- cancel() --> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = CountdownEngine::new(ConflictPolicy::Reject, CountdownFormat::default());
//! engine.start(0, &goal)?;
//! // Once per second:
//! for event in engine.tick() { /* render */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::format::CountdownFormat;
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::goal::{Goal, GoalId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
}

/// What `start()` does when a session is already running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Refuse with `SessionAlreadyActive`.
    #[default]
    Reject,
    /// Cancel the running session, then start the new one.
    Replace,
}

impl std::str::FromStr for ConflictPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "reject" => Ok(ConflictPolicy::Reject),
            "replace" => Ok(ConflictPolicy::Replace),
            other => Err(CoreError::InvalidArgument(format!(
                "unknown conflict policy '{other}' (expected 'reject' or 'replace')"
            ))),
        }
    }
}

/// The single active countdown.
#[derive(Debug, Clone)]
struct Session {
    row: usize,
    goal: Goal,
    remaining_secs: u64,
}

/// Core countdown engine.
///
/// Holds at most one session. The caller is responsible for calling
/// `tick()` periodically.
#[derive(Debug, Clone)]
pub struct CountdownEngine {
    state: TimerState,
    session: Option<Session>,
    policy: ConflictPolicy,
    format: CountdownFormat,
}

impl Default for CountdownEngine {
    fn default() -> Self {
        Self::new(ConflictPolicy::default(), CountdownFormat::default())
    }
}

impl CountdownEngine {
    pub fn new(policy: ConflictPolicy, format: CountdownFormat) -> Self {
        Self {
            state: TimerState::Idle,
            session: None,
            policy,
            format,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    pub fn format(&self) -> CountdownFormat {
        self.format
    }

    pub fn remaining_secs(&self) -> u64 {
        self.session.as_ref().map(|s| s.remaining_secs).unwrap_or(0)
    }

    /// Row of the running goal.
    pub fn active_row(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.row)
    }

    pub fn active_goal(&self) -> Option<&Goal> {
        self.session.as_ref().map(|s| &s.goal)
    }

    /// Formatted countdown of the running goal.
    pub fn display(&self) -> Option<String> {
        self.session
            .as_ref()
            .map(|s| self.format.format(s.remaining_secs))
    }

    /// 0.0 .. 100.0 progress through the running session.
    pub fn progress_pct(&self) -> f64 {
        let Some(session) = &self.session else {
            return 0.0;
        };
        let total = session.goal.duration_secs();
        if total == 0 {
            return 100.0;
        }
        let elapsed = total - session.remaining_secs;
        (elapsed as f64 / total as f64 * 100.0).min(100.0)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let session = self.session.as_ref();
        Event::StateSnapshot {
            state: self.state,
            row: session.map(|s| s.row),
            goal_id: session.map(|s| s.goal.id()),
            description: session.map(|s| s.goal.description().to_string()),
            remaining_secs: self.remaining_secs(),
            total_secs: session.map(|s| s.goal.duration_secs()).unwrap_or(0),
            progress_pct: self.progress_pct(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start counting down `goal`, shown at table row `row`.
    ///
    /// Returns the events produced: `TimerStarted`, preceded by
    /// `TimerCancelled` when the `Replace` policy displaced a session.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SessionAlreadyActive`] under the `Reject` policy
    /// when a session is running. No state changes in that case.
    pub fn start(&mut self, row: usize, goal: &Goal) -> Result<Vec<Event>> {
        let mut events = Vec::with_capacity(2);
        if let Some(current) = self.session.as_ref().filter(|_| self.is_running()) {
            match self.policy {
                ConflictPolicy::Reject => {
                    tracing::debug!(
                        running = %current.goal.id(),
                        requested = %goal.id(),
                        "start rejected, session active"
                    );
                    return Err(CoreError::SessionAlreadyActive {
                        goal: current.goal.description().to_string(),
                    });
                }
                ConflictPolicy::Replace => events.extend(self.cancel()),
            }
        }

        self.session = Some(Session {
            row,
            goal: goal.clone(),
            remaining_secs: goal.duration_secs(),
        });
        self.state = TimerState::Running;
        tracing::info!(goal = %goal.id(), row, secs = goal.duration_secs(), "countdown started");
        events.push(Event::TimerStarted {
            row,
            goal_id: goal.id(),
            description: goal.description().to_string(),
            duration_secs: goal.duration_secs(),
            at: Utc::now(),
        });
        Ok(events)
    }

    /// Advance the running session by one second.
    ///
    /// Returns `TimerTick`, followed by `TimerExpired` on the final tick.
    /// A zero-length goal expires on its first tick without a `TimerTick`.
    /// Does nothing while idle.
    pub fn tick(&mut self) -> Vec<Event> {
        if self.state != TimerState::Running {
            return Vec::new();
        }
        let Some(session) = self.session.as_mut() else {
            self.state = TimerState::Idle;
            return Vec::new();
        };

        let mut events = Vec::with_capacity(2);
        if session.remaining_secs > 0 {
            session.remaining_secs -= 1;
            tracing::trace!(goal = %session.goal.id(), remaining = session.remaining_secs, "tick");
            events.push(Event::TimerTick {
                row: session.row,
                goal_id: session.goal.id(),
                remaining_secs: session.remaining_secs,
                display: self.format.format(session.remaining_secs),
                at: Utc::now(),
            });
        }

        if session.remaining_secs == 0 {
            events.push(self.expire());
        }
        events
    }

    /// Stop the running session without a completion notice.
    pub fn cancel(&mut self) -> Option<Event> {
        if !self.is_running() {
            return None;
        }
        let session = self.session.take()?;
        self.state = TimerState::Idle;
        tracing::info!(goal = %session.goal.id(), remaining = session.remaining_secs, "countdown cancelled");
        Some(Event::TimerCancelled {
            row: session.row,
            goal_id: session.goal.id(),
            remaining_secs: session.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Whether the session is bound to `id`.
    pub fn is_tracking(&self, id: GoalId) -> bool {
        self.session.as_ref().is_some_and(|s| s.goal.id() == id)
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// End the session at zero. Expiry is a transition, not a resting
    /// state: the engine is `Idle` again by the time the event is returned.
    fn expire(&mut self) -> Event {
        let session = self.session.take();
        self.state = TimerState::Idle;
        let (row, goal_id, description) = session
            .map(|s| (s.row, s.goal.id(), s.goal.description().to_string()))
            .unwrap_or_default();
        tracing::info!(goal = %goal_id, "countdown expired");
        Event::TimerExpired {
            row,
            goal_id,
            message: completion_message(&description),
            description,
            at: Utc::now(),
        }
    }
}

/// Completion notice text for a goal.
pub fn completion_message(description: &str) -> String {
    format!("Time's up for goal: {description}")
}

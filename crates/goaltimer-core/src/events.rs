use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::goal::GoalId;
use crate::timer::TimerState;

/// Every state change in the system produces an Event.
/// The presentation layer renders them; nothing else consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A goal was appended; the table must be redrawn.
    GoalAdded {
        row: usize,
        goal_id: GoalId,
        description: String,
        minutes: u64,
        message: String,
        at: DateTime<Utc>,
    },
    TimerStarted {
        row: usize,
        goal_id: GoalId,
        description: String,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// One countdown step. `display` is the formatted countdown cell.
    TimerTick {
        row: usize,
        goal_id: GoalId,
        remaining_secs: u64,
        display: String,
        at: DateTime<Utc>,
    },
    /// Countdown reached zero. Emitted once per session.
    TimerExpired {
        row: usize,
        goal_id: GoalId,
        description: String,
        message: String,
        at: DateTime<Utc>,
    },
    TimerCancelled {
        row: usize,
        goal_id: GoalId,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        row: Option<usize>,
        goal_id: Option<GoalId>,
        description: Option<String>,
        remaining_secs: u64,
        total_secs: u64,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Goal the event refers to, if any.
    pub fn goal_id(&self) -> Option<GoalId> {
        match self {
            Event::GoalAdded { goal_id, .. }
            | Event::TimerStarted { goal_id, .. }
            | Event::TimerTick { goal_id, .. }
            | Event::TimerExpired { goal_id, .. }
            | Event::TimerCancelled { goal_id, .. } => Some(*goal_id),
            Event::StateSnapshot { goal_id, .. } => *goal_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::CountdownEngine;
    use crate::Goal;

    #[test]
    fn goal_id_follows_the_session() {
        let goal = Goal::new("Read", 1).unwrap();
        let mut engine = CountdownEngine::default();
        assert_eq!(engine.snapshot().goal_id(), None);

        let started = engine.start(0, &goal).unwrap();
        assert_eq!(started[0].goal_id(), Some(goal.id()));
        assert_eq!(engine.tick()[0].goal_id(), Some(goal.id()));
        assert_eq!(engine.snapshot().goal_id(), Some(goal.id()));
        assert_eq!(engine.cancel().and_then(|e| e.goal_id()), Some(goal.id()));
    }
}

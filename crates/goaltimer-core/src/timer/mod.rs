mod engine;
mod format;

pub use engine::{completion_message, ConflictPolicy, CountdownEngine, TimerState};
pub use format::{format_countdown, try_format_countdown, CountdownFormat, OFFSET_THRESHOLD_SECS};

//! # Goal Timer Core Library
//!
//! Core logic for the Goal Timer: a list of personal goals, each with a
//! countdown length, and a single countdown that can run against one of
//! them. Front ends own an [`AppState`], forward user actions to it and
//! render the [`Event`]s it returns.
//!
//! ## Architecture
//!
//! - **Goal Registry**: append-only list of goals; a goal's position is its
//!   table row
//! - **Countdown Engine**: tick-counting state machine; the caller invokes
//!   `tick()` once per second
//! - **Time Formatter**: `mm:ss` rendering of remaining seconds
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`AppState`]: registry plus engine, the front end's single state object
//! - [`CountdownEngine`]: countdown state machine
//! - [`Config`]: application configuration management

pub mod app;
pub mod error;
pub mod events;
pub mod goal;
pub mod storage;
pub mod timer;

pub use app::AppState;
pub use error::{ConfigError, CoreError};
pub use events::Event;
pub use goal::{Goal, GoalId, GoalRegistry, GoalRow};
pub use storage::Config;
pub use timer::{
    format_countdown, ConflictPolicy, CountdownEngine, CountdownFormat, TimerState,
};

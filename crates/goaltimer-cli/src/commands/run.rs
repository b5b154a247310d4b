//! One-shot countdown in the foreground.

use goaltimer_core::{AppState, Config};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::{runtime, CommandResult, INTERRUPTED};
use crate::output::Renderer;

/// Exit status for rejected input.
const INVALID_INPUT: i32 = 2;

pub fn run(config: &Config, json: bool, minutes: &str, description: &str) -> CommandResult {
    let out = Renderer::new(json, config.display.show_ticks);
    let mut app = AppState::from_config(config);

    match app.add_goal(description, minutes) {
        Ok(event) => out.event(&event),
        Err(e) => {
            out.error(&e);
            return Ok(INVALID_INPUT);
        }
    }
    for event in app.start_selected(Some(0))? {
        out.event(&event);
    }

    runtime()?.block_on(count_down(app, config, out))
}

async fn count_down(mut app: AppState, config: &Config, out: Renderer) -> CommandResult {
    let period = config.tick_interval();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    while app.engine().is_running() {
        tokio::select! {
            _ = ticker.tick() => {
                for event in app.tick() {
                    out.event(&event);
                }
            }
            _ = &mut ctrl_c => {
                if let Some(event) = app.cancel() {
                    out.event(&event);
                }
                return Ok(INTERRUPTED);
            }
        }
    }
    Ok(0)
}

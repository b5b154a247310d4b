//! Interactive session: the terminal stand-in for the goal window.
//!
//! Input lines and countdown ticks are handled on one task, so the
//! application state is never touched concurrently.

use goaltimer_core::{AppState, Config};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::{runtime, CommandResult, INTERRUPTED};
use crate::output::Renderer;

const HELP: &str = "\
Commands:
  add <minutes> <goal...>   add a goal to the list
  list                      show the goal table
  start <row>               start the timer for a row (1-based)
  cancel                    stop the running timer
  status                    show timer state
  help                      show this help
  quit                      leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add { minutes: String, description: String },
    List,
    /// Zero-based row, `None` when nothing usable was selected.
    Start(Option<usize>),
    Cancel,
    Status,
    Help,
    Quit,
    Empty,
}

impl ShellCommand {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns the message to show for an unknown command.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "" => Ok(ShellCommand::Empty),
            "add" => {
                let (minutes, description) = match rest.split_once(char::is_whitespace) {
                    Some((minutes, description)) => (minutes, description.trim()),
                    None => (rest, ""),
                };
                Ok(ShellCommand::Add {
                    minutes: minutes.to_string(),
                    description: description.to_string(),
                })
            }
            "list" | "ls" => Ok(ShellCommand::List),
            "start" => Ok(ShellCommand::Start(
                rest.parse::<usize>().ok().and_then(|n| n.checked_sub(1)),
            )),
            "cancel" | "stop" => Ok(ShellCommand::Cancel),
            "status" => Ok(ShellCommand::Status),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(format!("Unknown command: {other} (type 'help')")),
        }
    }
}

/// Apply one command. Returns `false` when the session should end.
/// `started` is set when a new countdown began.
fn apply(app: &mut AppState, cmd: ShellCommand, out: &Renderer, started: &mut bool) -> bool {
    match cmd {
        ShellCommand::Add {
            minutes,
            description,
        } => match app.add_goal(&description, &minutes) {
            Ok(event) => {
                out.event(&event);
                out.table(&app.rows());
            }
            Err(e) => out.error(&e),
        },
        ShellCommand::List => out.table(&app.rows()),
        ShellCommand::Start(selected) => match app.start_selected(selected) {
            Ok(events) => {
                for event in &events {
                    out.event(event);
                }
                *started = true;
            }
            Err(e) => out.error(&e),
        },
        ShellCommand::Cancel => match app.cancel() {
            Some(event) => out.event(&event),
            None => out.message("Info", "No timer is running."),
        },
        ShellCommand::Status => out.event(&app.snapshot()),
        ShellCommand::Help => out.message("Help", HELP),
        ShellCommand::Quit => return false,
        ShellCommand::Empty => {}
    }
    true
}

pub fn run(config: &Config, json: bool) -> CommandResult {
    let out = Renderer::new(json, config.display.show_ticks);
    runtime()?.block_on(event_loop(config, out))
}

async fn event_loop(config: &Config, out: Renderer) -> CommandResult {
    let mut app = AppState::from_config(config);
    let period = config.tick_interval();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut input = BufReader::new(tokio::io::stdin());
    // Bytes of the line being read. `read_until` may be cancelled by another
    // branch mid-line; the partial line stays here until the next call.
    let mut buf = Vec::new();
    let mut input_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    tracing::debug!(?period, policy = ?app.engine().policy(), "shell started");
    loop {
        tokio::select! {
            read = input.read_until(b'\n', &mut buf), if input_open => {
                match read? {
                    0 => {
                        input_open = false;
                        if !app.engine().is_running() {
                            break;
                        }
                    }
                    _ => {
                        // Undecodable bytes become U+FFFD and fail to parse
                        // like any other unknown command.
                        let line = String::from_utf8_lossy(&buf).into_owned();
                        buf.clear();
                        let mut started = false;
                        let keep_going = match ShellCommand::parse(&line) {
                            Ok(cmd) => apply(&mut app, cmd, &out, &mut started),
                            Err(msg) => {
                                out.message("Error", &msg);
                                true
                            }
                        };
                        if started {
                            // A fresh countdown gets a full period before its first tick.
                            ticker.reset();
                        }
                        if !keep_going {
                            if let Some(event) = app.cancel() {
                                out.event(&event);
                            }
                            break;
                        }
                    }
                }
            }
            _ = ticker.tick(), if app.engine().is_running() => {
                for event in app.tick() {
                    out.event(&event);
                }
                if !input_open && !app.engine().is_running() {
                    break;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_add_keeps_description_spacing() {
        assert_eq!(
            ShellCommand::parse("add 25 Read a  book").unwrap(),
            ShellCommand::Add {
                minutes: "25".into(),
                description: "Read a  book".into()
            }
        );
    }

    #[test]
    fn parse_add_passes_bad_minutes_through() {
        assert_eq!(
            ShellCommand::parse("add ten Read").unwrap(),
            ShellCommand::Add {
                minutes: "ten".into(),
                description: "Read".into()
            }
        );
        assert_eq!(
            ShellCommand::parse("add").unwrap(),
            ShellCommand::Add {
                minutes: String::new(),
                description: String::new()
            }
        );
    }

    #[test]
    fn parse_start_rows_are_one_based() {
        assert_eq!(ShellCommand::parse("start 1").unwrap(), ShellCommand::Start(Some(0)));
        assert_eq!(ShellCommand::parse("START 3").unwrap(), ShellCommand::Start(Some(2)));
        assert_eq!(ShellCommand::parse("start").unwrap(), ShellCommand::Start(None));
        assert_eq!(ShellCommand::parse("start 0").unwrap(), ShellCommand::Start(None));
        assert_eq!(ShellCommand::parse("start x").unwrap(), ShellCommand::Start(None));
    }

    #[test]
    fn parse_misc() {
        assert_eq!(ShellCommand::parse("   ").unwrap(), ShellCommand::Empty);
        assert_eq!(ShellCommand::parse("ls").unwrap(), ShellCommand::List);
        assert_eq!(ShellCommand::parse("exit").unwrap(), ShellCommand::Quit);
        assert!(ShellCommand::parse("delete 1").is_err());
    }

    #[test]
    fn apply_start_without_selection_changes_nothing() {
        let mut app = AppState::default();
        let out = Renderer::new(true, false);
        let mut started = false;
        assert!(apply(&mut app, ShellCommand::Start(None), &out, &mut started));
        assert!(!started);
        assert!(!app.engine().is_running());
    }

    #[test]
    fn apply_quit_stops_loop() {
        let mut app = AppState::default();
        let out = Renderer::new(true, false);
        let mut started = false;
        assert!(!apply(&mut app, ShellCommand::Quit, &out, &mut started));
    }
}

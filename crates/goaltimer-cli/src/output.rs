//! Terminal rendering of core events, errors and the goal table.

use goaltimer_core::{CoreError, Event, GoalRow};

/// Writes events either as text lines or as JSON lines.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    json: bool,
    show_ticks: bool,
}

impl Renderer {
    pub fn new(json: bool, show_ticks: bool) -> Self {
        Self { json, show_ticks }
    }

    pub fn event(&self, event: &Event) {
        tracing::trace!(goal = ?event.goal_id(), ?event, "render");
        if self.json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!(error = %e, "event not serializable"),
            }
            return;
        }
        if let Some(line) = self.text(event) {
            println!("{line}");
        }
    }

    /// Text form of an event, `None` if it is not shown.
    pub fn text(&self, event: &Event) -> Option<String> {
        match event {
            Event::GoalAdded { message, .. } => Some(message.clone()),
            Event::TimerStarted {
                row, description, ..
            } => Some(format!("Timer started for goal: {description} (row {})", row + 1)),
            Event::TimerTick { row, display, .. } => {
                self.show_ticks.then(|| format!("[{}] {display}", row + 1))
            }
            Event::TimerExpired { message, .. } => Some(message.clone()),
            Event::TimerCancelled { row, .. } => {
                Some(format!("Timer cancelled (row {})", row + 1))
            }
            Event::StateSnapshot { .. } => serde_json::to_string_pretty(event).ok(),
        }
    }

    /// Show a recoverable error the way a dialog would.
    pub fn error(&self, err: &CoreError) {
        self.message("Error", &err.user_message());
    }

    pub fn message(&self, kind: &str, text: &str) {
        if self.json {
            println!("{}", serde_json::json!({ "type": kind, "message": text }));
        } else {
            println!("{text}");
        }
    }

    pub fn table(&self, rows: &[GoalRow]) {
        if self.json {
            match serde_json::to_string(rows) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!(error = %e, "rows not serializable"),
            }
            return;
        }
        print!("{}", render_table(rows));
    }
}

/// Three-column goal table with a 1-based row number.
pub fn render_table(rows: &[GoalRow]) -> String {
    const HEADERS: [&str; 4] = ["#", "Goal", "Timer", "Countdown"];

    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|r| {
            [
                (r.row + 1).to_string(),
                r.description.clone(),
                r.minutes.to_string(),
                r.countdown.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |fields: [&str; 4]| -> String {
        let padded: Vec<String> = fields
            .iter()
            .zip(widths)
            .map(|(f, w)| format!("{f:<w$}"))
            .collect();
        format!("{}\n", padded.join(" | ").trim_end())
    };

    let mut out = line(HEADERS);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&format!("{}\n", rule.join("-+-")));
    if cells.is_empty() {
        out.push_str("(no goals yet)\n");
    }
    for row in &cells {
        out.push_str(&line([&row[0], &row[1], &row[2], &row[3]]));
    }
    out
}

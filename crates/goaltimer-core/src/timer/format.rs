//! Countdown display formatting.
//!
//! Renders remaining seconds as a clock-face `mm:ss` string. The hour is not
//! shown, so minutes wrap at 60.
//!
//! Values below thirty minutes are shifted up by thirty minutes before they
//! are rendered: `59` seconds displays as `30:59`, the same as `1859`. This
//! is the long-standing display contract of the countdown column and is on
//! by default; [`CountdownFormat::thirty_minute_offset`] turns it off.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Remaining-time values below this are shifted by the same amount.
pub const OFFSET_THRESHOLD_SECS: u64 = 30 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownFormat {
    pub thirty_minute_offset: bool,
}

impl Default for CountdownFormat {
    fn default() -> Self {
        Self {
            thirty_minute_offset: true,
        }
    }
}

impl CountdownFormat {
    pub fn new(thirty_minute_offset: bool) -> Self {
        Self {
            thirty_minute_offset,
        }
    }

    pub fn format(&self, seconds: u64) -> String {
        let shown = if self.thirty_minute_offset && seconds < OFFSET_THRESHOLD_SECS {
            seconds + OFFSET_THRESHOLD_SECS
        } else {
            seconds
        };
        let minutes = (shown / 60) % 60;
        let secs = shown % 60;
        format!("{minutes:02}:{secs:02}")
    }
}

/// Format with the default display rules (offset on).
pub fn format_countdown(seconds: u64) -> String {
    CountdownFormat::default().format(seconds)
}

/// Signed variant for callers holding raw integers.
///
/// # Errors
///
/// Returns [`CoreError::InvalidArgument`] for negative input.
pub fn try_format_countdown(seconds: i64) -> Result<String> {
    let seconds = u64::try_from(seconds).map_err(|_| {
        CoreError::InvalidArgument(format!("cannot format negative duration: {seconds}s"))
    })?;
    Ok(format_countdown(seconds))
}

//! Elapsed-time breakdown for activities and report totals.
//!
//! Turns a `(start, end)` pair, or an already summed `chrono::Duration`, into
//! the four representations used across reports:
//!
//! - whole hours (floored)
//! - minutes left over after removing the whole hours
//! - decimal hours, unrounded (`1:45 h` is `1.75`)
//! - the display string `"{hours}:{minutes:02} h"`
//!
//! Seconds never show up in the formatted value; they only contribute to
//! `decimal_hours`. Sums are always computed on the exact `Duration` and
//! broken down once at the end, so rounding never compounds across entries.
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use timebook::libs::duration::duration;
//!
//! let start = Utc.with_ymd_and_hms(2024, 3, 4, 11, 0, 0).unwrap();
//! let end = Utc.with_ymd_and_hms(2024, 3, 4, 12, 30, 0).unwrap();
//! let d = duration(start, end)?;
//! assert_eq!(d.formatted, "1:30 h");
//! # Ok::<(), timebook::libs::error::ReportError>(())
//! ```

use crate::libs::error::ReportError;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Duration of an interval broken down for display and export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityDuration {
    pub hours: i64,
    pub minutes_remainder: i64,
    pub decimal_hours: f64,
    pub formatted: String,
}

impl ActivityDuration {
    pub fn zero() -> Self {
        Self {
            hours: 0,
            minutes_remainder: 0,
            decimal_hours: 0.0,
            formatted: format_minutes(0),
        }
    }

    /// Breaks down an elapsed duration. Negative durations are rejected by
    /// [`duration`] before they get here, so they are treated as zero.
    pub fn from_elapsed(elapsed: Duration) -> Self {
        if elapsed <= Duration::zero() {
            return Self::zero();
        }

        let total_minutes = elapsed.num_minutes();
        let seconds = elapsed.num_milliseconds() as f64 / 1000.0;

        Self {
            hours: total_minutes / 60,
            minutes_remainder: total_minutes % 60,
            decimal_hours: seconds / 3600.0,
            formatted: format_minutes(total_minutes),
        }
    }
}

/// Computes the duration between `start` and `end`.
///
/// # Errors
///
/// Returns [`ReportError::InvalidInterval`] when `end` lies before `start`.
/// Callers are expected to validate intervals when entries are created, so
/// this signals a bug upstream rather than bad user input.
pub fn duration(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<ActivityDuration, ReportError> {
    elapsed(start, end).map(ActivityDuration::from_elapsed)
}

/// The exact elapsed time between `start` and `end`.
pub fn elapsed(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Duration, ReportError> {
    if end < start {
        return Err(ReportError::InvalidInterval { start, end });
    }
    Ok(end - start)
}

/// Formats a number of minutes as `"H:MM h"`, e.g. `75` → `"1:15 h"`.
pub fn format_minutes(total_minutes: i64) -> String {
    let total_minutes = total_minutes.max(0);
    format!("{}:{:02} h", total_minutes / 60, total_minutes % 60)
}

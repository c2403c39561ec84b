//! Date and time formatting utilities for user-friendly display.
//!
//! This module keeps every date/time text format of the application in one
//! place so that window labels, tables and command-line input agree.
//!
//! ## Format Specifications
//!
//! - **Date**: `YYYY-MM-DD` (`2024-03-04`), used by tokens and tables
//! - **Short date**: `D.M.` (`4.3.`), used by human-readable window labels
//! - **Time**: `HH:MM` in 24-hour format (`09:05`)
//! - **Date time input**: `YYYY-MM-DD HH:MM`, interpreted in UTC
//!
//! ## Time Completion
//!
//! Typed times are often sloppy. [`complete_time_value`] accepts the usual
//! shorthands and turns them into `HH:MM`:
//!
//! - `9` → `09:00`
//! - `11,5` → `11:30` (decimal hours after the comma)
//! - `11,25` → `11:15`
//! - `11.30` or `11/30` → `11:30`
//!
//! ## Examples
//!
//! ```rust
//! use timebook::libs::formatter::{complete_time_value, format_date_short};
//! use chrono::NaiveDate;
//!
//! assert_eq!(complete_time_value("11,5"), "11:30");
//! let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
//! assert_eq!(format_date_short(date), "4.3.");
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_FORMAT_SHORT: &str = "%-d.%-m.";
pub const TIME_FORMAT: &str = "%H:%M";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats a date as the compact `D.M.` form used in range labels.
pub fn format_date_short(date: NaiveDate) -> String {
    date.format(DATE_FORMAT_SHORT).to_string()
}

pub fn format_time(instant: DateTime<Utc>) -> String {
    instant.format(TIME_FORMAT).to_string()
}

/// Parses `YYYY-MM-DD HH:MM` as a UTC instant.
pub fn parse_date_time(value: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), DATE_TIME_FORMAT)
        .with_context(|| format!("could not parse date time from '{}'", value))?;
    Ok(naive.and_utc())
}

/// Parses an `HH:MM` time, completing shorthand input first.
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    let completed = complete_time_value(value);
    NaiveTime::parse_from_str(&completed, TIME_FORMAT).with_context(|| format!("could not parse time from '{}'", value))
}

/// Normalises loosely typed time input to `HH:MM`.
///
/// Values that cannot be interpreted are returned unchanged so that the
/// subsequent parse reports the original input.
pub fn complete_time_value(time: &str) -> String {
    let completed = time
        .trim()
        .replace(",,", ":")
        .replace('/', ":")
        .replace(';', ",")
        .replace('.', ":");

    // 11,25 is a quarter past eleven, not 11:25
    if let Some((hh, mm)) = completed.split_once(',') {
        let mut mm = mm.to_string();
        if mm.len() < 2 {
            mm.push('0');
        }
        let fraction: f64 = match mm.parse() {
            Ok(value) => value,
            Err(_) => return time.to_string(),
        };
        let minutes = (fraction * 0.6).round();
        let hh = if hh.len() < 2 { format!("0{}", hh) } else { hh.to_string() };
        return format!("{}:{:02.0}", hh, minutes);
    }

    if completed.contains(':') {
        return completed;
    }

    if completed.parse::<i32>().is_err() {
        return time.to_string();
    }

    if completed.len() < 2 {
        format!("0{}:00", completed)
    } else {
        format!("{}:00", completed)
    }
}

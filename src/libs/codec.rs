//! Window tokens and report view parameters.
//!
//! Windows travel through query strings and command-line flags as a pair of
//! a granularity selector (`t`) and a value token (`v`). This module parses
//! that untrusted input into a [`TimeWindow`] and renders windows back.
//!
//! ## Token Grammars
//!
//! - **year**: exactly four digits, `2024`
//! - **quarter**: `YYYY-Q` with `Q` in 1..=4, `2024-3`
//! - **month**: `YYYY-MM`, `2024-03`
//! - **week**: `YYYY-W` with the ISO week-numbering year, `2020-1`
//! - **day**: `YYYY-MM-DD`, `2024-03-04`
//! - **custom**: `YYYY-MM-DD_YYYY-MM-DD` with an inclusive last day, or the
//!   separate `start`/`end` parameters handled by [`WindowQuery`]
//!
//! A token that fails its grammar is a [`ReportError::Parse`]; nothing is
//! silently corrected. For every granularity the token produced by
//! [`TimeWindow::label`] parses back into the same window.

use crate::libs::error::ReportError;
use crate::libs::window::{first_month_of_quarter, midnight, Granularity, TimeWindow};
use crate::libs::aggregate::Bucketing;
use chrono::{DateTime, Days, NaiveDate, Utc, Weekday};
use std::fmt;

/// Earliest instant a custom window with an open start reaches back to.
pub fn unbounded_start() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .map(midnight)
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Parses `token` as a window of `granularity`.
pub fn parse_window(granularity: Granularity, token: &str) -> Result<TimeWindow, ReportError> {
    let token = token.trim();
    let invalid = || ReportError::parse(format!("invalid {} '{}'", granularity, token));

    match granularity {
        Granularity::Year => {
            let year = number(token, 4, 4).ok_or_else(invalid)?;
            let start = NaiveDate::from_ymd_opt(year as i32, 1, 1).ok_or_else(invalid)?;
            TimeWindow::new(granularity, midnight(start))
        }
        Granularity::Quarter => {
            let (year, quarter) = token.split_once('-').ok_or_else(invalid)?;
            let year = number(year, 4, 4).ok_or_else(invalid)?;
            let quarter = number(quarter, 1, 1).filter(|q| (1..=4).contains(q)).ok_or_else(invalid)?;
            let start = NaiveDate::from_ymd_opt(year as i32, first_month_of_quarter(quarter), 1).ok_or_else(invalid)?;
            TimeWindow::new(granularity, midnight(start))
        }
        Granularity::Month => {
            let (year, month) = token.split_once('-').ok_or_else(invalid)?;
            let year = number(year, 4, 4).ok_or_else(invalid)?;
            let month = number(month, 2, 2).ok_or_else(invalid)?;
            let start = NaiveDate::from_ymd_opt(year as i32, month, 1).ok_or_else(invalid)?;
            TimeWindow::new(granularity, midnight(start))
        }
        Granularity::Week => {
            let (year, week) = token.split_once('-').ok_or_else(invalid)?;
            let year = number(year, 4, 4).ok_or_else(invalid)?;
            let week = number(week, 1, 2).ok_or_else(invalid)?;
            let monday = NaiveDate::from_isoywd_opt(year as i32, week, Weekday::Mon).ok_or_else(invalid)?;
            TimeWindow::new(granularity, midnight(monday))
        }
        Granularity::Day => {
            let day = parse_date(token).ok_or_else(invalid)?;
            TimeWindow::new(granularity, midnight(day))
        }
        Granularity::Custom => {
            let (start, last_day) = token.split_once('_').ok_or_else(invalid)?;
            let start = parse_date(start).ok_or_else(invalid)?;
            let end = parse_date(last_day)
                .and_then(|day| day.checked_add_days(Days::new(1)))
                .ok_or_else(invalid)?;
            custom_window(midnight(start), midnight(end))
        }
    }
}

/// Renders the token of `window`; the inverse of [`parse_window`].
pub fn render_window(window: &TimeWindow) -> String {
    window.label()
}

/// Raw window parameters as they arrive from a request or the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowQuery<'a> {
    /// Granularity selector (`t`). Missing means custom.
    pub timespan: Option<&'a str>,
    /// Value token (`v`). Missing means the current period.
    pub value: Option<&'a str>,
    /// Custom range start (`start`), `YYYY-MM-DD`.
    pub start: Option<&'a str>,
    /// Custom range exclusive end (`end`), `YYYY-MM-DD`.
    pub end: Option<&'a str>,
}

impl<'a> WindowQuery<'a> {
    /// Resolves the parameters into a window, using `now` for defaults.
    ///
    /// Custom ranges with only one bound are open on the other side: a
    /// missing start reaches back to [`unbounded_start`], a missing end
    /// covers everything up to and including the day of `now`. A custom
    /// query with neither bound nor value is rejected.
    pub fn parse(&self, now: DateTime<Utc>) -> Result<TimeWindow, ReportError> {
        let granularity = match self.timespan.map(str::trim).filter(|t| !t.is_empty()) {
            Some(selector) => selector
                .parse::<Granularity>()
                .map_err(|_| ReportError::parse(format!("invalid timespan '{}'", selector)))?,
            None => Granularity::Custom,
        };
        let value = self.value.map(str::trim).filter(|v| !v.is_empty());

        if granularity != Granularity::Custom {
            return match value {
                Some(token) => parse_window(granularity, token),
                None => TimeWindow::new(granularity, now),
            };
        }

        if let Some(token) = value {
            return parse_window(granularity, token);
        }

        let start = optional_date(self.start, "start")?;
        let end = optional_date(self.end, "end")?;
        let (start, end) = match (start, end) {
            (None, None) => return Err(ReportError::parse("missing timespan value")),
            (Some(start), Some(end)) => (midnight(start), midnight(end)),
            (Some(start), None) => (midnight(start), end_of_today(now)?),
            (None, Some(end)) => (unbounded_start(), midnight(end)),
        };

        custom_window(start, end)
    }
}

fn end_of_today(now: DateTime<Utc>) -> Result<DateTime<Utc>, ReportError> {
    now.date_naive()
        .checked_add_days(Days::new(1))
        .map(midnight)
        .ok_or_else(|| ReportError::parse("end of range out of range"))
}

fn custom_window(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<TimeWindow, ReportError> {
    if end < start {
        return Err(ReportError::parse(format!("range ends before it starts ({} < {})", end.date_naive(), start.date_naive())));
    }
    TimeWindow::custom(start, end)
}

fn optional_date(value: Option<&str>, name: &str) -> Result<Option<NaiveDate>, ReportError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => parse_date(value)
            .map(Some)
            .ok_or_else(|| ReportError::parse(format!("invalid {} date '{}'", name, value))),
        None => Ok(None),
    }
}

/// Strict `YYYY-MM-DD`.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let mut parts = value.splitn(3, '-');
    let year = number(parts.next()?, 4, 4)?;
    let month = number(parts.next()?, 2, 2)?;
    let day = number(parts.next()?, 2, 2)?;
    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// An unsigned number of `min..=max` ASCII digits.
fn number(value: &str, min: usize, max: usize) -> Option<u32> {
    if value.len() < min || value.len() > max || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// Which report is shown for a window (`c` parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportView {
    General,
    Time(Bucketing),
    Project,
    Tag,
}

impl ReportView {
    /// Parses `general`, `project`, `tag`, `time` or `time:<d|w|m|q>`.
    ///
    /// The time sub-view is clamped to what `window` can show, so a request
    /// for quarters inside a week window falls back to weeks.
    pub fn parse(param: Option<&str>, window: &TimeWindow) -> Result<Self, ReportError> {
        let param = param.map(str::trim).filter(|p| !p.is_empty()).unwrap_or("general");
        let (main, sub) = match param.split_once(':') {
            Some((main, sub)) => (main, Some(sub)),
            None => (param, None),
        };

        match main {
            "general" => Ok(ReportView::General),
            "project" => Ok(ReportView::Project),
            "tag" => Ok(ReportView::Tag),
            "time" => {
                let requested = sub.and_then(Bucketing::from_code).unwrap_or(Bucketing::Day);
                Ok(ReportView::Time(requested.clamp_to(window)))
            }
            other => Err(ReportError::parse(format!("unknown report view '{}'", other))),
        }
    }

    pub fn as_param(&self) -> String {
        match self {
            ReportView::General => "general".to_string(),
            ReportView::Project => "project".to_string(),
            ReportView::Tag => "tag".to_string(),
            ReportView::Time(bucketing) => format!("time:{}", bucketing.code()),
        }
    }
}

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_param())
    }
}

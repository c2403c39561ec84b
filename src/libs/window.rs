//! Calendar-aligned time windows.
//!
//! A [`TimeWindow`] is a half-open interval `[start, end)` together with the
//! [`Granularity`] that produced it. For every granularity except
//! [`Granularity::Custom`] the end is derived from the start by adding one
//! calendar unit, and the start is snapped to the beginning of the period
//! that contains the anchor:
//!
//! | Granularity | Start                      | End           | Label       |
//! |-------------|----------------------------|---------------|-------------|
//! | Day         | midnight                   | + 1 day       | `2024-03-04`|
//! | Week        | Monday of the ISO week     | + 7 days      | `2024-10`   |
//! | Month       | first of the month         | + 1 month     | `2024-03`   |
//! | Quarter     | first of the quarter       | + 3 months    | `2024-1`    |
//! | Year        | January 1st                | + 1 year      | `2024`      |
//! | Custom      | as given                   | as given      | `2024-03-04_2024-03-10` |
//!
//! Months are added as calendar months, never as a fixed number of days, so
//! month and quarter windows have variable elapsed lengths. Week labels use
//! the ISO week-numbering year: 2018-12-31 is in week `2019-1`.
//!
//! Windows are immutable. [`TimeWindow::next`] and [`TimeWindow::previous`]
//! return new windows shifted by exactly one unit; custom windows shift by
//! their own elapsed length so paging tiles ranges without gaps.
//!
//! All instants are UTC, the single reference zone of the application.

use crate::libs::error::ReportError;
use crate::libs::formatter::{format_date, format_date_short};
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    Month,
    Quarter,
    Year,
    Custom,
}

/// One calendar unit of a granularity.
#[derive(Debug, Clone, Copy)]
enum Step {
    Days(u64),
    Months(u32),
}

impl Granularity {
    pub const ALL: [Granularity; 6] = [
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Quarter,
        Granularity::Year,
        Granularity::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Quarter => "quarter",
            Granularity::Year => "year",
            Granularity::Custom => "custom",
        }
    }

    fn step(&self) -> Option<Step> {
        match self {
            Granularity::Day => Some(Step::Days(1)),
            Granularity::Week => Some(Step::Days(7)),
            Granularity::Month => Some(Step::Months(1)),
            Granularity::Quarter => Some(Step::Months(3)),
            Granularity::Year => Some(Step::Months(12)),
            Granularity::Custom => None,
        }
    }
}

impl FromStr for Granularity {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Granularity::ALL
            .into_iter()
            .find(|granularity| granularity.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ReportError::invalid_window(format!("unknown granularity '{}'", s)))
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quarter (1-4) of a month (1-12).
pub fn quarter_of(month: u32) -> u32 {
    (month + 2) / 3
}

/// First month (1, 4, 7 or 10) of a quarter.
pub fn first_month_of_quarter(quarter: u32) -> u32 {
    3 * (quarter - 1) + 1
}

pub(crate) fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn shift(instant: DateTime<Utc>, step: Step, forward: bool) -> Option<DateTime<Utc>> {
    match (step, forward) {
        (Step::Days(n), true) => instant.checked_add_days(Days::new(n)),
        (Step::Days(n), false) => instant.checked_sub_days(Days::new(n)),
        (Step::Months(n), true) => instant.checked_add_months(Months::new(n)),
        (Step::Months(n), false) => instant.checked_sub_months(Months::new(n)),
    }
}

/// `instant` moved forward by one unit of `granularity`; `None` for custom.
pub(crate) fn advance(granularity: Granularity, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
    shift(instant, granularity.step()?, true)
}

/// First day of the period of `granularity` that contains `date`.
fn period_start(granularity: Granularity, date: NaiveDate) -> Option<NaiveDate> {
    match granularity {
        Granularity::Day | Granularity::Custom => Some(date),
        Granularity::Week => date.checked_sub_days(Days::new(date.weekday().num_days_from_monday() as u64)),
        Granularity::Month => NaiveDate::from_ymd_opt(date.year(), date.month(), 1),
        Granularity::Quarter => NaiveDate::from_ymd_opt(date.year(), first_month_of_quarter(quarter_of(date.month())), 1),
        Granularity::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeWindow {
    granularity: Granularity,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates the window of `granularity` that contains `anchor`.
    ///
    /// # Errors
    ///
    /// [`ReportError::InvalidWindow`] for [`Granularity::Custom`], which has
    /// no derivable end (use [`TimeWindow::custom`]), or when the window
    /// would leave the representable calendar.
    pub fn new(granularity: Granularity, anchor: DateTime<Utc>) -> Result<Self, ReportError> {
        let step = granularity
            .step()
            .ok_or_else(|| ReportError::invalid_window("custom windows need an explicit end"))?;
        let start = period_start(granularity, anchor.date_naive())
            .map(midnight)
            .ok_or_else(|| ReportError::invalid_window(format!("no {} contains {}", granularity, anchor)))?;
        let end = shift(start, step, true)
            .ok_or_else(|| ReportError::invalid_window(format!("{} after {} is out of range", granularity, start)))?;

        Ok(Self { granularity, start, end })
    }

    /// Creates a custom window over `[start, end)`.
    pub fn custom(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ReportError> {
        if end < start {
            return Err(ReportError::invalid_window(format!("custom window ends ({}) before it starts ({})", end, start)));
        }
        Ok(Self {
            granularity: Granularity::Custom,
            start,
            end,
        })
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end of the window.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn elapsed(&self) -> chrono::Duration {
        self.end - self.start
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// The window directly after this one.
    ///
    /// Saturates: a window at the edge of the representable calendar is
    /// returned unchanged.
    pub fn next(&self) -> Self {
        self.shifted(true).unwrap_or(*self)
    }

    /// The window directly before this one. Saturates like [`TimeWindow::next`].
    pub fn previous(&self) -> Self {
        self.shifted(false).unwrap_or(*self)
    }

    fn shifted(&self, forward: bool) -> Option<Self> {
        match self.granularity.step() {
            Some(step) => {
                let start = shift(self.start, step, forward)?;
                let end = shift(start, step, true)?;
                Some(Self { start, end, ..*self })
            }
            None => {
                let length = self.elapsed();
                let (start, end) = if forward {
                    (self.start.checked_add_signed(length)?, self.end.checked_add_signed(length)?)
                } else {
                    (self.start.checked_sub_signed(length)?, self.end.checked_sub_signed(length)?)
                };
                Some(Self { start, end, ..*self })
            }
        }
    }

    /// The window of the same granularity for the current period.
    ///
    /// Custom windows keep their elapsed length and start at the beginning of
    /// the day of `now`.
    pub fn home(&self, now: DateTime<Utc>) -> Result<Self, ReportError> {
        match self.granularity {
            Granularity::Custom => {
                let start = midnight(now.date_naive());
                let end = start
                    .checked_add_signed(self.elapsed())
                    .ok_or_else(|| ReportError::invalid_window("custom window out of range"))?;
                Self::custom(start, end)
            }
            granularity => Self::new(granularity, now),
        }
    }

    /// Last day touched by the window, never before the first one.
    pub fn last_day(&self) -> NaiveDate {
        let first = self.start.date_naive();
        self.end
            .checked_sub_signed(chrono::Duration::nanoseconds(1))
            .map_or(first, |last| last.date_naive())
            .max(first)
    }

    /// Compact key of the window, also used as its token in query strings.
    pub fn label(&self) -> String {
        let start = self.start.date_naive();
        match self.granularity {
            Granularity::Day => format_date(start),
            Granularity::Week => {
                let week = start.iso_week();
                format!("{}-{}", week.year(), week.week())
            }
            Granularity::Month => start.format("%Y-%m").to_string(),
            Granularity::Quarter => format!("{}-{}", start.format("%Y"), quarter_of(start.month())),
            Granularity::Year => start.format("%Y").to_string(),
            Granularity::Custom => format!("{}_{}", format_date(start), format_date(self.last_day())),
        }
    }

    /// Human-readable label such as `4.3.` or `4.3. - 10.3.`.
    pub fn formatted_label(&self) -> String {
        let start = format_date_short(self.start.date_naive());
        match self.granularity {
            Granularity::Day => start,
            _ => format!("{} - {}", start, format_date_short(self.last_day())),
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.granularity, self.label())
    }
}

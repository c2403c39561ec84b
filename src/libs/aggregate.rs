//! Bucketed duration totals.
//!
//! Entries are assigned to exactly one bucket by their start instant; an
//! entry that crosses midnight or a week boundary counts fully towards the
//! bucket it started in. Totals are exact `chrono::Duration` sums and are
//! only broken down into hours and minutes for display, so the sum of all
//! bucket totals always equals the sum of all entry durations.
//!
//! Buckets come out in ascending chronological order regardless of the order
//! the entries were fetched in. Project and tag totals are sorted by name.

use crate::libs::activity::{Activity, Project};
use crate::libs::duration::ActivityDuration;
use crate::libs::error::ReportError;
use crate::libs::window::{advance, first_month_of_quarter, midnight, quarter_of, Granularity, TimeWindow};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Granularity a time report is bucketed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Bucketing {
    Day,
    Week,
    Month,
    Quarter,
}

impl Bucketing {
    /// Coarsest first.
    const COARSEST_FIRST: [Bucketing; 4] = [Bucketing::Quarter, Bucketing::Month, Bucketing::Week, Bucketing::Day];

    pub fn code(&self) -> &'static str {
        match self {
            Bucketing::Day => "d",
            Bucketing::Week => "w",
            Bucketing::Month => "m",
            Bucketing::Quarter => "q",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "d" => Some(Bucketing::Day),
            "w" => Some(Bucketing::Week),
            "m" => Some(Bucketing::Month),
            "q" => Some(Bucketing::Quarter),
            _ => None,
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            Bucketing::Day => Granularity::Day,
            Bucketing::Week => Granularity::Week,
            Bucketing::Month => Granularity::Month,
            Bucketing::Quarter => Granularity::Quarter,
        }
    }

    /// Key of the bucket `instant` falls into.
    pub fn key_of(&self, instant: DateTime<Utc>) -> BucketKey {
        let date = instant.date_naive();
        match self {
            Bucketing::Day => BucketKey::Day(date),
            Bucketing::Week => {
                let week = date.iso_week();
                BucketKey::Week {
                    year: week.year(),
                    week: week.week(),
                }
            }
            Bucketing::Month => BucketKey::Month {
                year: date.year(),
                month: date.month(),
            },
            Bucketing::Quarter => BucketKey::Quarter {
                year: date.year(),
                quarter: quarter_of(date.month()),
            },
        }
    }

    /// The finest of `self` and the coarsest bucketing `window` can show.
    ///
    /// Day windows only show days, week windows at most weeks, month windows
    /// at most months, quarter and year windows at most quarters. A custom
    /// window allows the coarsest bucketing whose first unit ends inside it.
    pub fn clamp_to(self, window: &TimeWindow) -> Self {
        let widest = match window.granularity() {
            Granularity::Day => Bucketing::Day,
            Granularity::Week => Bucketing::Week,
            Granularity::Month => Bucketing::Month,
            Granularity::Quarter | Granularity::Year => Bucketing::Quarter,
            Granularity::Custom => Self::COARSEST_FIRST
                .into_iter()
                .find(|bucketing| {
                    advance(bucketing.granularity(), window.start()).is_some_and(|end| end <= window.end())
                })
                .unwrap_or(Bucketing::Day),
        };
        self.min(widest)
    }
}

impl fmt::Display for Bucketing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.granularity().as_str())
    }
}

/// Identity of a bucket. Keys of one bucketing order chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BucketKey {
    Day(NaiveDate),
    Week { year: i32, week: u32 },
    Month { year: i32, month: u32 },
    Quarter { year: i32, quarter: u32 },
}

impl BucketKey {
    pub fn bucketing(&self) -> Bucketing {
        match self {
            BucketKey::Day(_) => Bucketing::Day,
            BucketKey::Week { .. } => Bucketing::Week,
            BucketKey::Month { .. } => Bucketing::Month,
            BucketKey::Quarter { .. } => Bucketing::Quarter,
        }
    }

    /// First day of the bucket.
    pub fn start_date(&self) -> Option<NaiveDate> {
        match *self {
            BucketKey::Day(date) => Some(date),
            BucketKey::Week { year, week } => NaiveDate::from_isoywd_opt(year, week, Weekday::Mon),
            BucketKey::Month { year, month } => NaiveDate::from_ymd_opt(year, month, 1),
            BucketKey::Quarter { year, quarter } => NaiveDate::from_ymd_opt(year, first_month_of_quarter(quarter), 1),
        }
    }

    pub fn to_window(&self) -> Result<TimeWindow, ReportError> {
        let start = self
            .start_date()
            .ok_or_else(|| ReportError::invalid_window(format!("no calendar period for bucket {:?}", self)))?;
        TimeWindow::new(self.bucketing().granularity(), midnight(start))
    }

    /// Same text as the label of the matching window.
    pub fn label(&self) -> String {
        match *self {
            BucketKey::Day(date) => date.format("%Y-%m-%d").to_string(),
            BucketKey::Week { year, week } => format!("{}-{}", year, week),
            BucketKey::Month { year, month } => format!("{}-{:02}", year, month),
            BucketKey::Quarter { year, quarter } => format!("{}-{}", year, quarter),
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportBucket {
    pub key: BucketKey,
    #[serde(skip)]
    pub total: Duration,
    pub count: usize,
}

impl ReportBucket {
    pub fn duration(&self) -> ActivityDuration {
        ActivityDuration::from_elapsed(self.total)
    }
}

/// Sums `entries` into buckets of `bucketing`, ascending by key.
///
/// # Errors
///
/// [`ReportError::InvalidInterval`] if an entry ends before it starts.
pub fn aggregate(entries: &[Activity], bucketing: Bucketing) -> Result<Vec<ReportBucket>, ReportError> {
    let mut buckets: BTreeMap<BucketKey, (Duration, usize)> = BTreeMap::new();

    for entry in entries {
        let elapsed = entry.elapsed()?;
        let slot = buckets
            .entry(bucketing.key_of(entry.start))
            .or_insert((Duration::zero(), 0));
        slot.0 += elapsed;
        slot.1 += 1;
    }

    Ok(buckets
        .into_iter()
        .map(|(key, (total, count))| ReportBucket { key, total, count })
        .collect())
}

/// Sum of all bucket totals.
pub fn total(buckets: &[ReportBucket]) -> Duration {
    buckets.iter().fold(Duration::zero(), |sum, bucket| sum + bucket.total)
}

/// Total time spent on one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReportItem {
    pub project_id: i64,
    pub title: String,
    #[serde(skip)]
    pub total: Duration,
    pub count: usize,
}

impl ProjectReportItem {
    pub fn duration(&self) -> ActivityDuration {
        ActivityDuration::from_elapsed(self.total)
    }
}

/// Sums `entries` per project, sorted by project title and then id.
///
/// Entries whose project is not in `projects` are kept under an empty title.
pub fn aggregate_by_project(entries: &[Activity], projects: &[Project]) -> Result<Vec<ProjectReportItem>, ReportError> {
    let titles: HashMap<i64, &str> = projects
        .iter()
        .filter_map(|project| project.id.map(|id| (id, project.title.as_str())))
        .collect();

    let mut sums: HashMap<i64, (Duration, usize)> = HashMap::new();
    for entry in entries {
        let elapsed = entry.elapsed()?;
        let slot = sums.entry(entry.project_id).or_insert((Duration::zero(), 0));
        slot.0 += elapsed;
        slot.1 += 1;
    }

    let mut items: Vec<ProjectReportItem> = sums
        .into_iter()
        .map(|(project_id, (total, count))| ProjectReportItem {
            project_id,
            title: titles.get(&project_id).map(|t| t.to_string()).unwrap_or_default(),
            total,
            count,
        })
        .collect();
    items.sort_by(|a, b| a.title.cmp(&b.title).then(a.project_id.cmp(&b.project_id)));

    Ok(items)
}

/// Total time spent on activities carrying one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagReportItem {
    pub tag: String,
    #[serde(skip)]
    pub total: Duration,
    pub count: usize,
}

impl TagReportItem {
    pub fn duration(&self) -> ActivityDuration {
        ActivityDuration::from_elapsed(self.total)
    }
}

/// Sums `entries` per tag, sorted by tag name.
///
/// An activity with several tags counts fully towards each of them, and
/// untagged activities are left out. A non-empty `only` limits the report
/// to those tags.
pub fn aggregate_by_tag(entries: &[Activity], only: &[String]) -> Result<Vec<TagReportItem>, ReportError> {
    let mut sums: BTreeMap<&str, (Duration, usize)> = BTreeMap::new();
    for entry in entries {
        let elapsed = entry.elapsed()?;
        for tag in &entry.tags {
            if !only.is_empty() && !only.contains(tag) {
                continue;
            }
            let slot = sums.entry(tag.as_str()).or_insert((Duration::zero(), 0));
            slot.0 += elapsed;
            slot.1 += 1;
        }
    }

    Ok(sums
        .into_iter()
        .map(|(tag, (total, count))| TagReportItem {
            tag: tag.to_string(),
            total,
            count,
        })
        .collect())
}

use crate::libs::duration::{elapsed, ActivityDuration};
use crate::libs::error::ReportError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tracked time entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Option<i64>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub description: String,
    pub project_id: i64,
    pub organization_id: i64,
    pub username: String,
    /// Normalized tag names, sorted.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Activity {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, description: &str, project_id: i64) -> Self {
        Activity {
            id: None,
            start,
            end,
            description: description.to_string(),
            project_id,
            organization_id: 0,
            username: String::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn elapsed(&self) -> Result<Duration, ReportError> {
        elapsed(self.start, self.end)
    }

    pub fn duration(&self) -> Result<ActivityDuration, ReportError> {
        self.elapsed().map(ActivityDuration::from_elapsed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub active: bool,
    pub organization_id: i64,
}

impl Project {
    pub fn new(title: &str, description: &str) -> Self {
        Project {
            id: None,
            title: title.to_string(),
            description: description.to_string(),
            active: true,
            organization_id: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Start,
    Project,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Ordering of activity lists, written as `field:order` (`start:desc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActivitySort {
    pub field: SortField,
    pub order: SortOrder,
}

impl ActivitySort {
    /// Parses `field:order`, falling back to the default on anything unknown.
    pub fn parse(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }

    /// Sort by `field`, flipping the order when already sorted by it.
    pub fn toggled(&self, field: SortField) -> Self {
        if self.field == field {
            ActivitySort {
                field,
                order: self.order.reversed(),
            }
        } else {
            ActivitySort {
                field,
                order: SortOrder::default(),
            }
        }
    }
}

impl FromStr for ActivitySort {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, order) = s.trim().split_once(':').unwrap_or((s.trim(), "desc"));
        let field = match field.to_ascii_lowercase().as_str() {
            "start" => SortField::Start,
            "project" => SortField::Project,
            other => return Err(ReportError::parse(format!("unknown sort field '{}'", other))),
        };
        let order = match order.to_ascii_lowercase().as_str() {
            "asc" => SortOrder::Asc,
            "desc" => SortOrder::Desc,
            other => return Err(ReportError::parse(format!("unknown sort order '{}'", other))),
        };
        Ok(ActivitySort { field, order })
    }
}

impl fmt::Display for ActivitySort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = match self.field {
            SortField::Start => "start",
            SortField::Project => "project",
        };
        let order = match self.order {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        };
        write!(f, "{}:{}", field, order)
    }
}

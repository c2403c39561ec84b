//! Report orchestration.
//!
//! [`Reports`] composes the visibility filter, paged reads from an
//! [`ActivityStore`] and the aggregator into the three reports of a window:
//!
//! - **activities**: one page of the visible activities plus the projects
//!   they reference
//! - **time**: every visible activity of the window summed into buckets
//! - **project**: every visible activity of the window summed per project
//! - **tag**: every visible activity of the window summed per tag
//!
//! [`Reports::with_tags`] narrows all of them to activities carrying at
//! least one of the given tags.
//!
//! The stores are collaborators behind traits; the orchestrator neither
//! retries nor times out, and store failures surface as
//! [`ReportError::Store`].

use crate::libs::activity::{Activity, ActivitySort, Project, SortField, SortOrder};
use crate::libs::aggregate::{
    aggregate, aggregate_by_project, aggregate_by_tag, total, Bucketing, ProjectReportItem, ReportBucket, TagReportItem,
};
use crate::libs::error::ReportError;
use crate::libs::paged::{ActivitiesPage, Page, PageParams};
use crate::libs::visibility::{build_visibility_filter, ActivityFilter, Identity};
use crate::libs::window::TimeWindow;
use chrono::Duration;
use std::collections::BTreeSet;
use tracing::debug;

/// Paged read access to activities.
pub trait ActivityStore {
    fn find(&self, filter: &ActivityFilter, page: &PageParams) -> anyhow::Result<ActivitiesPage>;
}

/// Lookup of projects by id within one organization.
pub trait ProjectStore {
    fn find_by_ids(&self, organization_id: i64, ids: &[i64]) -> anyhow::Result<Vec<Project>>;
}

#[derive(Debug, Clone)]
pub struct ActivitiesReport {
    pub window: TimeWindow,
    pub activities: Vec<Activity>,
    pub projects: Vec<Project>,
    pub page: Page,
}

impl ActivitiesReport {
    pub fn project_title(&self, project_id: i64) -> Option<&str> {
        self.projects
            .iter()
            .find(|project| project.id == Some(project_id))
            .map(|project| project.title.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct TimeReport {
    pub window: TimeWindow,
    pub bucketing: Bucketing,
    pub buckets: Vec<ReportBucket>,
    pub total: Duration,
}

#[derive(Debug, Clone)]
pub struct ProjectReport {
    pub window: TimeWindow,
    pub items: Vec<ProjectReportItem>,
    pub total: Duration,
}

#[derive(Debug, Clone)]
pub struct TagReport {
    pub window: TimeWindow,
    pub items: Vec<TagReportItem>,
}

pub struct Reports<'a, A: ActivityStore, P: ProjectStore> {
    activities: &'a A,
    projects: &'a P,
    batch_size: u32,
    tags: Vec<String>,
}

impl<'a, A: ActivityStore, P: ProjectStore> Reports<'a, A, P> {
    /// `batch_size` is the page size used when a report needs every
    /// activity of a window.
    pub fn new(activities: &'a A, projects: &'a P, batch_size: u32) -> Self {
        Reports {
            activities,
            projects,
            batch_size: batch_size.max(1),
            tags: Vec::new(),
        }
    }

    /// Restricts every report to activities tagged with one of `tags`.
    /// Expects normalized names.
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    fn filter(&self, identity: &Identity, window: &TimeWindow) -> ActivityFilter {
        build_visibility_filter(identity, window).with_tags(self.tags.clone())
    }

    /// One page of the activities `identity` may see in `window`.
    pub fn activities(
        &self,
        identity: &Identity,
        window: &TimeWindow,
        sort: ActivitySort,
        page: &PageParams,
    ) -> Result<ActivitiesReport, ReportError> {
        let filter = self.filter(identity, window).with_sort(sort);
        let found = self.activities.find(&filter, page)?;

        let projects = self.projects_of(identity, &found.activities)?;

        debug!(
            window = %window,
            user = %identity.username,
            activities = found.activities.len(),
            projects = projects.len(),
            "activities report"
        );

        Ok(ActivitiesReport {
            window: *window,
            activities: found.activities,
            projects,
            page: found.page,
        })
    }

    /// Totals of `window` bucketed by `requested`, clamped to what the
    /// window can show.
    pub fn time_report(
        &self,
        identity: &Identity,
        window: &TimeWindow,
        requested: Bucketing,
    ) -> Result<TimeReport, ReportError> {
        let bucketing = requested.clamp_to(window);
        let entries = self.fetch_all(identity, window)?;
        let buckets = aggregate(&entries, bucketing)?;

        debug!(
            window = %window,
            requested = %requested,
            bucketing = %bucketing,
            entries = entries.len(),
            buckets = buckets.len(),
            "time report"
        );

        Ok(TimeReport {
            window: *window,
            bucketing,
            total: total(&buckets),
            buckets,
        })
    }

    /// Totals of `window` per project, sorted by project title.
    pub fn project_report(&self, identity: &Identity, window: &TimeWindow) -> Result<ProjectReport, ReportError> {
        let entries = self.fetch_all(identity, window)?;

        let projects = self.projects_of(identity, &entries)?;

        let items = aggregate_by_project(&entries, &projects)?;
        let total = items.iter().fold(Duration::zero(), |sum, item| sum + item.total);

        debug!(window = %window, entries = entries.len(), projects = items.len(), "project report");

        Ok(ProjectReport {
            window: *window,
            items,
            total,
        })
    }

    /// Totals of `window` per tag, sorted by tag name.
    pub fn tag_report(&self, identity: &Identity, window: &TimeWindow) -> Result<TagReport, ReportError> {
        let entries = self.fetch_all(identity, window)?;
        let items = aggregate_by_tag(&entries, &self.tags)?;

        debug!(window = %window, entries = entries.len(), tags = items.len(), "tag report");

        Ok(TagReport { window: *window, items })
    }

    /// Projects referenced by `entries`, each distinct id looked up once.
    fn projects_of(&self, identity: &Identity, entries: &[Activity]) -> Result<Vec<Project>, ReportError> {
        let ids: Vec<i64> = entries
            .iter()
            .map(|activity| activity.project_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.projects.find_by_ids(identity.organization_id, &ids)?)
    }

    /// Every visible activity of `window`, oldest first.
    fn fetch_all(&self, identity: &Identity, window: &TimeWindow) -> Result<Vec<Activity>, ReportError> {
        let filter = self.filter(identity, window).with_sort(ActivitySort {
            field: SortField::Start,
            order: SortOrder::Asc,
        });

        let mut entries = Vec::new();
        let mut params = PageParams::new(0, self.batch_size);
        loop {
            let found = self.activities.find(&filter, &params)?;
            let fetched = found.activities.len();
            entries.extend(found.activities);

            debug!(page = params.page, fetched, total = found.page.total_elements, "fetched activities");

            if fetched == 0 || found.page.is_last() {
                break;
            }
            params.page += 1;
        }

        Ok(entries)
    }
}

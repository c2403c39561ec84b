//! SQLite store for activities.
//!
//! Timestamps are stored through rusqlite's chrono support as
//! `YYYY-MM-DD HH:MM:SS+00:00` text. Sub-second precision is dropped on
//! insert so the text sorts and compares exactly like the instants do.
//!
//! Tags live in `tags` (one row per organization and name) and are linked
//! through `activity_tags`. They are replaced as a whole whenever an
//! activity is written, in the same transaction.

use super::db::Db;
use crate::libs::activity::{Activity, ActivitySort, SortField, SortOrder};
use crate::libs::paged::{ActivitiesPage, PageParams};
use crate::libs::report::ActivityStore;
use crate::libs::tag::normalize_tags;
use crate::libs::visibility::{ActivityFilter, Identity};
use anyhow::{bail, Result};
use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, ToSql};
use std::path::Path;
use tracing::debug;

const INSERT_ACTIVITY: &str = "INSERT INTO activities (start, \"end\", description, project_id, organization_id, username) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_ACTIVITY_COLUMNS: &str = "SELECT activities.id, activities.start, activities.\"end\", activities.description, activities.project_id, activities.organization_id, activities.username,
    (SELECT group_concat(tags.name, ',') FROM activity_tags JOIN tags ON tags.id = activity_tags.tag_id WHERE activity_tags.activity_id = activities.id)
    FROM activities";
const JOIN_PROJECTS: &str = "LEFT JOIN projects ON projects.id = activities.project_id";
const WHERE_WINDOW: &str = "WHERE activities.organization_id = ? AND ? <= activities.start AND activities.start < ?";
const AND_USERNAME: &str = "AND activities.username = ?";
const AND_TAGGED_START: &str = "AND EXISTS (SELECT 1 FROM activity_tags JOIN tags ON tags.id = activity_tags.tag_id WHERE activity_tags.activity_id = activities.id AND tags.name IN (";
const COUNT_ACTIVITIES: &str = "SELECT COUNT(*) FROM activities";
const SELECT_BY_ID: &str = "WHERE activities.id = ?1 AND activities.organization_id = ?2";
const DELETE_ACTIVITY: &str = "DELETE FROM activities WHERE id = ?1 AND organization_id = ?2";
const AND_OWNER: &str = "AND username = ?3";
const UPDATE_ACTIVITY: &str =
    "UPDATE activities SET start = ?3, \"end\" = ?4, description = ?5, project_id = ?6 WHERE id = ?1 AND organization_id = ?2";
const AND_OWNER_UPDATE: &str = "AND username = ?7";
const DELETE_ACTIVITY_TAGS: &str = "DELETE FROM activity_tags WHERE activity_id = ?1";
const INSERT_TAG: &str = "INSERT OR IGNORE INTO tags (name, organization_id) VALUES (?1, ?2)";
const SELECT_TAG_ID: &str = "SELECT id FROM tags WHERE name = ?1 AND organization_id = ?2";
const INSERT_ACTIVITY_TAG: &str = "INSERT OR IGNORE INTO activity_tags (activity_id, tag_id) VALUES (?1, ?2)";

pub struct Activities {
    pub conn: Connection,
}

impl Activities {
    pub fn new() -> Result<Activities> {
        Ok(Activities { conn: Db::new()?.conn })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Activities> {
        Ok(Activities {
            conn: Db::open(path)?.conn,
        })
    }

    /// Stores `activity` for `identity` and returns its id.
    ///
    /// Owner and organization always come from the identity, whatever the
    /// activity carries.
    pub fn insert(&mut self, identity: &Identity, activity: &Activity) -> Result<i64> {
        let (start, end) = checked_interval(activity)?;
        let tags = normalize_tags(&activity.tags)?;

        let tx = self.conn.transaction()?;
        tx.execute(
            INSERT_ACTIVITY,
            params![
                start,
                end,
                activity.description,
                activity.project_id,
                identity.organization_id,
                identity.username,
            ],
        )?;
        let id = tx.last_insert_rowid();
        sync_tags(&tx, id, identity.organization_id, &tags)?;
        tx.commit()?;
        debug!(id, user = %identity.username, tags = tags.len(), "inserted activity");

        Ok(id)
    }

    /// Overwrites interval, description, project and tags of an existing
    /// activity. Scoped like [`Activities::delete`].
    pub fn update(&mut self, identity: &Identity, activity: &Activity) -> Result<()> {
        let Some(id) = activity.id else {
            bail!("activity has no id");
        };
        let (start, end) = checked_interval(activity)?;
        let tags = normalize_tags(&activity.tags)?;

        let tx = self.conn.transaction()?;
        let updated = if identity.is_admin() {
            tx.execute(
                UPDATE_ACTIVITY,
                params![id, identity.organization_id, start, end, activity.description, activity.project_id],
            )?
        } else {
            let sql = format!("{} {}", UPDATE_ACTIVITY, AND_OWNER_UPDATE);
            tx.execute(
                &sql,
                params![
                    id,
                    identity.organization_id,
                    start,
                    end,
                    activity.description,
                    activity.project_id,
                    identity.username
                ],
            )?
        };

        if updated == 0 {
            bail!("activity {} not found", id);
        }
        sync_tags(&tx, id, identity.organization_id, &tags)?;
        tx.commit()?;
        debug!(id, user = %identity.username, "updated activity");

        Ok(())
    }

    pub fn find_by_id(&self, organization_id: i64, id: i64) -> Result<Option<Activity>> {
        let sql = format!("{} {}", SELECT_ACTIVITY_COLUMNS, SELECT_BY_ID);
        let activity = self.conn.query_row(&sql, params![id, organization_id], map_activity).optional()?;

        Ok(activity)
    }

    /// Deletes an activity visible to `identity`: admins may delete any
    /// activity of their organization, everyone else only their own.
    pub fn delete(&mut self, identity: &Identity, id: i64) -> Result<()> {
        let deleted = if identity.is_admin() {
            self.conn.execute(DELETE_ACTIVITY, params![id, identity.organization_id])?
        } else {
            let sql = format!("{} {}", DELETE_ACTIVITY, AND_OWNER);
            self.conn.execute(&sql, params![id, identity.organization_id, identity.username])?
        };

        if deleted == 0 {
            bail!("activity {} not found", id);
        }
        debug!(id, user = %identity.username, "deleted activity");

        Ok(())
    }

    fn count(&self, filter: &ActivityFilter) -> Result<u64> {
        let (condition, values) = filter_condition(filter);
        let sql = format!("{} {}", COUNT_ACTIVITIES, condition);
        let count: i64 = self.conn.query_row(&sql, params_from_iter(values.iter()), |row| row.get(0))?;

        Ok(count.max(0) as u64)
    }
}

impl ActivityStore for Activities {
    fn find(&self, filter: &ActivityFilter, page: &PageParams) -> Result<ActivitiesPage> {
        let total = self.count(filter)?;

        let (condition, mut values) = filter_condition(filter);
        let sql = format!(
            "{} {} {} ORDER BY {} LIMIT ? OFFSET ?",
            SELECT_ACTIVITY_COLUMNS,
            JOIN_PROJECTS,
            condition,
            order_by(&filter.sort)
        );
        values.push(Box::new(page.size as i64));
        values.push(Box::new(page.offset() as i64));

        let mut stmt = self.conn.prepare(&sql)?;
        let activity_iter = stmt.query_map(params_from_iter(values.iter()), map_activity)?;
        let mut activities = Vec::new();
        for activity in activity_iter {
            activities.push(activity?);
        }

        debug!(
            organization = filter.organization_id,
            user = filter.username.as_deref().unwrap_or("*"),
            page = page.page,
            size = page.size,
            found = activities.len(),
            total,
            "find activities"
        );

        Ok(ActivitiesPage {
            activities,
            page: page.page_of_total(total),
        })
    }
}

/// `WHERE` clause and its values for a filter.
fn filter_condition(filter: &ActivityFilter) -> (String, Vec<Box<dyn ToSql>>) {
    let mut condition = WHERE_WINDOW.to_string();
    let mut values: Vec<Box<dyn ToSql>> = vec![
        Box::new(filter.organization_id),
        Box::new(filter.start.trunc_subsecs(0)),
        Box::new(filter.end.trunc_subsecs(0)),
    ];

    if let Some(username) = &filter.username {
        condition.push(' ');
        condition.push_str(AND_USERNAME);
        values.push(Box::new(username.clone()));
    }

    if !filter.tags.is_empty() {
        condition.push(' ');
        condition.push_str(AND_TAGGED_START);
        condition.push_str(&vec!["?"; filter.tags.len()].join(", "));
        condition.push_str("))");
        for tag in &filter.tags {
            values.push(Box::new(tag.clone()));
        }
    }

    (condition, values)
}

/// Sort columns come from a closed set; user input never reaches the SQL.
fn order_by(sort: &ActivitySort) -> String {
    let order = match sort.order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    };
    match sort.field {
        SortField::Start => format!("activities.start {0}, activities.id {0}", order),
        SortField::Project => format!("projects.title {0}, activities.start {0}, activities.id {0}", order),
    }
}

/// Whole-second bounds of `activity`, rejecting empty and reversed ones.
fn checked_interval(activity: &Activity) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start = activity.start.trunc_subsecs(0);
    let end = activity.end.trunc_subsecs(0);
    if end <= start {
        bail!("activity must end ({}) after it starts ({})", end, start);
    }
    Ok((start, end))
}

/// Replaces the tags of an activity, creating missing tags on the way.
fn sync_tags(conn: &Connection, activity_id: i64, organization_id: i64, tags: &[String]) -> Result<()> {
    conn.execute(DELETE_ACTIVITY_TAGS, params![activity_id])?;
    for tag in tags {
        conn.execute(INSERT_TAG, params![tag, organization_id])?;
        let tag_id: i64 = conn.query_row(SELECT_TAG_ID, params![tag, organization_id], |row| row.get(0))?;
        conn.execute(INSERT_ACTIVITY_TAG, params![activity_id, tag_id])?;
    }
    Ok(())
}

fn map_activity(row: &Row) -> rusqlite::Result<Activity> {
    let tag_names: Option<String> = row.get(7)?;
    let mut tags: Vec<String> = tag_names
        .map(|names| names.split(',').map(str::to_string).collect())
        .unwrap_or_default();
    tags.sort();

    Ok(Activity {
        id: row.get(0)?,
        start: row.get(1)?,
        end: row.get(2)?,
        description: row.get(3)?,
        project_id: row.get(4)?,
        organization_id: row.get(5)?,
        username: row.get(6)?,
        tags,
    })
}

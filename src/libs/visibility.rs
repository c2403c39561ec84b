//! Tenant and per-user isolation of activity queries.
//!
//! [`build_visibility_filter`] is the only place that decides what a caller
//! may see. The organization bound is always taken from the caller and can
//! never be widened; the username bound is dropped only for admins.

use crate::libs::activity::ActivitySort;
use crate::libs::error::ReportError;
use crate::libs::window::TimeWindow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ROLE_USER")]
    User,
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Admin => "ROLE_ADMIN",
        }
    }
}

impl FromStr for Role {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ROLE_USER" | "USER" => Ok(Role::User),
            "ROLE_ADMIN" | "ADMIN" => Ok(Role::Admin),
            other => Err(ReportError::parse(format!("unknown role '{}'", other))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who is asking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub organization_id: i64,
    pub username: String,
    pub roles: Vec<Role>,
}

impl Identity {
    pub fn new(organization_id: i64, username: &str, roles: Vec<Role>) -> Self {
        Identity {
            organization_id,
            username: username.to_string(),
            roles,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityFilter {
    pub organization_id: i64,
    /// Only activities of this user; `None` for the whole organization.
    pub username: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub sort: ActivitySort,
    /// Only activities carrying at least one of these tags; empty for all.
    pub tags: Vec<String>,
}

impl ActivityFilter {
    pub fn with_sort(mut self, sort: ActivitySort) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Whether `username` may be matched by this filter.
    pub fn admits_user(&self, username: &str) -> bool {
        self.username.as_deref().map_or(true, |own| own == username)
    }

    /// Whether an activity tagged with `tags` passes the tag restriction.
    pub fn admits_tags(&self, tags: &[String]) -> bool {
        self.tags.is_empty() || tags.iter().any(|tag| self.tags.contains(tag))
    }
}

/// Builds the query filter for `identity` over `window`.
pub fn build_visibility_filter(identity: &Identity, window: &TimeWindow) -> ActivityFilter {
    ActivityFilter {
        organization_id: identity.organization_id,
        username: if identity.is_admin() {
            None
        } else {
            Some(identity.username.clone())
        },
        start: window.start(),
        end: window.end(),
        sort: ActivitySort::default(),
        tags: Vec::new(),
    }
}

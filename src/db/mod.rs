//! SQLite persistence.
//!
//! [`db::Db`] opens `timebook.db` and applies pending migrations. The
//! [`activities::Activities`] and [`projects::Projects`] stores implement the
//! store traits of the report orchestrator, so reports run directly against
//! the database:
//!
//! ```rust,no_run
//! use timebook::db::{activities::Activities, projects::Projects};
//! use timebook::libs::aggregate::Bucketing;
//! use timebook::libs::report::Reports;
//! use timebook::libs::visibility::{Identity, Role};
//! use timebook::libs::window::{Granularity, TimeWindow};
//!
//! let activities = Activities::new()?;
//! let projects = Projects::new()?;
//! let identity = Identity::new(1, "alice", vec![Role::User]);
//! let window = TimeWindow::new(Granularity::Month, chrono::Utc::now())?;
//!
//! let report = Reports::new(&activities, &projects, 500).time_report(&identity, &window, Bucketing::Week)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection setup.
pub mod db;

/// Versioned schema changes.
pub mod migrations;

pub mod activities;
pub mod projects;

//! Core library modules for timebook.
//!
//! ## Reporting Core
//!
//! - [`window`]: calendar-aligned time windows and their navigation
//! - [`codec`]: window tokens and report view parameters from user input
//! - [`visibility`]: organization and per-user scoping of queries
//! - [`aggregate`]: bucketed and per-project duration totals
//! - [`report`]: composes the above with the stores into reports
//! - [`duration`]: hour and minute breakdown of elapsed time
//!
//! ## Infrastructure
//!
//! Configuration, data storage, messages, formatting and table rendering.
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use timebook::libs::codec::parse_window;
//! use timebook::libs::window::Granularity;
//!
//! let window = parse_window(Granularity::Week, "2020-1")?;
//! assert_eq!(window.start(), Utc.with_ymd_and_hms(2019, 12, 30, 0, 0, 0).unwrap());
//! assert_eq!(window.next().label(), "2020-2");
//! # Ok::<(), timebook::libs::error::ReportError>(())
//! ```

pub mod activity;
pub mod aggregate;
pub mod codec;
pub mod config;
pub mod data_storage;
pub mod duration;
pub mod error;
pub mod formatter;
pub mod messages;
pub mod paged;
pub mod report;
pub mod tag;
pub mod view;
pub mod visibility;
pub mod window;

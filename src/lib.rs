//! # Timebook
//!
//! A command-line time tracker with calendar-correct reports.
//!
//! ## Features
//!
//! - **Time Windows**: days, ISO weeks, months, quarters, years and custom
//!   ranges that step forward and backward without drifting
//! - **Reports**: activity lists, totals bucketed by day, week, month or
//!   quarter, and totals per project
//! - **Visibility**: every query is scoped to the caller's organization, and
//!   to the caller's own activities unless they are an admin
//! - **Storage**: SQLite with versioned migrations
//!
//! ## Usage
//!
//! ```rust,no_run
//! use timebook::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;

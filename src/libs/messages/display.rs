//! Text of every user-facing [`Message`].

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved".to_string(),
            Message::ConfigParseError => "Failed to parse configuration".to_string(),
            Message::ConfigModuleIdentity => "Identity".to_string(),
            Message::ConfigModuleReport => "Reports".to_string(),
            Message::ConfigMissingUsername => "No username configured. Run `timebook init` first".to_string(),

            // === DATABASE MESSAGES ===
            Message::DbOpened(path) => format!("Opened database {}", path),
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed".to_string(),

            // === PROJECT MESSAGES ===
            Message::ProjectCreated(id, title) => format!("Project '{}' created with id {}", title, id),
            Message::ProjectsNotFound => "No projects yet".to_string(),

            // === ACTIVITY MESSAGES ===
            Message::ActivityCreated(id) => format!("Activity {} created", id),
            Message::ActivityUpdated(id) => format!("Activity {} updated", id),
            Message::ActivityDeleted(id) => format!("Activity {} deleted", id),
            Message::ActivityNotFound(id) => format!("Activity {} not found", id),
            Message::ActivityEndsBeforeStart(start, end) => format!("Activity must end after it starts ({} - {})", start, end),
            Message::ActivityUnknownProject(id) => format!("Project {} does not exist", id),
            Message::ActivitiesHeader(window) => format!("Activities {}", window),
            Message::ActivitiesNotFound => "No activities in this period".to_string(),

            // === REPORT MESSAGES ===
            Message::TimeReportHeader(window, bucketing) => format!("Time report {} by {}", window, bucketing),
            Message::ProjectReportHeader(window) => format!("Project report {}", window),
            Message::TagReportHeader(window) => format!("Tag report {}", window),
            Message::TagsNotFound => "No tagged activities in this period".to_string(),
            Message::ReportPage(number, pages, total) => format!("Page {} of {} ({} activities)", number, pages, total),
            Message::ReportNavigation(previous, next) => format!("Previous: {}  Next: {}", previous, next),
            Message::InvalidReportInput(reason) => format!("Invalid report request: {}", reason),

            // === PROMPTS ===
            Message::PromptOrganization => "Organization id".to_string(),
            Message::PromptUsername => "Username".to_string(),
            Message::PromptRoles => "Roles (comma separated, ROLE_USER or ROLE_ADMIN)".to_string(),
            Message::PromptPageSize => "Activities per page".to_string(),
            Message::PromptBatchSize => "Fetch batch size for reports".to_string(),
            Message::PromptDefaultTimespan => "Default timespan (day, week, month, quarter, year)".to_string(),
        };
        f.write_str(&text)
    }
}

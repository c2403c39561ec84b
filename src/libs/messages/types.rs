#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigParseError,
    ConfigModuleIdentity,
    ConfigModuleReport,
    ConfigMissingUsername,

    // === DATABASE MESSAGES ===
    DbOpened(String),
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,

    // === PROJECT MESSAGES ===
    ProjectCreated(i64, String),
    ProjectsNotFound,

    // === ACTIVITY MESSAGES ===
    ActivityCreated(i64),
    ActivityUpdated(i64),
    ActivityDeleted(i64),
    ActivityNotFound(i64),
    ActivityEndsBeforeStart(String, String),
    ActivityUnknownProject(i64),
    ActivitiesHeader(String),
    ActivitiesNotFound,

    // === REPORT MESSAGES ===
    TimeReportHeader(String, String),
    ProjectReportHeader(String),
    TagReportHeader(String),
    TagsNotFound,
    ReportPage(u32, u64, u64),
    ReportNavigation(String, String),
    InvalidReportInput(String),

    // === PROMPTS ===
    PromptOrganization,
    PromptUsername,
    PromptRoles,
    PromptPageSize,
    PromptBatchSize,
    PromptDefaultTimespan,
}

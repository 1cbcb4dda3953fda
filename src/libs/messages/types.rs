#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(i64, String), // id, title
    TaskUpdated(i64),
    TaskDeleted(i64),
    TaskToggled { id: i64, completed: bool },
    TaskCreateFailed(String),
    TaskUpdateFailed(String),
    TaskDeleteFailed(String),
    TaskToggleFailed(String),
    TasksNotFound,
    TasksHeader(usize),
    TaskDetailsHeader(i64),
    ConfirmDeleteTask(i64, String),
    EditingTask(i64, String),
    OperationCancelled,
    FilterValueIgnored { field: &'static str, value: String },

    // === PROMPTS ===
    PromptTaskTitle,
    PromptTaskDescription,
    PromptTaskPriority,
    PromptTaskCategory,
    PromptTaskStatus,
    PromptTaskDueDate,

    // === EXPORT MESSAGES ===
    ExportCompleted(String), // path
    NoTasksToExport,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleDatabase,
    PromptDbPath,
    PromptBusyTimeout,

    // === DATABASE MESSAGES ===
    DatabaseOpened(String), // path
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    MigrationHistoryEntry(u32, String, String), // version, name, applied_at
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
}

//! Display implementation for todos application messages.
//!
//! All user-facing text lives here so commands never format ad-hoc strings.
//! Messages carrying data interpolate it through typed parameters.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(id, title) => format!("Task #{} '{}' created", id, title),
            Message::TaskUpdated(id) => format!("Task #{} updated", id),
            Message::TaskDeleted(id) => format!("Task #{} deleted", id),
            Message::TaskToggled { id, completed } => {
                if *completed {
                    format!("Task #{} marked as completed", id)
                } else {
                    format!("Task #{} marked as not completed", id)
                }
            }
            Message::TaskCreateFailed(error) => format!("Failed to create task: {}", error),
            Message::TaskUpdateFailed(error) => format!("Failed to update task: {}", error),
            Message::TaskDeleteFailed(error) => format!("Failed to delete task: {}", error),
            Message::TaskToggleFailed(error) => format!("Failed to toggle task: {}", error),
            Message::TasksNotFound => "No tasks match the current filters".to_string(),
            Message::TasksHeader(count) => format!("Tasks ({})", count),
            Message::TaskDetailsHeader(id) => format!("Task #{}", id),
            Message::ConfirmDeleteTask(id, title) => format!("Delete task #{} '{}'?", id, title),
            Message::EditingTask(id, title) => format!("Editing task #{} '{}'", id, title),
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::FilterValueIgnored { field, value } => {
                format!("Ignoring {} filter '{}': not a valid value", field, value)
            }

            // === PROMPTS ===
            Message::PromptTaskTitle => "Title".to_string(),
            Message::PromptTaskDescription => "Description".to_string(),
            Message::PromptTaskPriority => "Priority (1=Low, 2=Medium, 3=High)".to_string(),
            Message::PromptTaskCategory => "Category".to_string(),
            Message::PromptTaskStatus => "Status (todo, doing, done)".to_string(),
            Message::PromptTaskDueDate => "Due date (YYYY-MM-DD, empty for none)".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path) => format!("Export completed: {}", path),
            Message::NoTasksToExport => "No tasks to export".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleDatabase => "Database settings".to_string(),
            Message::PromptDbPath => "Database file path".to_string(),
            Message::PromptBusyTimeout => "Busy timeout in milliseconds".to_string(),

            // === DATABASE MESSAGES ===
            Message::DatabaseOpened(path) => format!("Database opened at {}", path),
            Message::DatabaseVersion(version) => format!("Database schema version: {}", version),
            Message::DatabaseUpToDate => "Database is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database needs migration".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::MigrationHistoryEntry(version, name, applied_at) => {
                format!("  v{}: {} (applied: {})", version, name, applied_at)
            }
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed".to_string(),
        };
        write!(f, "{}", s)
    }
}

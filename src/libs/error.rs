//! Typed errors for the task store and query layer.
//!
//! Every operation that touches a task returns one of three recoverable
//! failures. None of them terminates the process: the CLI reports the error
//! and exits with a non-zero status, and the store is left exactly as it was
//! before the failed call.

use thiserror::Error;

/// Result alias used by the store and query layer.
pub type TaskResult<T> = std::result::Result<T, TaskError>;

/// Failure of a single task operation.
#[derive(Error, Debug)]
pub enum TaskError {
    /// A required field is missing or a value is outside its domain.
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    /// The referenced task does not exist.
    #[error("Task #{0} not found")]
    NotFound(i64),

    /// SQLite could not complete the operation; the transaction was rolled back.
    #[error("Storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl TaskError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        TaskError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskError::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, TaskError::Validation { .. })
    }
}

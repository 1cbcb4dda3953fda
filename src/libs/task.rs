//! Task data model.
//!
//! A [`Task`] is the stored record. User input arrives as a [`TaskForm`]
//! (every field an optional raw string, exactly as typed or submitted) and is
//! turned into a [`TaskDraft`] by a single validation and defaulting step.
//! The store accepts drafts only, so `create` and `update` share the same
//! defaults and the same rules.
//!
//! ## Defaults
//!
//! | field         | default      |
//! |---------------|--------------|
//! | `description` | `""`         |
//! | `priority`    | Medium (2)   |
//! | `category`    | `"personal"` |
//! | `status`      | `todo`       |
//! | `due_date`    | none         |
//!
//! `status` and `completed` are independent: toggling completion leaves the
//! status alone and editing the status leaves completion alone.

use super::error::{TaskError, TaskResult};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_CATEGORY: &str = "personal";
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";
pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_CATEGORY_LEN: usize = 50;

/// Task priority, stored as its numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Priority {
    Low = 1,
    #[default]
    Medium = 2,
    High = 3,
}

impl Priority {
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.value()
    }
}

impl TryFrom<i64> for Priority {
    type Error = TaskError;

    fn try_from(value: i64) -> TaskResult<Self> {
        match value {
            1 => Ok(Priority::Low),
            2 => Ok(Priority::Medium),
            3 => Ok(Priority::High),
            other => Err(TaskError::validation(
                "priority",
                format!("{} is out of range (1=Low, 2=Medium, 3=High)", other),
            )),
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = TaskError;

    fn try_from(value: u8) -> TaskResult<Self> {
        Priority::try_from(i64::from(value))
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    /// Accepts `1`..`3` or the labels `low`, `medium`, `high`.
    fn from_str(s: &str) -> TaskResult<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "low" => return Ok(Priority::Low),
            "medium" => return Ok(Priority::Medium),
            "high" => return Ok(Priority::High),
            _ => {}
        }
        let value: i64 = s
            .parse()
            .map_err(|_| TaskError::validation("priority", format!("'{}' is not a number", s)))?;
        Priority::try_from(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

impl ToSql for Priority {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(i64::from(self.value())))
    }
}

impl FromSql for Priority {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = i64::column_result(value)?;
        Priority::try_from(raw).map_err(|_| FromSqlError::OutOfRange(raw))
    }
}

/// Workflow status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Doing => "doing",
            TaskStatus::Done => "done",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = TaskError;

    fn from_str(s: &str) -> TaskResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "doing" => Ok(TaskStatus::Doing),
            "done" => Ok(TaskStatus::Done),
            _ => Err(TaskError::validation(
                "status",
                format!("'{}' is not one of todo, doing, done", s.trim()),
            )),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for TaskStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TaskStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e: TaskError| FromSqlError::Other(Box::new(e)))
    }
}

/// A stored task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: String,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Task {
    /// The mutable fields of this task as a draft, e.g. as the base for an edit.
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            category: self.category.clone(),
            status: self.status,
            due_date: self.due_date,
        }
    }
}

/// Validated, defaulted mutable fields of a task.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: String,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    /// A draft with the given title and every other field at its default.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            category: DEFAULT_CATEGORY.to_string(),
            status: TaskStatus::default(),
            due_date: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Checks the invariants the store relies on.
    pub fn validate(&self) -> TaskResult<()> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(TaskError::validation("title", "must not be empty"));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(TaskError::validation(
                "title",
                format!("must be at most {} characters", MAX_TITLE_LEN),
            ));
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(TaskError::validation("category", "must not be empty"));
        }
        if category.chars().count() > MAX_CATEGORY_LEN {
            return Err(TaskError::validation(
                "category",
                format!("must be at most {} characters", MAX_CATEGORY_LEN),
            ));
        }
        Ok(())
    }
}

/// Raw task fields as submitted. Blank values count as omitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub due_date: Option<String>,
}

impl TaskForm {
    /// Applies defaults and parses every field, failing on the first bad value.
    pub fn validate(&self) -> TaskResult<TaskDraft> {
        let title = present(&self.title).ok_or_else(|| TaskError::validation("title", "is required"))?;

        let mut draft = TaskDraft::new(title);
        if let Some(description) = &self.description {
            draft.description = description.clone();
        }
        if let Some(priority) = present(&self.priority) {
            draft.priority = priority.parse()?;
        }
        if let Some(category) = present(&self.category) {
            draft.category = category.to_string();
        }
        if let Some(status) = present(&self.status) {
            draft.status = status.parse()?;
        }
        draft.due_date = parse_due_date(self.due_date.as_deref().unwrap_or(""))?;

        draft.validate()?;
        Ok(draft)
    }
}

impl From<&Task> for TaskForm {
    fn from(task: &Task) -> Self {
        Self {
            title: Some(task.title.clone()),
            description: Some(task.description.clone()),
            priority: Some(task.priority.value().to_string()),
            category: Some(task.category.clone()),
            status: Some(task.status.to_string()),
            due_date: task.due_date.map(|d| d.format(DUE_DATE_FORMAT).to_string()),
        }
    }
}

/// Parses an ISO `YYYY-MM-DD` date; an empty string means no due date.
pub fn parse_due_date(raw: &str) -> TaskResult<Option<NaiveDate>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DUE_DATE_FORMAT)
        .map(Some)
        .map_err(|_| TaskError::validation("due_date", format!("'{}' is not a YYYY-MM-DD date", raw)))
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str) -> TaskForm {
        TaskForm {
            title: Some(title.to_string()),
            ..TaskForm::default()
        }
    }

    #[test]
    fn test_form_applies_defaults() {
        let draft = form("Buy groceries").validate().unwrap();
        assert_eq!(draft, TaskDraft::new("Buy groceries"));
        assert_eq!(draft.priority, Priority::Medium);
        assert_eq!(draft.category, "personal");
        assert_eq!(draft.status, TaskStatus::Todo);
        assert_eq!(draft.description, "");
        assert!(draft.due_date.is_none());
    }

    #[test]
    fn test_blank_fields_count_as_omitted() {
        let draft = TaskForm {
            title: Some("Write report".into()),
            priority: Some("  ".into()),
            category: Some("".into()),
            status: Some("".into()),
            due_date: Some("".into()),
            ..TaskForm::default()
        }
        .validate()
        .unwrap();
        assert_eq!(draft, TaskDraft::new("Write report"));
    }

    #[test]
    fn test_form_parses_all_fields() {
        let draft = TaskForm {
            title: Some("  File taxes ".into()),
            description: Some("before April".into()),
            priority: Some("3".into()),
            category: Some("finance".into()),
            status: Some("Doing".into()),
            due_date: Some("2024-04-15".into()),
        }
        .validate()
        .unwrap();
        assert_eq!(draft.title, "File taxes");
        assert_eq!(draft.description, "before April");
        assert_eq!(draft.priority, Priority::High);
        assert_eq!(draft.category, "finance");
        assert_eq!(draft.status, TaskStatus::Doing);
        assert_eq!(draft.due_date, NaiveDate::from_ymd_opt(2024, 4, 15));
    }

    #[test]
    fn test_missing_title_is_rejected() {
        let err = TaskForm::default().validate().unwrap_err();
        assert!(matches!(err, TaskError::Validation { field: "title", .. }));

        let err = form("   ").validate().unwrap_err();
        assert!(matches!(err, TaskError::Validation { field: "title", .. }));
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let mut bad_priority = form("x");
        bad_priority.priority = Some("abc".into());
        assert!(matches!(
            bad_priority.validate().unwrap_err(),
            TaskError::Validation { field: "priority", .. }
        ));

        let mut out_of_range = form("x");
        out_of_range.priority = Some("7".into());
        assert!(out_of_range.validate().is_err());

        let mut bad_status = form("x");
        bad_status.status = Some("blocked".into());
        assert!(matches!(
            bad_status.validate().unwrap_err(),
            TaskError::Validation { field: "status", .. }
        ));

        let mut bad_date = form("x");
        bad_date.due_date = Some("10/06/2024".into());
        assert!(matches!(
            bad_date.validate().unwrap_err(),
            TaskError::Validation { field: "due_date", .. }
        ));
    }

    #[test]
    fn test_title_length_limit() {
        assert!(TaskDraft::new("a".repeat(MAX_TITLE_LEN)).validate().is_ok());
        assert!(TaskDraft::new("a".repeat(MAX_TITLE_LEN + 1)).validate().is_err());
    }

    #[test]
    fn test_priority_parsing() {
        assert_eq!("1".parse::<Priority>().unwrap(), Priority::Low);
        assert_eq!(" 2 ".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert!("0".parse::<Priority>().is_err());
        assert!("abc".parse::<Priority>().is_err());
        assert!(Priority::High > Priority::Low);
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("todo".parse::<TaskStatus>().unwrap(), TaskStatus::Todo);
        assert_eq!("DONE".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert!("finished".parse::<TaskStatus>().is_err());
        assert_eq!(TaskStatus::Doing.to_string(), "doing");
    }

    #[test]
    fn test_task_serialization_shape() {
        let created = NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let task = Task {
            id: 1,
            title: "Buy groceries".into(),
            description: String::new(),
            priority: Priority::High,
            category: "personal".into(),
            status: TaskStatus::Doing,
            due_date: NaiveDate::from_ymd_opt(2024, 6, 11),
            completed: false,
            created_at: created,
            updated_at: created,
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["priority"], 3);
        assert_eq!(json["status"], "doing");
        assert_eq!(json["due_date"], "2024-06-11");
        assert_eq!(json["created_at"], "2024-06-10T09:30:00");

        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn test_form_from_task_round_trips_through_validation() {
        let created = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let task = Task {
            id: 5,
            title: "Call mom".into(),
            description: "Sunday".into(),
            priority: Priority::Low,
            category: "family".into(),
            status: TaskStatus::Done,
            due_date: None,
            completed: true,
            created_at: created,
            updated_at: created,
        };
        let draft = TaskForm::from(&task).validate().unwrap();
        assert_eq!(draft, task.to_draft());
    }
}

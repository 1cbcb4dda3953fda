//! Filter, sort and search query construction for task listings.
//!
//! A [`TaskQuery`] combines up to five independent filter dimensions with a
//! sort key. Supplied dimensions are AND-combined; an absent dimension places
//! no constraint on the result. The query compiles to a `WHERE` clause, an
//! `ORDER BY` clause and a list of bound parameters, so raw user input never
//! reaches the SQL text.
//!
//! Raw parameters (CLI flags, form fields) go through
//! [`TaskQuery::from_params`], which ignores values it cannot interpret and
//! remembers them in [`TaskQuery::rejected`] instead of failing the listing.

use super::task::{Priority, TaskStatus};
use chrono::{Duration, NaiveDate};
use rusqlite::types::ToSql;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Number of days after today still covered by the `this_week` bucket.
pub const WEEK_SPAN_DAYS: i64 = 7;

/// Derived temporal bucket, evaluated against the query's `today`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueFilter {
    /// Due before today and not done.
    Overdue,
    /// Due exactly today.
    Today,
    /// Due between today and today + 7 days, both inclusive.
    ThisWeek,
}

impl FromStr for DueFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "overdue" => Ok(DueFilter::Overdue),
            "today" => Ok(DueFilter::Today),
            "this_week" => Ok(DueFilter::ThisWeek),
            other => Err(format!("unknown due bucket '{}'", other)),
        }
    }
}

impl fmt::Display for DueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueFilter::Overdue => write!(f, "overdue"),
            DueFilter::Today => write!(f, "today"),
            DueFilter::ThisWeek => write!(f, "this_week"),
        }
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Newest first.
    #[default]
    CreatedDate,
    /// Earliest due date first, undated tasks last.
    DueDate,
    /// Highest priority first.
    Priority,
}

impl SortKey {
    /// Parses a sort parameter; anything unrecognized sorts by creation date.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim() {
            "due_date" => SortKey::DueDate,
            "priority" => SortKey::Priority,
            _ => SortKey::CreatedDate,
        }
    }

    fn order_by(self) -> &'static str {
        match self {
            SortKey::CreatedDate => "created_at DESC, id DESC",
            SortKey::DueDate => "due_date IS NULL, due_date ASC, created_at DESC, id DESC",
            SortKey::Priority => "priority DESC, created_at DESC, id DESC",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::CreatedDate => write!(f, "created_date"),
            SortKey::DueDate => write!(f, "due_date"),
            SortKey::Priority => write!(f, "priority"),
        }
    }
}

/// Raw listing parameters exactly as supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct TaskQueryParams {
    pub category: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub due: Option<String>,
    pub sort: Option<String>,
    pub q: Option<String>,
}

/// A raw filter value that could not be interpreted and was ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedFilter {
    pub field: &'static str,
    pub value: String,
}

/// Compiled SQL fragments for a query.
pub struct SqlClause {
    /// Either empty or a complete `WHERE ...` clause.
    pub where_clause: String,
    pub order_by: &'static str,
    pub params: Vec<Box<dyn ToSql>>,
}

/// A composable selection and ordering over the task table.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskQuery {
    pub category: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub due: Option<DueFilter>,
    pub search: Option<String>,
    pub sort: SortKey,
    /// Reference date for the due buckets.
    pub today: NaiveDate,
    rejected: Vec<RejectedFilter>,
}

impl TaskQuery {
    /// An unconstrained query ordered by creation date.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            category: None,
            status: None,
            priority: None,
            due: None,
            search: None,
            sort: SortKey::default(),
            today,
            rejected: Vec::new(),
        }
    }

    /// Builds a query from raw parameters.
    ///
    /// Empty values and the category `all` leave their dimension
    /// unconstrained. Unparseable priority, status or due values are ignored
    /// and recorded in [`rejected`](Self::rejected).
    pub fn from_params(params: &TaskQueryParams, today: NaiveDate) -> Self {
        let mut query = Self::new(today);

        if let Some(category) = non_empty(&params.category) {
            if category != "all" {
                query.category = Some(category.to_string());
            }
        }
        if let Some(status) = non_empty(&params.status) {
            match status.parse::<TaskStatus>() {
                Ok(status) => query.status = Some(status),
                Err(e) => query.reject("status", status, &e.to_string()),
            }
        }
        if let Some(priority) = non_empty(&params.priority) {
            match priority.parse::<Priority>() {
                Ok(priority) => query.priority = Some(priority),
                Err(e) => query.reject("priority", priority, &e.to_string()),
            }
        }
        if let Some(due) = non_empty(&params.due) {
            match due.parse::<DueFilter>() {
                Ok(due) => query.due = Some(due),
                Err(e) => query.reject("due", due, &e),
            }
        }
        if let Some(q) = non_empty(&params.q) {
            query.search = Some(q.to_string());
        }
        if let Some(sort) = &params.sort {
            query.sort = SortKey::parse_lenient(sort);
        }

        query
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due(mut self, due: DueFilter) -> Self {
        self.due = Some(due);
        self
    }

    /// Substring match on title or description. Case folding covers ASCII letters only.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Raw values that were ignored while building the query.
    pub fn rejected(&self) -> &[RejectedFilter] {
        &self.rejected
    }

    /// Compiles the query into SQL fragments with positional parameters.
    pub fn to_sql(&self) -> SqlClause {
        let mut conditions: Vec<&'static str> = Vec::new();
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(term) = &self.search {
            let pattern = format!("%{}%", escape_like(term));
            conditions.push("(title LIKE ? ESCAPE '\\' OR description LIKE ? ESCAPE '\\')");
            params.push(Box::new(pattern.clone()));
            params.push(Box::new(pattern));
        }
        if let Some(category) = &self.category {
            conditions.push("category = ?");
            params.push(Box::new(category.clone()));
        }
        if let Some(status) = self.status {
            conditions.push("status = ?");
            params.push(Box::new(status));
        }
        if let Some(priority) = self.priority {
            conditions.push("priority = ?");
            params.push(Box::new(priority));
        }
        match self.due {
            Some(DueFilter::Overdue) => {
                conditions.push("due_date < ? AND status != ?");
                params.push(Box::new(self.today));
                params.push(Box::new(TaskStatus::Done));
            }
            Some(DueFilter::Today) => {
                conditions.push("due_date = ?");
                params.push(Box::new(self.today));
            }
            Some(DueFilter::ThisWeek) => {
                conditions.push("due_date >= ? AND due_date <= ?");
                params.push(Box::new(self.today));
                params.push(Box::new(self.today + Duration::days(WEEK_SPAN_DAYS)));
            }
            None => {}
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        SqlClause {
            where_clause,
            order_by: self.sort.order_by(),
            params,
        }
    }

    fn reject(&mut self, field: &'static str, value: &str, reason: &str) {
        warn!(field, value, reason, "ignoring unusable filter value");
        self.rejected.push(RejectedFilter {
            field,
            value: value.to_string(),
        });
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Escapes LIKE wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

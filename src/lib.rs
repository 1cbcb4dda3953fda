//! # todos
//!
//! A personal task tracker for the command line.
//!
//! - **Tasks**: title, description, priority, category, status, due date and
//!   a completed flag, stored in SQLite
//! - **Listing**: filter by category, status, priority and due bucket, sort by
//!   creation date, due date or priority, search title and description
//! - **Export**: CSV and JSON
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::Local;
//! use todos::db::tasks::TaskStore;
//! use todos::libs::query::{SortKey, TaskQuery};
//! use todos::libs::task::{Priority, TaskDraft};
//!
//! let store = TaskStore::open("todos.db")?;
//! store.create(&TaskDraft::new("Buy groceries").priority(Priority::High))?;
//!
//! let query = TaskQuery::new(Local::now().date_naive()).sorted_by(SortKey::Priority);
//! for task in store.list(&query)? {
//!     println!("#{} {}", task.id, task.title);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod commands;
pub mod db;
pub mod libs;

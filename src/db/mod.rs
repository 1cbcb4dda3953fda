//! Database layer built on SQLite.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use todos::db::{db::Db, tasks::TaskStore};
//! use todos::libs::task::TaskDraft;
//!
//! let db = Db::open("todos.db")?;
//! let store = TaskStore::new(&db)?;
//! let task = store.create(&TaskDraft::new("Review PR"))?;
//! store.toggle_completed(task.id)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Database location, connection pragmas and startup migration.
pub mod db;

/// Versioned schema migrations and their history.
pub mod migrations;

/// The task store: CRUD, completion toggle and filtered listing.
pub mod tasks;

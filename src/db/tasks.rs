//! Persistent task storage.
//!
//! [`TaskStore`] owns the `tasks` table. It keeps two connections to the same
//! WAL-mode database file: writes go through the writer and are serialized by
//! its mutex, reads go through the reader and never wait for a write in
//! progress. Every mutation runs in its own transaction; returning early with
//! an error drops the transaction, which rolls it back.

use crate::db::db::Db;
use crate::libs::error::{TaskError, TaskResult};
use crate::libs::query::TaskQuery;
use crate::libs::task::{Task, TaskDraft};
use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use parking_lot::Mutex;
use rusqlite::types::ToSql;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::{debug, warn};

const TASK_COLUMNS: &str = "id, title, description, priority, category, status, due_date, completed, created_at, updated_at";
const INSERT_TASK: &str = "INSERT INTO tasks (title, description, priority, category, status, due_date, completed, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, FALSE, ?7, ?7)";
const UPDATE_TASK: &str = "UPDATE tasks
    SET title = ?2, description = ?3, priority = ?4, category = ?5, status = ?6, due_date = ?7, updated_at = ?8
    WHERE id = ?1";
const TOGGLE_TASK: &str = "UPDATE tasks SET completed = NOT completed, updated_at = ?2 WHERE id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const COUNT_TASKS: &str = "SELECT COUNT(*) FROM tasks";

pub struct TaskStore {
    writer: Mutex<Connection>,
    reader: Mutex<Connection>,
}

impl TaskStore {
    pub fn new(db: &Db) -> Result<Self> {
        Ok(Self {
            writer: Mutex::new(db.connect()?),
            reader: Mutex::new(db.connect()?),
        })
    }

    /// Opens (and migrates) the database at `path` and builds a store on it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(&Db::open(path)?)
    }

    pub fn create(&self, draft: &TaskDraft) -> TaskResult<Task> {
        draft.validate()?;
        let now = now();

        let mut conn = self.writer.lock();
        let tx = conn.transaction()?;
        tx.execute(
            INSERT_TASK,
            params![
                draft.title.trim(),
                draft.description,
                draft.priority,
                draft.category.trim(),
                draft.status,
                draft.due_date,
                now
            ],
        )
        .inspect_err(|e| warn!(error = %e, "task insert failed"))?;
        let id = tx.last_insert_rowid();
        let task = select_task(&tx, id)?.ok_or(TaskError::NotFound(id))?;
        tx.commit()?;

        debug!(id, title = %task.title, "task created");
        Ok(task)
    }

    pub fn get(&self, id: i64) -> TaskResult<Task> {
        let conn = self.reader.lock();
        select_task(&conn, id)?.ok_or(TaskError::NotFound(id))
    }

    /// Tasks matching `query`, in its sort order.
    pub fn list(&self, query: &TaskQuery) -> TaskResult<Vec<Task>> {
        let clause = query.to_sql();
        let sql = format!(
            "SELECT {} FROM tasks {} ORDER BY {}",
            TASK_COLUMNS, clause.where_clause, clause.order_by
        );
        let params: Vec<&dyn ToSql> = clause.params.iter().map(|p| p.as_ref()).collect();

        let conn = self.reader.lock();
        let mut stmt = conn.prepare(&sql)?;
        let tasks = stmt
            .query_map(params.as_slice(), map_task)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = tasks.len(), sort = ?query.sort, "tasks listed");
        Ok(tasks)
    }

    /// Replaces every mutable field of task `id` with the draft. Never creates a task.
    pub fn update(&self, id: i64, draft: &TaskDraft) -> TaskResult<Task> {
        draft.validate()?;

        let mut conn = self.writer.lock();
        let tx = conn.transaction()?;
        let affected = tx
            .execute(
                UPDATE_TASK,
                params![
                    id,
                    draft.title.trim(),
                    draft.description,
                    draft.priority,
                    draft.category.trim(),
                    draft.status,
                    draft.due_date,
                    now()
                ],
            )
            .inspect_err(|e| warn!(id, error = %e, "task update failed"))?;
        if affected == 0 {
            return Err(TaskError::NotFound(id));
        }
        let task = select_task(&tx, id)?.ok_or(TaskError::NotFound(id))?;
        tx.commit()?;

        debug!(id, "task updated");
        Ok(task)
    }

    /// Flips `completed`. `status` is left as it is.
    pub fn toggle_completed(&self, id: i64) -> TaskResult<Task> {
        let mut conn = self.writer.lock();
        let tx = conn.transaction()?;
        let affected = tx
            .execute(TOGGLE_TASK, params![id, now()])
            .inspect_err(|e| warn!(id, error = %e, "task toggle failed"))?;
        if affected == 0 {
            return Err(TaskError::NotFound(id));
        }
        let task = select_task(&tx, id)?.ok_or(TaskError::NotFound(id))?;
        tx.commit()?;

        debug!(id, completed = task.completed, "task toggled");
        Ok(task)
    }

    pub fn delete(&self, id: i64) -> TaskResult<()> {
        let mut conn = self.writer.lock();
        let tx = conn.transaction()?;
        let affected = tx
            .execute(DELETE_TASK, params![id])
            .inspect_err(|e| warn!(id, error = %e, "task delete failed"))?;
        if affected == 0 {
            return Err(TaskError::NotFound(id));
        }
        tx.commit()?;

        debug!(id, "task deleted");
        Ok(())
    }

    pub fn count(&self) -> TaskResult<usize> {
        let conn = self.reader.lock();
        let count: i64 = conn.query_row(COUNT_TASKS, [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn select_task(conn: &Connection, id: i64) -> TaskResult<Option<Task>> {
    let sql = format!("SELECT {} FROM tasks WHERE id = ?1", TASK_COLUMNS);
    Ok(conn.query_row(&sql, params![id], map_task).optional()?)
}

fn map_task(row: &Row) -> rusqlite::Result<Task> {
    let created_at: NaiveDateTime = row.get(8)?;
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        priority: row.get(3)?,
        category: row.get(4)?,
        status: row.get(5)?,
        due_date: row.get(6)?,
        completed: row.get(7)?,
        created_at,
        updated_at: row.get::<_, Option<NaiveDateTime>>(9)?.unwrap_or(created_at),
    })
}

use super::migrations::init_with_migrations;
use crate::libs::config::{Config, DEFAULT_BUSY_TIMEOUT_MS};
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Location and connection settings of the SQLite database file.
///
/// Opening a `Db` migrates the schema once; connections handed out afterwards
/// share the same pragmas (WAL journal, busy timeout).
#[derive(Debug, Clone)]
pub struct Db {
    path: PathBuf,
    busy_timeout: Duration,
}

impl Db {
    /// Opens the database at `path` and applies pending migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Db> {
        Self::open_with_timeout(path, Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))
    }

    pub fn open_with_timeout<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Db> {
        let db = Self::new_without_migrations(path, busy_timeout)?;
        let mut conn = db.connect()?;
        init_with_migrations(&mut conn).context("applying database migrations")?;
        tracing::debug!(path = %db.path.display(), "database ready");
        Ok(db)
    }

    pub fn from_config(config: &Config) -> Result<Db> {
        Self::open_with_timeout(config.db_path()?, Duration::from_millis(config.busy_timeout_ms))
    }

    /// Resolves the database location without touching the schema.
    pub fn new_without_migrations<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Db> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        Ok(Db { path, busy_timeout })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// New connection with the store pragmas applied.
    pub fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path).with_context(|| format!("opening {}", self.path.display()))?;
        conn.busy_timeout(self.busy_timeout)?;
        let mode: String = conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        tracing::trace!(journal_mode = %mode, "connection opened");
        Ok(conn)
    }
}

//! Application configuration.
//!
//! Settings are stored as pretty-printed JSON in `config.json` inside the
//! platform data directory (see [`DataStorage`]). A missing file yields the
//! defaults. At startup [`Config::load`] also reads a `.env` file and applies
//! the `DB_PATH` environment override.
//!
//! ```rust,no_run
//! use todos::libs::config::Config;
//!
//! let config = Config::load()?;
//! println!("{}", config.db_path()?.display());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DB_FILE_NAME: &str = "todos.db";
/// Environment variable overriding the database file location.
pub const DB_PATH_ENV: &str = "DB_PATH";
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

fn default_busy_timeout() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Database file. Defaults to `todos.db` in the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_path: Option<PathBuf>,

    /// How long a connection waits for a competing write lock, in milliseconds.
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            db_path: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Reads `config.json` from the data directory.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    /// Reads a configuration file, returning defaults when it does not exist.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config: Config = serde_json::from_str(&config_str).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config_file = File::create(path).with_context(|| format!("writing {}", path.display()))?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Configuration used at startup: the stored file, then `.env`, then environment overrides.
    pub fn load() -> Result<Config> {
        dotenv::dotenv().ok();
        Ok(Self::read()?.with_env_overrides())
    }

    /// Applies `DB_PATH` when it is set to a non-blank value.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = env::var(DB_PATH_ENV) {
            if !path.trim().is_empty() {
                self.db_path = Some(PathBuf::from(path.trim()));
            }
        }
        self
    }

    /// Resolved database file path.
    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(path.clone()),
            None => Ok(DataStorage::new().get_path(DB_FILE_NAME)?),
        }
    }

    /// Interactive setup wizard, prefilled with the current settings.
    pub fn init() -> Result<Self> {
        let current = Self::read().unwrap_or_default();
        let default_path = current.db_path()?;

        msg_print!(Message::ConfigModuleDatabase);
        let db_path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDbPath.to_string())
            .default(default_path.display().to_string())
            .interact_text()?;

        let busy_timeout_ms: u64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptBusyTimeout.to_string())
            .default(current.busy_timeout_ms)
            .interact_text()?;

        Ok(Config {
            db_path: Some(PathBuf::from(db_path.trim())),
            busy_timeout_ms,
        })
    }
}

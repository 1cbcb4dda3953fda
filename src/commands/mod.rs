//! Command-line interface.
//!
//! One subcommand per task operation. The configuration is loaded and the
//! [`TaskStore`] built once in [`Cli::menu`], then handed to the subcommand.

pub mod add;
pub mod delete;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod migrations;
pub mod show;
pub mod toggle;

use crate::db::{db::Db, tasks::TaskStore};
use crate::libs::{config::Config, messages::Message};
use crate::msg_debug;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Create a task")]
    Add(add::AddArgs),
    #[command(about = "List tasks with optional filters, sorting and search")]
    List(list::ListArgs),
    #[command(about = "Show a single task")]
    Show(show::ShowArgs),
    #[command(about = "Edit a task")]
    Edit(edit::EditArgs),
    #[command(about = "Toggle the completed flag of a task")]
    Toggle(toggle::ToggleArgs),
    #[command(about = "Delete a task")]
    Delete(delete::DeleteArgs),
    #[command(about = "Export tasks to CSV or JSON")]
    Export(export::ExportArgs),
    #[command(about = "Configuration initialization")]
    Init,
    #[command(about = "Inspect database migrations")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();

        match cli.command {
            Commands::Init => init::cmd(),
            Commands::Migrations(args) => migrations::cmd(args, &Config::load()?),
            Commands::Add(args) => add::cmd(args, &Self::store()?),
            Commands::List(args) => list::cmd(args, &Self::store()?),
            Commands::Show(args) => show::cmd(args, &Self::store()?),
            Commands::Edit(args) => edit::cmd(args, &Self::store()?),
            Commands::Toggle(args) => toggle::cmd(args, &Self::store()?),
            Commands::Delete(args) => delete::cmd(args, &Self::store()?),
            Commands::Export(args) => export::cmd(args, &Self::store()?),
        }
    }

    /// Opens the configured database, migrating it if needed.
    fn store() -> Result<TaskStore> {
        let db = Db::from_config(&Config::load()?)?;
        msg_debug!(Message::DatabaseOpened(db.path().display().to_string()));
        TaskStore::new(&db)
    }
}

use crate::{
    db::{
        db::Db,
        migrations::{get_db_version, get_migration_history, needs_migration},
    },
    libs::{config::Config, messages::Message},
    msg_info, msg_print,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::time::Duration;

#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    command: MigrationsCommand,
}

#[derive(Debug, Subcommand)]
enum MigrationsCommand {
    /// Show the schema version and whether migrations are pending
    Status,
    /// List applied migrations
    History,
}

/// Inspects the schema without migrating it.
pub fn cmd(args: MigrationsArgs, config: &Config) -> Result<()> {
    let db = Db::new_without_migrations(config.db_path()?, Duration::from_millis(config.busy_timeout_ms))?;
    let conn = db.connect()?;
    msg_print!(Message::DatabaseOpened(db.path().display().to_string()));

    match args.command {
        MigrationsCommand::Status => {
            msg_print!(Message::DatabaseVersion(get_db_version(&conn)?));
            if needs_migration(&conn)? {
                msg_info!(Message::DatabaseNeedsUpdate);
            } else {
                msg_info!(Message::DatabaseUpToDate);
            }
        }
        MigrationsCommand::History => {
            msg_print!(Message::MigrationHistory, true);
            for (version, name, applied_at) in get_migration_history(&conn)? {
                msg_print!(Message::MigrationHistoryEntry(version, name, applied_at));
            }
        }
    }

    Ok(())
}

use super::list::FilterArgs;
use crate::{
    db::tasks::TaskStore,
    libs::{
        export::{ExportFormat, Exporter},
        messages::Message,
    },
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    filters: FilterArgs,
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,
    /// Output file (default: todos_export_<timestamp>.<ext>)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn cmd(args: ExportArgs, store: &TaskStore) -> Result<()> {
    let tasks = store.list(&args.filters.query())?;

    if tasks.is_empty() {
        msg_info!(Message::NoTasksToExport);
        return Ok(());
    }

    let path = Exporter::new(args.format, args.output).export(&tasks)?;
    msg_success!(Message::ExportCompleted(path.display().to_string()));
    Ok(())
}

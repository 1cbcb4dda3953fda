use crate::{db::tasks::TaskStore, libs::messages::Message, msg_success};
use anyhow::{anyhow, Result};
use clap::Args;

#[derive(Debug, Args)]
pub struct ToggleArgs {
    /// Task ID
    id: i64,
}

pub fn cmd(args: ToggleArgs, store: &TaskStore) -> Result<()> {
    let task = store
        .toggle_completed(args.id)
        .map_err(|e| anyhow!(Message::TaskToggleFailed(e.to_string())))?;

    msg_success!(Message::TaskToggled {
        id: task.id,
        completed: task.completed,
    });
    Ok(())
}

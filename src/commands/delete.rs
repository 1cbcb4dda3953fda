use crate::{db::tasks::TaskStore, libs::messages::Message, msg_info, msg_success};
use anyhow::{anyhow, Result};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Task ID
    id: i64,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub fn cmd(args: DeleteArgs, store: &TaskStore) -> Result<()> {
    let task = store
        .get(args.id)
        .map_err(|e| anyhow!(Message::TaskDeleteFailed(e.to_string())))?;

    if !args.yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::ConfirmDeleteTask(task.id, task.title.clone()).to_string())
            .default(false)
            .interact()?;

        if !confirmed {
            msg_info!(Message::OperationCancelled);
            return Ok(());
        }
    }

    store
        .delete(task.id)
        .map_err(|e| anyhow!(Message::TaskDeleteFailed(e.to_string())))?;

    msg_success!(Message::TaskDeleted(task.id));
    Ok(())
}

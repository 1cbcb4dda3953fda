use crate::{
    db::tasks::TaskStore,
    libs::{messages::Message, view::View},
    msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Task ID
    id: i64,
}

pub fn cmd(args: ShowArgs, store: &TaskStore) -> Result<()> {
    let task = store.get(args.id)?;

    msg_print!(Message::TaskDetailsHeader(task.id), true);
    View::task(&task);
    Ok(())
}

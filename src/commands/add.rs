use crate::{
    db::tasks::TaskStore,
    libs::{messages::Message, task::TaskForm},
    msg_success,
};
use anyhow::{anyhow, Result};
use clap::Args;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title
    title: String,
    #[arg(short, long)]
    description: Option<String>,
    /// 1-3 or low, medium, high (default: medium)
    #[arg(short, long)]
    priority: Option<String>,
    /// Default: personal
    #[arg(short, long)]
    category: Option<String>,
    /// todo, doing or done (default: todo)
    #[arg(short, long)]
    status: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    due: Option<String>,
}

pub fn cmd(args: AddArgs, store: &TaskStore) -> Result<()> {
    let form = TaskForm {
        title: Some(args.title),
        description: args.description,
        priority: args.priority,
        category: args.category,
        status: args.status,
        due_date: args.due,
    };

    let task = form
        .validate()
        .and_then(|draft| store.create(&draft))
        .map_err(|e| anyhow!(Message::TaskCreateFailed(e.to_string())))?;

    msg_success!(Message::TaskCreated(task.id, task.title));
    Ok(())
}

use crate::{
    db::tasks::TaskStore,
    libs::{messages::Message, task::TaskForm},
    msg_print, msg_success,
};
use anyhow::{anyhow, Result};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Task ID
    id: i64,
    /// New title. Without any field flag every field is prompted for interactively
    #[arg(short, long)]
    title: Option<String>,
    #[arg(short, long)]
    description: Option<String>,
    #[arg(short, long)]
    priority: Option<String>,
    #[arg(short, long)]
    category: Option<String>,
    #[arg(short, long)]
    status: Option<String>,
    /// YYYY-MM-DD, empty to clear
    #[arg(long)]
    due: Option<String>,
}

pub fn cmd(args: EditArgs, store: &TaskStore) -> Result<()> {
    let task = store
        .get(args.id)
        .map_err(|e| anyhow!(Message::TaskUpdateFailed(e.to_string())))?;
    let current = TaskForm::from(&task);

    let form = if args.has_field_flags() {
        from_flags(args, current)
    } else {
        msg_print!(Message::EditingTask(task.id, task.title.clone()), true);
        prompt(current)?
    };

    let updated = form
        .validate()
        .and_then(|draft| store.update(task.id, &draft))
        .map_err(|e| anyhow!(Message::TaskUpdateFailed(e.to_string())))?;

    msg_success!(Message::TaskUpdated(updated.id));
    Ok(())
}

impl EditArgs {
    fn has_field_flags(&self) -> bool {
        [&self.title, &self.description, &self.priority, &self.category, &self.status, &self.due]
            .iter()
            .any(|flag| flag.is_some())
    }
}

/// Flags override the current values; the store still receives every field.
fn from_flags(args: EditArgs, current: TaskForm) -> TaskForm {
    TaskForm {
        title: args.title.or(current.title),
        description: args.description.or(current.description),
        priority: args.priority.or(current.priority),
        category: args.category.or(current.category),
        status: args.status.or(current.status),
        due_date: args.due.or(current.due_date),
    }
}

fn prompt(current: TaskForm) -> Result<TaskForm> {
    let theme = ColorfulTheme::default();

    let title: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskTitle.to_string())
        .default(current.title.unwrap_or_default())
        .interact_text()?;
    let description: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskDescription.to_string())
        .default(current.description.unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    let priority: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskPriority.to_string())
        .default(current.priority.unwrap_or_default())
        .interact_text()?;
    let category: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskCategory.to_string())
        .default(current.category.unwrap_or_default())
        .interact_text()?;
    let status: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskStatus.to_string())
        .default(current.status.unwrap_or_default())
        .interact_text()?;
    let due_date: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskDueDate.to_string())
        .default(current.due_date.unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    Ok(TaskForm {
        title: Some(title),
        description: Some(description),
        priority: Some(priority),
        category: Some(category),
        status: Some(status),
        due_date: Some(due_date),
    })
}

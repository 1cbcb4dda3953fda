use crate::{
    db::tasks::TaskStore,
    libs::{
        messages::Message,
        query::{TaskQuery, TaskQueryParams},
        view::View,
    },
    msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

/// Filter, sort and search options shared by `list` and `export`.
#[derive(Debug, Args, Default)]
pub struct FilterArgs {
    /// Only tasks in this category ("all" for every category)
    #[arg(short, long)]
    pub category: Option<String>,
    /// Only tasks with this status (todo, doing, done)
    #[arg(short, long)]
    pub status: Option<String>,
    /// Only tasks with this priority (1-3 or low, medium, high)
    #[arg(short, long)]
    pub priority: Option<String>,
    /// Due date bucket (overdue, today, this_week)
    #[arg(long)]
    pub due: Option<String>,
    /// Sort order (created_date, due_date, priority)
    #[arg(long)]
    pub sort: Option<String>,
    /// Case-insensitive search in title and description
    #[arg(short = 'q', long = "search")]
    pub search: Option<String>,
}

impl FilterArgs {
    pub fn params(&self) -> TaskQueryParams {
        TaskQueryParams {
            category: self.category.clone(),
            status: self.status.clone(),
            priority: self.priority.clone(),
            due: self.due.clone(),
            sort: self.sort.clone(),
            q: self.search.clone(),
        }
    }

    /// Builds the query for today's local date, warning about every ignored value.
    pub fn query(&self) -> TaskQuery {
        let query = TaskQuery::from_params(&self.params(), Local::now().date_naive());
        for rejected in query.rejected() {
            msg_warning!(Message::FilterValueIgnored {
                field: rejected.field,
                value: rejected.value.clone(),
            });
        }
        query
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    filters: FilterArgs,
}

pub fn cmd(args: ListArgs, store: &TaskStore) -> Result<()> {
    let tasks = store.list(&args.filters.query())?;

    if tasks.is_empty() {
        msg_info!(Message::TasksNotFound);
        return Ok(());
    }

    msg_print!(Message::TasksHeader(tasks.len()), true);
    View::tasks(&tasks);
    Ok(())
}

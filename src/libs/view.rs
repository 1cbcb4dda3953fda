use super::task::{Task, DUE_DATE_FORMAT};
use prettytable::{row, Table};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) {
        Self::tasks_table(tasks).printstd();
    }

    pub fn task(task: &Task) {
        Self::task_table(task).printstd();
    }

    pub fn tasks_table(tasks: &[Task]) -> Table {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "PRIORITY", "CATEGORY", "STATUS", "DUE", "DONE"]);
        for task in tasks {
            let done = if task.completed { "✔" } else { "" };
            table.add_row(row![
                task.id,
                task.title,
                task.priority,
                task.category,
                task.status,
                format_due(task),
                done
            ]);
        }

        table
    }

    /// Two-column field/value layout for a single task.
    pub fn task_table(task: &Task) -> Table {
        let mut table = Table::new();
        let completed = if task.completed { "yes" } else { "no" };

        table.add_row(row!["ID", task.id]);
        table.add_row(row!["TITLE", task.title]);
        table.add_row(row!["DESCRIPTION", task.description]);
        table.add_row(row!["PRIORITY", task.priority]);
        table.add_row(row!["CATEGORY", task.category]);
        table.add_row(row!["STATUS", task.status]);
        table.add_row(row!["DUE", format_due(task)]);
        table.add_row(row!["COMPLETED", completed]);
        table.add_row(row!["CREATED", task.created_at.format(DATETIME_FORMAT)]);
        table.add_row(row!["UPDATED", task.updated_at.format(DATETIME_FORMAT)]);

        table
    }
}

fn format_due(task: &Task) -> String {
    task.due_date
        .map(|d| d.format(DUE_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::task::{Priority, TaskStatus};
    use chrono::NaiveDate;

    fn sample() -> Task {
        let created = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(9, 30, 0).unwrap();
        Task {
            id: 7,
            title: "Buy groceries".into(),
            description: "milk, eggs".into(),
            priority: Priority::High,
            category: "shopping".into(),
            status: TaskStatus::Doing,
            due_date: NaiveDate::from_ymd_opt(2024, 6, 10),
            completed: false,
            created_at: created,
            updated_at: created,
        }
    }

    #[test]
    fn test_tasks_table_has_header_and_rows() {
        let table = View::tasks_table(&[sample()]);
        assert_eq!(table.len(), 2);

        let rendered = table.to_string();
        assert!(rendered.contains("Buy groceries"));
        assert!(rendered.contains("High"));
        assert!(rendered.contains("doing"));
        assert!(rendered.contains("2024-06-10"));
    }

    #[test]
    fn test_task_table_lists_every_field() {
        let table = View::task_table(&sample());
        assert_eq!(table.len(), 10);
        assert!(table.to_string().contains("2024-06-01 09:30"));
    }
}

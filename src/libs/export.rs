//! Task export to CSV and JSON.
//!
//! The exporter writes whatever list it is given, so filters are applied by
//! the caller through the regular query path. Without an explicit output path
//! a timestamped file is created in the current directory:
//! `todos_export_YYYYMMDD_HHMMSS.<ext>`.

use super::task::{Task, DUE_DATE_FORMAT};
use anyhow::{Context, Result};
use chrono::Local;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Comma-separated values, one row per task.
    Csv,
    /// Pretty-printed JSON array of task objects.
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let output_path = output_path.unwrap_or_else(|| {
            let default_name = format!("todos_export_{}", Local::now().format("%Y%m%d_%H%M%S"));
            PathBuf::from(format!("{}.{}", default_name, format.extension()))
        });

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Writes `tasks` in the configured format and returns the file path.
    pub fn export(&self, tasks: &[Task]) -> Result<PathBuf> {
        match self.format {
            ExportFormat::Csv => self.export_csv(tasks),
            ExportFormat::Json => self.export_json(tasks),
        }
        .with_context(|| format!("exporting to {}", self.output_path.display()))?;

        tracing::debug!(count = tasks.len(), path = %self.output_path.display(), "tasks exported");
        Ok(self.output_path.clone())
    }

    fn export_csv(&self, tasks: &[Task]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record([
            "ID",
            "Title",
            "Description",
            "Priority",
            "Category",
            "Status",
            "Due Date",
            "Completed",
            "Created At",
            "Updated At",
        ])?;

        for task in tasks {
            wtr.write_record(&[
                task.id.to_string(),
                task.title.clone(),
                task.description.clone(),
                task.priority.value().to_string(),
                task.category.clone(),
                task.status.to_string(),
                task.due_date.map(|d| d.format(DUE_DATE_FORMAT).to_string()).unwrap_or_default(),
                task.completed.to_string(),
                task.created_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
                task.updated_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn export_json(&self, tasks: &[Task]) -> Result<()> {
        let json = serde_json::to_string_pretty(tasks)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }
}

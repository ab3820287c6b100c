//! Focus list commands.
//!
//! Tasks come from a JSON export of the task service (an array of
//! `{id, title, priority, status}` objects).

use std::path::PathBuf;

use clap::Subcommand;
use studypal_core::{FocusList, JsonFileTaskSource, TaskSummary};

#[derive(Subcommand)]
pub enum TasksAction {
    /// Show today's focus list built from a task export
    List {
        /// Path to the task export (JSON array)
        #[arg(long)]
        file: PathBuf,
        /// User whose tasks are listed
        #[arg(long, default_value = "local")]
        user: String,
        /// Also show tasks not on today's list
        #[arg(long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: TasksAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TasksAction::List {
            file,
            user,
            all,
            json,
        } => {
            let list = FocusList::load(&JsonFileTaskSource::new(file), &user)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&list)?);
                return Ok(());
            }

            println!("Today's focus tasks ({}):", list.len());
            for task in list.tasks() {
                println!("  {}", format_task(task));
            }
            if all {
                println!();
                println!("Available tasks:");
                for task in list.available() {
                    println!("  {}", format_task(task));
                }
            }
            Ok(())
        }
    }
}

fn format_task(task: &TaskSummary) -> String {
    format!(
        "[{}] {} ({}, {})",
        task.id, task.title, task.priority, task.status
    )
}

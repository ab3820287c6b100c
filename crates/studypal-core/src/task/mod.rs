//! Tasks as seen by the focus timer.
//!
//! Task persistence lives in an external service; the timer only needs a
//! read-only listing to populate the day's focus list. [`TaskSource`] is
//! that seam.

mod focus_list;

pub use focus_list::FocusList;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TaskSourceError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Normal,
    High,
}

/// Task lifecycle status as reported by the task service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    ToDo,
    InProgress,
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::ToDo => "TO DO",
            TaskStatus::InProgress => "IN PROGRESS",
            TaskStatus::Completed => "COMPLETED",
        };
        f.write_str(s)
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Normal => "NORMAL",
            TaskPriority::High => "HIGH",
        };
        f.write_str(s)
    }
}

/// Selectable task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TaskSummary {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            priority: TaskPriority::default(),
            status: TaskStatus::default(),
            description: None,
        }
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }
}

/// Read-only access to a user's tasks.
pub trait TaskSource {
    fn list_tasks(&self, user_id: &str) -> Result<Vec<TaskSummary>, TaskSourceError>;
}

/// In-memory task source keyed by user id.
#[derive(Debug, Clone, Default)]
pub struct StaticTaskSource {
    tasks: HashMap<String, Vec<TaskSummary>>,
}

impl StaticTaskSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: impl Into<String>, tasks: Vec<TaskSummary>) -> Self {
        self.tasks.insert(user_id.into(), tasks);
        self
    }
}

impl TaskSource for StaticTaskSource {
    fn list_tasks(&self, user_id: &str) -> Result<Vec<TaskSummary>, TaskSourceError> {
        self.tasks
            .get(user_id)
            .cloned()
            .ok_or_else(|| TaskSourceError::UnknownUser(user_id.to_string()))
    }
}

/// Task export on disk: a JSON array of tasks belonging to one user.
#[derive(Debug, Clone)]
pub struct JsonFileTaskSource {
    path: PathBuf,
}

impl JsonFileTaskSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskSource for JsonFileTaskSource {
    fn list_tasks(&self, user_id: &str) -> Result<Vec<TaskSummary>, TaskSourceError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|source| TaskSourceError::ReadFailed {
                path: self.path.clone(),
                source,
            })?;
        let tasks: Vec<TaskSummary> = serde_json::from_str(&content)?;
        tracing::debug!(user = %user_id, count = tasks.len(), path = %self.path.display(), "tasks loaded");
        Ok(tasks)
    }
}

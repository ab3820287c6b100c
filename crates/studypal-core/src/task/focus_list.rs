//! The day's focus list.

use serde::Serialize;

use super::{TaskSource, TaskSummary};
use crate::error::TaskSourceError;
use crate::events::Event;
use crate::timer::TimerEngine;

/// Tasks picked for today, plus the full listing they were picked from.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FocusList {
    all: Vec<TaskSummary>,
    today: Vec<TaskSummary>,
}

impl FocusList {
    /// Fetch the user's tasks; every task that is not completed starts on
    /// today's list.
    pub fn load(source: &dyn TaskSource, user_id: &str) -> Result<Self, TaskSourceError> {
        let all = source.list_tasks(user_id)?;
        Ok(Self::from_tasks(all))
    }

    pub fn from_tasks(all: Vec<TaskSummary>) -> Self {
        let today = all.iter().filter(|t| !t.is_completed()).cloned().collect();
        Self { all, today }
    }

    pub fn tasks(&self) -> &[TaskSummary] {
        &self.today
    }

    pub fn get(&self, task_id: &str) -> Option<&TaskSummary> {
        self.today.iter().find(|t| t.id == task_id)
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.get(task_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.today.len()
    }

    pub fn is_empty(&self) -> bool {
        self.today.is_empty()
    }

    /// Known tasks not on today's list.
    pub fn available(&self) -> impl Iterator<Item = &TaskSummary> {
        self.all.iter().filter(|t| !self.contains(&t.id))
    }

    /// Put a known task on today's list. Returns false if the id is unknown
    /// or already listed.
    pub fn add(&mut self, task_id: &str) -> bool {
        if self.contains(task_id) {
            return false;
        }
        match self.all.iter().find(|t| t.id == task_id) {
            Some(task) => {
                self.today.push(task.clone());
                true
            }
            None => false,
        }
    }

    /// Take a task off today's list and tell the engine, which drops the
    /// binding and the task's session counter.
    pub fn remove(&mut self, task_id: &str, engine: &mut TimerEngine) -> Option<Event> {
        let before = self.today.len();
        self.today.retain(|t| t.id != task_id);
        if self.today.len() == before {
            return None;
        }
        Some(engine.on_task_removed(task_id))
    }
}

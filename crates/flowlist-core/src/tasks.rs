//! Task collection and the completion/mood binder.
//!
//! The in-memory collection is the source of truth. Every mutation persists
//! the whole collection; a persistence failure is logged and the in-memory
//! state stands, never rolled back. Validation failures are rejected before
//! any mutation.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Local, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analytics::Analytics;
use crate::error::{CoreError, ValidationError};
use crate::storage::{read_json, write_json, Storage, KEY_ANALYTICS, KEY_TASKS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        };
        f.write_str(label)
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// A to-do item.
///
/// `mood` is non-null only while `completed` is true; clearing completion
/// clears `completed_at` and `mood` together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "default_category")]
    pub category: String,
    pub mood: Option<String>,
    /// Work sessions credited to this task.
    #[serde(default)]
    pub pomodoro_sessions: u32,
}

fn default_category() -> String {
    "general".to_string()
}

/// Fields supplied when creating a task; everything else is assigned.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: String,
    pub due_date: Option<DateTime<Utc>>,
}

impl Default for NewTask {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            priority: Priority::default(),
            category: default_category(),
            due_date: None,
        }
    }
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub due_date: Option<Option<DateTime<Utc>>>,
}

/// Task store and mood binder.
///
/// Completion events are folded into the daily aggregates and streak; the
/// analytics object is owned here so both collections persist from one
/// place.
pub struct TaskStore {
    storage: Arc<dyn Storage>,
    tasks: Vec<Task>,
    analytics: Analytics,
}

impl TaskStore {
    /// Open the store, loading tasks and analytics. Unreadable data falls
    /// back to empty collections (logged, never returned).
    pub fn open(storage: Arc<dyn Storage>) -> Self {
        let tasks = read_json(storage.as_ref(), KEY_TASKS).unwrap_or_default();
        let analytics = read_json(storage.as_ref(), KEY_ANALYTICS).unwrap_or_default();
        Self {
            storage,
            tasks,
            analytics,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    // ── Mutations ────────────────────────────────────────────────────

    pub fn add(&mut self, new: NewTask) -> Result<Task, CoreError> {
        if new.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            description: new.description,
            completed: false,
            created_at: Utc::now(),
            completed_at: None,
            due_date: new.due_date,
            priority: new.priority,
            category: if new.category.is_empty() {
                default_category()
            } else {
                new.category
            },
            mood: None,
            pomodoro_sessions: 0,
        };
        self.tasks.push(task.clone());
        self.persist_tasks();
        Ok(task)
    }

    pub fn update(&mut self, id: &str, update: TaskUpdate) -> Result<Task, CoreError> {
        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(ValidationError::EmptyTitle.into());
            }
        }
        let task = self.find_mut(id)?;
        if let Some(title) = update.title {
            task.title = title;
        }
        if let Some(description) = update.description {
            task.description = description;
        }
        if let Some(priority) = update.priority {
            task.priority = priority;
        }
        if let Some(category) = update.category {
            task.category = category;
        }
        if let Some(due_date) = update.due_date {
            task.due_date = due_date;
        }
        let updated = task.clone();
        self.persist_tasks();
        Ok(updated)
    }

    pub fn delete(&mut self, id: &str) -> Result<(), CoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Err(ValidationError::TaskNotFound(id.to_string()).into());
        }
        self.persist_tasks();
        Ok(())
    }

    /// Mark the task completed with a mood check-in and fold the event into
    /// the daily aggregates and streak, dated by the local clock.
    pub fn complete(&mut self, id: &str, mood: &str) -> Result<Task, CoreError> {
        self.complete_at(id, mood, Local::now())
    }

    /// Completion with an explicit clock, for tests and replays.
    pub fn complete_at(
        &mut self,
        id: &str,
        mood: &str,
        now: DateTime<Local>,
    ) -> Result<Task, CoreError> {
        let task = self.find_mut(id)?;
        task.completed = true;
        task.completed_at = Some(now.with_timezone(&Utc));
        task.mood = Some(mood.to_string());
        let completed = task.clone();
        self.persist_tasks();

        self.analytics
            .record_completion(Some(mood), now.date_naive(), now.hour());
        self.persist_analytics();
        Ok(completed)
    }

    /// Clear completion state. Deliberately leaves daily stats and streaks
    /// as they were; aggregates only move forward.
    pub fn uncomplete(&mut self, id: &str) -> Result<Task, CoreError> {
        let task = self.find_mut(id)?;
        task.completed = false;
        task.completed_at = None;
        task.mood = None;
        let cleared = task.clone();
        self.persist_tasks();
        Ok(cleared)
    }

    /// Credit a completed work session to the task and the day's aggregate.
    pub fn record_pomodoro(&mut self, id: &str) -> Result<Task, CoreError> {
        self.record_pomodoro_at(id, Local::now())
    }

    pub fn record_pomodoro_at(
        &mut self,
        id: &str,
        now: DateTime<Local>,
    ) -> Result<Task, CoreError> {
        let task = self.find_mut(id)?;
        task.pomodoro_sessions += 1;
        let credited = task.clone();
        self.persist_tasks();

        self.analytics.record_pomodoro(now.date_naive(), now.hour());
        self.persist_analytics();
        Ok(credited)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn find_mut(&mut self, id: &str) -> Result<&mut Task, ValidationError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ValidationError::TaskNotFound(id.to_string()))
    }

    fn persist_tasks(&self) {
        write_json(self.storage.as_ref(), KEY_TASKS, &self.tasks);
    }

    fn persist_analytics(&self) {
        write_json(self.storage.as_ref(), KEY_ANALYTICS, &self.analytics);
    }
}

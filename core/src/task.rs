//! The task entity and its transfer representations.
//!
//! # Design
//! `Task` is the stored record and never leaves the core directly. Callers
//! receive a `TaskView` (the output view) and submit a `CreateTask` (the
//! creation input). Keeping the three apart means the wire contract can use
//! camelCase names and `null` optionals without leaking into the store row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Store-assigned task identifier.
pub type TaskId = i64;

/// A persisted task record.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Flip the completion flag and keep `completed_at` in step with it.
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.is_completed = !self.is_completed;
        self.completed_at = if self.is_completed { Some(now) } else { None };
    }
}

/// A record that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl NewTask {
    /// A fresh, incomplete task created at `now`.
    pub fn pending(title: String, description: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            title,
            description,
            is_completed: false,
            created_at: now,
            completed_at: None,
        }
    }

    pub fn with_id(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            description: self.description,
            is_completed: self.is_completed,
            created_at: self.created_at,
            completed_at: self.completed_at,
        }
    }
}

/// Request payload for creating a task.
///
/// `title` is optional here so a missing title is reported by validation
/// ("title required") instead of failing JSON decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTask {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreateTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Read-only view of a task returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<Task> for TaskView {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            is_completed: task.is_completed,
            created_at: task.created_at,
            completed_at: task.completed_at,
        }
    }
}

//! Personal task records.

use serde::{Deserialize, Serialize};

use crate::types::{DueDate, TaskId, UserId};

/// A row from the backend `tasks` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub due_date: DueDate,
    pub completed: bool,
    pub user_id: UserId,
}

/// Request body for creating a task. The backend assigns the id and
/// echoes the persisted row back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub due_date: DueDate,
    pub completed: bool,
    pub user_id: UserId,
}

impl NewTask {
    /// A fresh, not-yet-completed task for the given user.
    pub fn new(title: impl Into<String>, due_date: DueDate, user_id: impl Into<UserId>) -> Self {
        Self {
            title: title.into(),
            due_date,
            completed: false,
            user_id: user_id.into(),
        }
    }
}

/// Request body for toggling a task's completion flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TaskCompletionPatch {
    pub completed: bool,
}

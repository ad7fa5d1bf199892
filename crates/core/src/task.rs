//! Task model - initiatives that move objectives forward.

use serde::{Deserialize, Serialize};
use crate::id::{KeyResultId, ObjectiveId, TaskId};
use crate::{ParseStatusError, Time};

/// A task is a unit of work, optionally linked to an objective and due on a date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Task title
    pub title: String,

    /// Current status
    pub status: TaskStatus,

    /// Objective this task contributes to
    #[serde(default)]
    pub objective_id: Option<ObjectiveId>,

    /// Key result this task contributes to
    #[serde(default)]
    pub key_result_id: Option<KeyResultId>,

    /// When the task is due
    #[serde(default)]
    pub due_date: Option<Time>,

    /// Creation timestamp
    pub created_at: Time,

    /// Last update timestamp
    pub updated_at: Time,
}

impl Task {
    /// Create a new task in the `Todo` column.
    pub fn new(title: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: TaskId::new(),
            title: title.into(),
            status: TaskStatus::Todo,
            objective_id: None,
            key_result_id: None,
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Link to an objective.
    pub fn for_objective(mut self, objective_id: ObjectiveId) -> Self {
        self.objective_id = Some(objective_id);
        self
    }

    /// Set due date.
    pub fn with_due_date(mut self, due: Time) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Set status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the task counts as finished work.
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}

/// Task status, in board order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    Todo,
    /// Being worked on
    InProgress,
    /// Waiting on something
    Blocked,
    /// Finished
    Done,
    /// Dropped; excluded from progress counts
    Cancelled,
}

impl TaskStatus {
    /// All statuses in board order.
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Blocked,
        TaskStatus::Done,
        TaskStatus::Cancelled,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Blocked => "blocked",
            TaskStatus::Done => "done",
            TaskStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "blocked" => Ok(TaskStatus::Blocked),
            "done" => Ok(TaskStatus::Done),
            "cancelled" => Ok(TaskStatus::Cancelled),
            _ => Err(ParseStatusError::new("task", s)),
        }
    }
}

/// Filter for querying tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Filter by status
    pub status: Option<Vec<TaskStatus>>,

    /// Filter by linked objective
    pub objective_id: Option<ObjectiveId>,
}

impl TaskFilter {
    /// Only tasks linked to `objective_id`.
    pub fn for_objective(objective_id: ObjectiveId) -> Self {
        Self {
            objective_id: Some(objective_id),
            ..Default::default()
        }
    }

    /// Whether `task` passes this filter.
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(statuses) = &self.status {
            if !statuses.contains(&task.status) {
                return false;
            }
        }
        match self.objective_id {
            Some(id) => task.objective_id == Some(id),
            None => true,
        }
    }
}

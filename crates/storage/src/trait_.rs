//! Storage trait abstraction.

use async_trait::async_trait;
use okr_core::{Objective, ObjectiveId, Task, TaskFilter, TaskId};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Source of objectives and tasks for the progress engine.
///
/// This trait allows different backends to be plugged in.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Objective operations ===

    /// Save an objective (create or update).
    async fn save_objective(&mut self, objective: &Objective) -> Result<()>;

    /// Load an objective by ID.
    async fn load_objective(&self, id: ObjectiveId) -> Result<Option<Objective>>;

    /// List all objectives, oldest first.
    async fn list_objectives(&self) -> Result<Vec<Objective>>;

    // === Task operations ===

    /// Save a task (create or update).
    async fn save_task(&mut self, task: &Task) -> Result<()>;

    /// Load a task by ID.
    async fn load_task(&self, id: TaskId) -> Result<Option<Task>>;

    /// List tasks matching the filter, oldest first.
    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>>;

    /// Delete a task. Deleting a missing task is not an error.
    async fn delete_task(&mut self, id: TaskId) -> Result<()>;
}

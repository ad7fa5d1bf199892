//! In-memory storage, used by tests and for one-shot imports.

use okr_core::{Objective, ObjectiveId, Task, TaskFilter, TaskId};
use super::{Storage, Result};

/// Storage backend that keeps everything in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    objectives: Vec<Objective>,
    tasks: Vec<Task>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage pre-filled with `objectives` and `tasks`.
    pub fn with_data(objectives: Vec<Objective>, tasks: Vec<Task>) -> Self {
        Self { objectives, tasks }
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn save_objective(&mut self, objective: &Objective) -> Result<()> {
        match self.objectives.iter_mut().find(|o| o.id == objective.id) {
            Some(existing) => *existing = objective.clone(),
            None => self.objectives.push(objective.clone()),
        }
        Ok(())
    }

    async fn load_objective(&self, id: ObjectiveId) -> Result<Option<Objective>> {
        Ok(self.objectives.iter().find(|o| o.id == id).cloned())
    }

    async fn list_objectives(&self) -> Result<Vec<Objective>> {
        let mut objectives = self.objectives.clone();
        objectives.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(objectives)
    }

    async fn save_task(&mut self, task: &Task) -> Result<()> {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(existing) => *existing = task.clone(),
            None => self.tasks.push(task.clone()),
        }
        Ok(())
    }

    async fn load_task(&self, id: TaskId) -> Result<Option<Task>> {
        Ok(self.tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self.tasks.iter().filter(|t| filter.matches(t)).cloned().collect();
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(tasks)
    }

    async fn delete_task(&mut self, id: TaskId) -> Result<()> {
        self.tasks.retain(|t| t.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let mut storage = MemoryStorage::new();
        let mut task = Task::new("Draft");
        storage.save_task(&task).await.unwrap();

        task.title = "Final".to_string();
        storage.save_task(&task).await.unwrap();

        let tasks = storage.list_tasks(&TaskFilter::default()).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Final");
    }

    #[tokio::test]
    async fn test_delete_task() {
        let task = Task::new("Gone soon");
        let mut storage = MemoryStorage::with_data(Vec::new(), vec![task.clone()]);
        storage.delete_task(task.id).await.unwrap();
        assert!(storage.load_task(task.id).await.unwrap().is_none());
    }
}

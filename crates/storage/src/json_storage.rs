//! JSON file storage implementation.
//!
//! Stores one pretty-printed JSON document per entity under the data
//! directory (`objectives/<id>.json`, `tasks/<id>.json`).

use std::path::{Path, PathBuf};
use okr_core::{Objective, ObjectiveId, Task, TaskFilter, TaskId};
use super::{Storage, Result};
use tokio::fs;
use tracing::{debug, warn};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    /// Open storage rooted at `root`, creating the entity directories if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("objectives")).await?;
        fs::create_dir_all(root.join("tasks")).await?;

        debug!("Opened JSON storage at {}", root.display());
        Ok(Self { root })
    }

    /// Data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn objective_path(&self, id: ObjectiveId) -> PathBuf {
        self.root.join("objectives").join(format!("{}.json", id))
    }

    fn task_path(&self, id: TaskId) -> PathBuf {
        self.root.join("tasks").join(format!("{}.json", id))
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn save_objective(&mut self, objective: &Objective) -> Result<()> {
        write_json(&self.objective_path(objective.id), objective).await
    }

    async fn load_objective(&self, id: ObjectiveId) -> Result<Option<Objective>> {
        read_json(&self.objective_path(id)).await
    }

    async fn list_objectives(&self) -> Result<Vec<Objective>> {
        let mut objectives: Vec<Objective> = list_dir(&self.root.join("objectives")).await?;
        objectives.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(objectives)
    }

    async fn save_task(&mut self, task: &Task) -> Result<()> {
        write_json(&self.task_path(task.id), task).await
    }

    async fn load_task(&self, id: TaskId) -> Result<Option<Task>> {
        read_json(&self.task_path(id)).await
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = list_dir(&self.root.join("tasks")).await?;
        tasks.retain(|t| filter.matches(t));
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(tasks)
    }

    async fn delete_task(&mut self, id: TaskId) -> Result<()> {
        fs::remove_file(self.task_path(id)).await.or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
        })?;
        Ok(())
    }
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json.as_bytes()).await?;
    Ok(())
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        match read_json(&path).await {
            Ok(Some(item)) => items.push(item),
            Ok(None) => {}
            Err(e) => warn!("Skipping unreadable document {}: {}", path.display(), e),
        }
    }
    Ok(items)
}

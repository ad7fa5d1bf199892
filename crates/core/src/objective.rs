//! Objective model - a qualitative goal measured by key results.

use serde::{Deserialize, Serialize};
use crate::id::{KeyResultId, ObjectiveId};
use crate::{ParseStatusError, Time};

/// An objective is tracked over a cycle and measured by its key results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// Unique identifier
    pub id: ObjectiveId,

    /// Objective title
    pub title: String,

    /// Detailed description
    #[serde(default)]
    pub description: String,

    /// Lifecycle status
    pub status: ObjectiveStatus,

    /// First day of the cycle
    pub start_date: Time,

    /// Deadline; objectives without one are never under time pressure
    #[serde(default)]
    pub end_date: Option<Time>,

    /// Key results measuring this objective
    #[serde(default)]
    pub key_results: Vec<KeyResult>,

    /// When created
    pub created_at: Time,

    /// Last updated
    pub updated_at: Time,
}

impl Objective {
    /// Create a new active objective starting now.
    pub fn new(title: impl Into<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: ObjectiveId::new(),
            title: title.into(),
            description: String::new(),
            status: ObjectiveStatus::Active,
            start_date: now,
            end_date: None,
            key_results: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the cycle bounds.
    pub fn with_cycle(mut self, start: Time, end: Option<Time>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Add a key result.
    pub fn with_key_result(mut self, key_result: KeyResult) -> Self {
        self.key_results.push(key_result);
        self
    }
}

/// Objective status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveStatus {
    /// Still being drafted
    Draft,
    /// Being worked on
    Active,
    /// Finished
    Completed,
    /// Hidden from reports
    Archived,
}

impl ObjectiveStatus {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectiveStatus::Draft => "draft",
            ObjectiveStatus::Active => "active",
            ObjectiveStatus::Completed => "completed",
            ObjectiveStatus::Archived => "archived",
        }
    }
}

impl std::str::FromStr for ObjectiveStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(ObjectiveStatus::Draft),
            "active" => Ok(ObjectiveStatus::Active),
            "completed" => Ok(ObjectiveStatus::Completed),
            "archived" => Ok(ObjectiveStatus::Archived),
            _ => Err(ParseStatusError::new("objective", s)),
        }
    }
}

/// A quantitative metric contributing to an objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyResult {
    /// Unique identifier
    pub id: KeyResultId,

    /// Key result title
    pub title: String,

    /// Value at the start of the cycle
    #[serde(default)]
    pub start_value: f64,

    /// Latest measured value
    #[serde(default)]
    pub current_value: f64,

    /// Value that counts as done
    pub target_value: f64,

    /// Unit of measurement (e.g. "%", "users")
    #[serde(default)]
    pub unit: String,

    /// Manually marked as done regardless of values
    #[serde(default)]
    pub completed: bool,
}

impl KeyResult {
    /// Create a key result measured from `start` towards `target`.
    pub fn new(title: impl Into<String>, start: f64, target: f64) -> Self {
        Self {
            id: KeyResultId::new(),
            title: title.into(),
            start_value: start,
            current_value: start,
            target_value: target,
            unit: String::new(),
            completed: false,
        }
    }

    /// Set the current value.
    pub fn with_current(mut self, current: f64) -> Self {
        self.current_value = current;
        self
    }

    /// Set the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objective_status_parse() {
        assert_eq!("Active".parse::<ObjectiveStatus>().unwrap(), ObjectiveStatus::Active);
        assert_eq!("archived".parse::<ObjectiveStatus>().unwrap(), ObjectiveStatus::Archived);
        assert!("paused".parse::<ObjectiveStatus>().is_err());
    }

    #[test]
    fn test_objective_deserializes_with_defaults() {
        let json = r#"{
            "id": "01HQ3K5Z8X9V7N2M4P6R8T0W1Y",
            "title": "Grow revenue",
            "status": "active",
            "start_date": "2025-01-01T00:00:00Z",
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }"#;
        let objective: Objective = serde_json::from_str(json).unwrap();
        assert!(objective.end_date.is_none());
        assert!(objective.key_results.is_empty());
        assert!(objective.description.is_empty());
    }

    #[test]
    fn test_key_result_starts_at_start_value() {
        let kr = KeyResult::new("Signups", 100.0, 500.0).with_unit("users");
        assert_eq!(kr.current_value, 100.0);
        assert_eq!(kr.unit, "users");
        assert!(!kr.completed);
    }
}

//! Progress snapshot - the state of one objective at evaluation time.
//!
//! API payloads arrive loosely typed ([`RawProgressSnapshot`]); converting into
//! [`ProgressSnapshot`] is the single place where counts are zero-defaulted,
//! progress is clamped and the cycle length is defaulted.

use serde::{Deserialize, Serialize};

/// Cycle length used when an objective has no usable duration.
pub const DEFAULT_TOTAL_DAYS: u32 = 90;

/// Normalized progress metrics for one objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawProgressSnapshot")]
pub struct ProgressSnapshot {
    /// Completion percentage, 0-100
    pub overall_progress: f64,

    /// Whole days left before the deadline; `None` without a deadline
    pub days_remaining: Option<u32>,

    /// Planned length of the cycle in days
    pub total_days: u32,

    /// Key results already achieved
    pub key_results_completed: u32,

    /// Key results on the objective
    pub total_key_results: u32,

    /// Linked tasks already done
    pub tasks_completed: u32,

    /// Linked tasks
    pub total_tasks: u32,
}

impl ProgressSnapshot {
    /// Snapshot with the given progress and no deadline, key results or tasks.
    pub fn new(overall_progress: f64) -> Self {
        Self {
            overall_progress: clamp_percent(overall_progress),
            ..Default::default()
        }
    }

    /// Set deadline bounds.
    pub fn with_schedule(mut self, days_remaining: u32, total_days: u32) -> Self {
        self.days_remaining = Some(days_remaining);
        self.total_days = total_days;
        self
    }

    /// Set key result counts. `completed` is capped at `total`.
    pub fn with_key_results(mut self, completed: u32, total: u32) -> Self {
        self.key_results_completed = completed.min(total);
        self.total_key_results = total;
        self
    }

    /// Set task counts. `completed` is capped at `total`.
    pub fn with_tasks(mut self, completed: u32, total: u32) -> Self {
        self.tasks_completed = completed.min(total);
        self.total_tasks = total;
        self
    }
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self {
            overall_progress: 0.0,
            days_remaining: None,
            total_days: DEFAULT_TOTAL_DAYS,
            key_results_completed: 0,
            total_key_results: 0,
            tasks_completed: 0,
            total_tasks: 0,
        }
    }
}

/// Progress metrics as received from the API; every field may be missing or junk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawProgressSnapshot {
    /// Completion percentage
    pub overall_progress: Option<f64>,
    /// Days until deadline
    pub days_remaining: Option<f64>,
    /// Cycle length in days
    pub total_days: Option<f64>,
    /// Achieved key results
    pub key_results_completed: Option<f64>,
    /// Key results
    pub total_key_results: Option<f64>,
    /// Done tasks
    pub tasks_completed: Option<f64>,
    /// Tasks
    pub total_tasks: Option<f64>,
}

impl From<RawProgressSnapshot> for ProgressSnapshot {
    fn from(raw: RawProgressSnapshot) -> Self {
        let total_key_results = count(raw.total_key_results);
        let total_tasks = count(raw.total_tasks);

        let days_remaining = match raw.days_remaining {
            Some(days) if days.is_finite() => Some(count(Some(days))),
            _ => None,
        };

        let total_days = match raw.total_days {
            Some(days) if days.is_finite() && days >= 1.0 => count(Some(days)),
            _ => DEFAULT_TOTAL_DAYS,
        };

        Self {
            overall_progress: clamp_percent(raw.overall_progress.unwrap_or(0.0)),
            days_remaining,
            total_days,
            key_results_completed: count(raw.key_results_completed).min(total_key_results),
            total_key_results,
            tasks_completed: count(raw.tasks_completed).min(total_tasks),
            total_tasks,
        }
    }
}

/// Clamp a percentage into [0, 100], mapping NaN to 0.
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

// Negative, NaN and infinite counts collapse to 0; fractions truncate.
fn count(value: Option<f64>) -> u32 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_snapshot_defaults_missing_fields() {
        let snapshot: ProgressSnapshot = RawProgressSnapshot::default().into();
        assert_eq!(snapshot, ProgressSnapshot::default());
        assert_eq!(snapshot.total_days, DEFAULT_TOTAL_DAYS);
        assert!(snapshot.days_remaining.is_none());
    }

    #[test]
    fn test_raw_snapshot_sanitizes_junk() {
        let raw = RawProgressSnapshot {
            overall_progress: Some(150.0),
            days_remaining: Some(-3.0),
            total_days: Some(0.0),
            key_results_completed: Some(5.0),
            total_key_results: Some(3.0),
            tasks_completed: Some(f64::NAN),
            total_tasks: Some(4.7),
        };
        let snapshot = ProgressSnapshot::from(raw);
        assert_eq!(snapshot.overall_progress, 100.0);
        assert_eq!(snapshot.days_remaining, Some(0));
        assert_eq!(snapshot.total_days, DEFAULT_TOTAL_DAYS);
        assert_eq!(snapshot.key_results_completed, 3);
        assert_eq!(snapshot.total_key_results, 3);
        assert_eq!(snapshot.tasks_completed, 0);
        assert_eq!(snapshot.total_tasks, 4);
    }

    #[test]
    fn test_nan_progress_becomes_zero() {
        let raw = RawProgressSnapshot {
            overall_progress: Some(f64::NAN),
            days_remaining: Some(f64::INFINITY),
            ..Default::default()
        };
        let snapshot = ProgressSnapshot::from(raw);
        assert_eq!(snapshot.overall_progress, 0.0);
        assert!(snapshot.days_remaining.is_none());
    }

    #[test]
    fn test_deserialize_camel_case_payload() {
        let json = r#"{
            "overallProgress": 80,
            "daysRemaining": 10,
            "totalDays": 90,
            "keyResultsCompleted": 2,
            "totalKeyResults": 2,
            "tasksCompleted": 5,
            "totalTasks": 5
        }"#;
        let snapshot: ProgressSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.overall_progress, 80.0);
        assert_eq!(snapshot.days_remaining, Some(10));
        assert_eq!(snapshot.key_results_completed, 2);
        assert_eq!(snapshot.tasks_completed, 5);
    }

    #[test]
    fn test_deserialize_tolerates_nulls() {
        let json = r#"{"overallProgress": null, "daysRemaining": null, "totalKeyResults": 2}"#;
        let snapshot: ProgressSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.overall_progress, 0.0);
        assert!(snapshot.days_remaining.is_none());
        assert_eq!(snapshot.total_key_results, 2);
    }

    #[test]
    fn test_builders_cap_completed_counts() {
        let snapshot = ProgressSnapshot::new(40.0)
            .with_key_results(4, 2)
            .with_tasks(9, 3);
        assert_eq!(snapshot.key_results_completed, 2);
        assert_eq!(snapshot.tasks_completed, 3);
    }
}

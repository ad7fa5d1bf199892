//! Progress Health (Layer 2)
//!
//! Objective health scoring, timeline and kanban grouping of tasks, and the
//! tracker service that feeds them from storage.

#![warn(missing_docs)]

pub mod health;
pub mod timeline;
pub mod kanban;
pub mod aggregate;
pub mod tracker;

pub use health::{
    assess, classify_health, compute_health_score, derive_insights, HealthBands, HealthConfig,
    HealthEngine,
};
pub use timeline::{bucket_tasks, Scheduled, TaskBucket, TaskBuckets, TimelineBucketer, TimelineWindows};
pub use kanban::{group_by_status, KanbanBoard, KanbanColumn};
pub use aggregate::{build_snapshot, key_result_progress, objective_progress};
pub use tracker::{
    BasicProgressTracker, ObjectiveReport, PortfolioReport, ProgressTracker, TrackerError,
};

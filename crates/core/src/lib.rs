//! OKR Pulse core data models.
//!
//! This crate defines objectives, key results, tasks and the progress
//! snapshot / health assessment records exchanged with the progress engine.

#![warn(missing_docs)]

// Core identities
mod id;

// Objectives and work
mod objective;
mod task;

// Engine input and output
mod snapshot;
mod health;

// Re-exports
pub use id::*;

pub use objective::{Objective, ObjectiveStatus, KeyResult};
pub use task::{Task, TaskStatus, TaskFilter};
pub use snapshot::{ProgressSnapshot, RawProgressSnapshot, DEFAULT_TOTAL_DAYS, clamp_percent};
pub use health::{HealthAssessment, HealthBreakdown, HealthStatus, Insight};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;

/// Error returned when a status label cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} status: {value}")]
pub struct ParseStatusError {
    kind: &'static str,
    value: String,
}

impl ParseStatusError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

//! Progress tracking service.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Offset, Utc};
use okr_core::{
    HealthAssessment, HealthStatus, Objective, ObjectiveId, ObjectiveStatus, ProgressSnapshot,
    Task, TaskFilter, Time,
};
use okr_storage::{Storage, StorageError};
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregate::build_snapshot;
use crate::health::HealthEngine;
use crate::kanban::{group_by_status, KanbanBoard};
use crate::timeline::{TaskBuckets, TimelineBucketer};

/// Error type for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors that can occur while tracking progress.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// The data source failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Health of a single objective.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectiveReport {
    /// Objective ID
    pub objective_id: ObjectiveId,
    /// Objective title
    pub title: String,
    /// Objective lifecycle status
    pub status: ObjectiveStatus,
    /// Engine input
    pub snapshot: ProgressSnapshot,
    /// Engine output
    pub assessment: HealthAssessment,
}

/// Health of every reportable objective.
#[derive(Debug, Clone, Serialize)]
pub struct PortfolioReport {
    /// When the report was generated
    pub generated_at: Time,
    /// Per-objective reports, oldest objective first
    pub objectives: Vec<ObjectiveReport>,
    /// Number of objectives per health status, every status present
    pub by_status: BTreeMap<HealthStatus, usize>,
    /// Mean health score; `None` without objectives
    pub average_score: Option<f64>,
}

/// Progress tracking service.
#[async_trait]
pub trait ProgressTracker: Send + Sync {
    /// Assess one objective as of `now`.
    async fn assess_objective(&self, id: ObjectiveId, now: Time) -> Result<Option<ObjectiveReport>>;

    /// Assess every objective that is not archived.
    async fn assess_all(&self, now: Time) -> Result<PortfolioReport>;

    /// Tasks matching `filter`, bucketed by due date.
    async fn timeline(&self, filter: &TaskFilter, now: Time) -> Result<TaskBuckets<Task>>;

    /// Tasks matching `filter`, grouped by status.
    async fn kanban(&self, filter: &TaskFilter) -> Result<KanbanBoard<Task>>;
}

/// Basic progress tracker over a [`Storage`] backend.
pub struct BasicProgressTracker<S: Storage> {
    storage: Arc<S>,
    engine: HealthEngine,
    bucketer: TimelineBucketer,
    offset: FixedOffset,
}

impl<S: Storage> BasicProgressTracker<S> {
    /// Create a new progress tracker. Calendar days are UTC days until
    /// [`with_offset`](Self::with_offset) says otherwise.
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(storage),
            engine: HealthEngine::default(),
            bucketer: TimelineBucketer::default(),
            offset: Utc.fix(),
        }
    }

    /// Set the health engine.
    pub fn with_engine(mut self, engine: HealthEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Set the timeline bucketer.
    pub fn with_bucketer(mut self, bucketer: TimelineBucketer) -> Self {
        self.bucketer = bucketer;
        self
    }

    /// Set the UTC offset whose calendar days are used for deadlines and buckets.
    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    fn local(&self, now: Time) -> DateTime<FixedOffset> {
        now.with_timezone(&self.offset)
    }

    fn report(&self, objective: &Objective, tasks: &[Task], now: Time) -> ObjectiveReport {
        let snapshot = build_snapshot(objective, tasks, &self.local(now));
        let assessment = self.engine.assess(&snapshot);

        debug!(
            "Assessed objective {} ({}): score {:.1}, {}",
            objective.id, objective.title, assessment.score, assessment.status
        );

        ObjectiveReport {
            objective_id: objective.id,
            title: objective.title.clone(),
            status: objective.status,
            snapshot,
            assessment,
        }
    }
}

#[async_trait]
impl<S: Storage + 'static> ProgressTracker for BasicProgressTracker<S> {
    async fn assess_objective(&self, id: ObjectiveId, now: Time) -> Result<Option<ObjectiveReport>> {
        let Some(objective) = self.storage.load_objective(id).await? else {
            return Ok(None);
        };
        let tasks = self.storage.list_tasks(&TaskFilter::for_objective(id)).await?;
        Ok(Some(self.report(&objective, &tasks, now)))
    }

    async fn assess_all(&self, now: Time) -> Result<PortfolioReport> {
        let objectives = self.storage.list_objectives().await?;
        let tasks = self.storage.list_tasks(&TaskFilter::default()).await?;

        let reports: Vec<ObjectiveReport> = objectives
            .iter()
            .filter(|o| o.status != ObjectiveStatus::Archived)
            .map(|o| self.report(o, &tasks, now))
            .collect();

        let mut by_status: BTreeMap<HealthStatus, usize> =
            HealthStatus::ALL.into_iter().map(|s| (s, 0)).collect();
        for report in &reports {
            *by_status.entry(report.assessment.status).or_insert(0) += 1;
        }

        let average_score = if reports.is_empty() {
            None
        } else {
            let total: f64 = reports.iter().map(|r| r.assessment.score).sum();
            Some(total / reports.len() as f64)
        };

        info!("Assessed {} objectives", reports.len());

        Ok(PortfolioReport {
            generated_at: now,
            objectives: reports,
            by_status,
            average_score,
        })
    }

    async fn timeline(&self, filter: &TaskFilter, now: Time) -> Result<TaskBuckets<Task>> {
        let tasks = self.storage.list_tasks(filter).await?;
        Ok(self.bucketer.bucket(tasks, &self.local(now)))
    }

    async fn kanban(&self, filter: &TaskFilter) -> Result<KanbanBoard<Task>> {
        let tasks = self.storage.list_tasks(filter).await?;
        Ok(group_by_status(tasks))
    }
}

//! Kanban view: tasks grouped by status.

use std::borrow::Borrow;
use okr_core::{Task, TaskStatus};
use serde::Serialize;

/// One board column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KanbanColumn<T> {
    /// Status shown in this column
    pub status: TaskStatus,
    /// Tasks in input order
    pub tasks: Vec<T>,
}

/// Tasks partitioned by status, one column per status in board order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KanbanBoard<T> {
    /// Columns, empty ones included
    pub columns: Vec<KanbanColumn<T>>,
}

impl<T: Borrow<Task>> KanbanBoard<T> {
    /// Tasks in the column for `status`.
    pub fn column(&self, status: TaskStatus) -> &[T] {
        self.columns
            .iter()
            .find(|c| c.status == status)
            .map(|c| c.tasks.as_slice())
            .unwrap_or(&[])
    }

    /// Total number of tasks on the board.
    pub fn len(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    /// Whether the board has no tasks.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Share of non-cancelled tasks that are done, in percent.
    /// `None` when nothing is left to count.
    pub fn completion_rate(&self) -> Option<f64> {
        let done = self.column(TaskStatus::Done).len();
        let counted = self.len() - self.column(TaskStatus::Cancelled).len();
        if counted == 0 {
            return None;
        }
        Some(done as f64 / counted as f64 * 100.0)
    }
}

/// Stable partition of `tasks` by status.
pub fn group_by_status<I>(tasks: I) -> KanbanBoard<I::Item>
where
    I: IntoIterator,
    I::Item: Borrow<Task>,
{
    let mut columns: Vec<KanbanColumn<I::Item>> = TaskStatus::ALL
        .into_iter()
        .map(|status| KanbanColumn { status, tasks: Vec::new() })
        .collect();

    for task in tasks {
        let status = task.borrow().status;
        if let Some(column) = columns.iter_mut().find(|c| c.status == status) {
            column.tasks.push(task);
        }
    }

    KanbanBoard { columns }
}

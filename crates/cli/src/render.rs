//! Plain-text rendering of reports.

use std::fmt::Write;

use okr_core::{HealthAssessment, ProgressSnapshot, Task};
use okr_progress::{KanbanBoard, ObjectiveReport, PortfolioReport, TaskBuckets};

/// Score, label, breakdown and insights of one assessment.
pub fn assessment(snapshot: &ProgressSnapshot, assessment: &HealthAssessment) -> String {
    let mut out = String::new();
    let b = &assessment.breakdown;
    let _ = writeln!(out, "  Health: {:.1} ({})", assessment.score, assessment.status);
    let _ = writeln!(
        out,
        "  Breakdown: progress {:.1} + time {:.1} + completion {:.1}",
        b.progress, b.time, b.completion
    );
    let _ = writeln!(out, "  Progress: {:.1}%", snapshot.overall_progress);
    match snapshot.days_remaining {
        Some(days) => {
            let _ = writeln!(out, "  Days remaining: {} of {}", days, snapshot.total_days);
        }
        None => {
            let _ = writeln!(out, "  Days remaining: no deadline");
        }
    }
    let _ = writeln!(
        out,
        "  Key results: {}/{}  Tasks: {}/{}",
        snapshot.key_results_completed,
        snapshot.total_key_results,
        snapshot.tasks_completed,
        snapshot.total_tasks
    );
    if !assessment.insights.is_empty() {
        let names: Vec<&str> = assessment.insights.iter().map(|i| i.as_str()).collect();
        let _ = writeln!(out, "  Insights: {}", names.join(", "));
    }
    out
}

/// Full report of one objective.
pub fn report(report: &ObjectiveReport) -> String {
    let mut out = format!("Objective: {} - {}\n", report.objective_id, report.title);
    out.push_str(&assessment(&report.snapshot, &report.assessment));
    out
}

/// One line per objective followed by the status summary.
pub fn portfolio(portfolio: &PortfolioReport) -> String {
    let mut out = format!("Objectives ({})\n", portfolio.objectives.len());
    for r in &portfolio.objectives {
        let _ = writeln!(
            out,
            "  {} | {:>5.1} | {:<15} | {}",
            r.objective_id, r.assessment.score, r.assessment.status.as_str(), r.title
        );
    }
    if let Some(average) = portfolio.average_score {
        let _ = writeln!(out, "Average score: {:.1}", average);
    }
    for (status, count) in &portfolio.by_status {
        let _ = writeln!(out, "  {}: {}", status, count);
    }
    out
}

/// Buckets in display order; empty ones are shown with a count of zero.
pub fn timeline(buckets: &TaskBuckets<Task>) -> String {
    let mut out = String::new();
    for (bucket, tasks) in buckets.iter() {
        let _ = writeln!(out, "{} ({})", bucket, tasks.len());
        for task in tasks {
            let due = task
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            let _ = writeln!(out, "  {} | {:<11} | {:<10} | {}", task.id, task.status, due, task.title);
        }
    }
    out
}

/// Columns in board order.
pub fn kanban(board: &KanbanBoard<Task>) -> String {
    let mut out = String::new();
    for column in &board.columns {
        let _ = writeln!(out, "{} ({})", column.status, column.tasks.len());
        for task in &column.tasks {
            let _ = writeln!(out, "  {} | {}", task.id, task.title);
        }
    }
    if let Some(rate) = board.completion_rate() {
        let _ = writeln!(out, "Done: {:.0}%", rate);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use okr_core::TaskStatus;
    use okr_progress::{assess, bucket_tasks, group_by_status};

    #[test]
    fn test_assessment_lists_insights() {
        let snapshot = ProgressSnapshot::new(20.0)
            .with_schedule(5, 90)
            .with_key_results(0, 4);
        let text = assessment(&snapshot, &assess(&snapshot));
        assert!(text.contains("(critical)"));
        assert!(text.contains("Days remaining: 5 of 90"));
        assert!(text.contains("Insights: behind-schedule, time-critical-low-progress"));
    }

    #[test]
    fn test_assessment_without_deadline() {
        let snapshot = ProgressSnapshot::new(50.0);
        let text = assessment(&snapshot, &assess(&snapshot));
        assert!(text.contains("no deadline"));
        assert!(!text.contains("Insights"));
    }

    #[test]
    fn test_timeline_shows_empty_buckets() {
        let now = DateTime::parse_from_rfc3339("2025-01-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let tasks = vec![Task::new("Ship it").with_due_date(now)];
        let text = timeline(&bucket_tasks(tasks, &now));
        assert!(text.contains("today (1)"));
        assert!(text.contains("overdue (0)"));
        assert!(text.contains("no_due_date (0)"));
        assert!(text.contains("2025-01-15"));
    }

    #[test]
    fn test_kanban_shows_completion() {
        let tasks = vec![
            Task::new("a").with_status(TaskStatus::Done),
            Task::new("b"),
        ];
        let text = kanban(&group_by_status(tasks));
        assert!(text.contains("done (1)"));
        assert!(text.contains("Done: 50%"));
    }
}

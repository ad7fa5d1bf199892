//! Progress aggregation: key results and tasks folded into a [`ProgressSnapshot`].

use chrono::{DateTime, TimeZone};
use okr_core::{
    clamp_percent, KeyResult, Objective, ProgressSnapshot, Task, TaskStatus, DEFAULT_TOTAL_DAYS,
};

/// Completion of a key result, in percent.
///
/// Measured from `start_value` towards `target_value`, so decreasing targets
/// (e.g. churn from 8% down to 2%) work the same as increasing ones.
pub fn key_result_progress(key_result: &KeyResult) -> f64 {
    if key_result.completed {
        return 100.0;
    }

    let KeyResult { start_value, current_value, target_value, .. } = *key_result;
    if !(start_value.is_finite() && current_value.is_finite() && target_value.is_finite()) {
        return 0.0;
    }

    let span = target_value - start_value;
    if span == 0.0 {
        return if current_value >= target_value { 100.0 } else { 0.0 };
    }
    clamp_percent((current_value - start_value) / span * 100.0)
}

/// Mean key result progress; 0 for an objective without key results.
pub fn objective_progress(key_results: &[KeyResult]) -> f64 {
    if key_results.is_empty() {
        return 0.0;
    }
    let sum: f64 = key_results.iter().map(key_result_progress).sum();
    clamp_percent(sum / key_results.len() as f64)
}

/// Build the engine input for `objective` as of `now`.
///
/// `tasks` may contain tasks of other objectives; only linked ones are counted,
/// and cancelled tasks are left out of the totals. Day arithmetic uses calendar
/// days in `now`'s time zone.
pub fn build_snapshot<Tz: TimeZone>(
    objective: &Objective,
    tasks: &[Task],
    now: &DateTime<Tz>,
) -> ProgressSnapshot {
    let tz = now.timezone();
    let today = now.date_naive();
    let start_day = objective.start_date.with_timezone(&tz).date_naive();
    let end_day = objective.end_date.map(|end| end.with_timezone(&tz).date_naive());

    let days_remaining = end_day.map(|end| (end - today).num_days().max(0) as u32);

    let total_days = match end_day {
        Some(end) if end > start_day => (end - start_day).num_days() as u32,
        _ => DEFAULT_TOTAL_DAYS,
    };

    let key_results_completed = objective
        .key_results
        .iter()
        .filter(|kr| key_result_progress(kr) >= 100.0)
        .count() as u32;

    let linked: Vec<&Task> = tasks
        .iter()
        .filter(|t| t.objective_id == Some(objective.id) && t.status != TaskStatus::Cancelled)
        .collect();
    let tasks_completed = linked.iter().filter(|t| t.is_done()).count() as u32;

    ProgressSnapshot {
        overall_progress: objective_progress(&objective.key_results),
        days_remaining,
        total_days,
        key_results_completed,
        total_key_results: objective.key_results.len() as u32,
        tasks_completed,
        total_tasks: linked.len() as u32,
    }
}

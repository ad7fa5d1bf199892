//! Objective health scoring.
//!
//! The score is a weighted sum of three independently bounded components:
//!
//! ```text
//! progress    overall_progress * 0.4                         (<= 40)
//! time        min(30, progress / max(elapsed%, 1) * 30)      (<= 30, 30 without deadline)
//! completion  key_results_completed / total * 100 * 0.3      (<= 30)
//! ```
//!
//! clamped to `[0, 100]` and then mapped onto a [`HealthStatus`] band.
//! The weights and bands are product constants; [`HealthConfig`] exposes
//! them so they can be tuned without touching the formula.

use okr_core::{
    clamp_percent, HealthAssessment, HealthBreakdown, HealthStatus, Insight, ProgressSnapshot,
};
use serde::{Deserialize, Serialize};

/// Weight applied to `overall_progress`.
pub const PROGRESS_WEIGHT: f64 = 0.4;
/// Maximum points awarded for pace against elapsed time.
pub const TIME_HEALTH_MAX: f64 = 30.0;
/// Weight applied to the key result completion percentage.
pub const COMPLETION_WEIGHT: f64 = 0.3;
/// Points below ideal progress tolerated before flagging behind-schedule.
pub const BEHIND_SCHEDULE_TOLERANCE: f64 = 10.0;
/// Objectives with fewer days left than this are time critical.
pub const TIME_CRITICAL_DAYS: u32 = 7;
/// Time critical objectives at or above this progress are not flagged.
pub const TIME_CRITICAL_PROGRESS: f64 = 90.0;

/// Inclusive lower bounds of the health bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthBands {
    /// Lowest `very_healthy` score
    pub very_healthy: f64,
    /// Lowest `healthy` score
    pub healthy: f64,
    /// Lowest `needs_attention` score
    pub needs_attention: f64,
    /// Lowest `at_risk` score
    pub at_risk: f64,
}

impl Default for HealthBands {
    fn default() -> Self {
        Self {
            very_healthy: 85.0,
            healthy: 70.0,
            needs_attention: 50.0,
            at_risk: 30.0,
        }
    }
}

/// Tunable constants of the health engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Weight applied to `overall_progress`
    pub progress_weight: f64,
    /// Cap of the time component
    pub time_health_max: f64,
    /// Weight applied to the key result completion percentage
    pub completion_weight: f64,
    /// Tolerance before behind-schedule is raised
    pub behind_schedule_tolerance: f64,
    /// Days-remaining threshold for time-critical-low-progress
    pub time_critical_days: u32,
    /// Progress threshold for time-critical-low-progress
    pub time_critical_progress: f64,
    /// Score bands
    pub bands: HealthBands,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            progress_weight: PROGRESS_WEIGHT,
            time_health_max: TIME_HEALTH_MAX,
            completion_weight: COMPLETION_WEIGHT,
            behind_schedule_tolerance: BEHIND_SCHEDULE_TOLERANCE,
            time_critical_days: TIME_CRITICAL_DAYS,
            time_critical_progress: TIME_CRITICAL_PROGRESS,
            bands: HealthBands::default(),
        }
    }
}

/// Computes health scores, labels and insights from progress snapshots.
///
/// Stateless apart from its configuration; safe to share between threads.
#[derive(Debug, Clone, Default)]
pub struct HealthEngine {
    config: HealthConfig,
}

impl HealthEngine {
    /// Create an engine with the default constants.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: HealthConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &HealthConfig {
        &self.config
    }

    /// Score components before the final clamp.
    pub fn breakdown(&self, snapshot: &ProgressSnapshot) -> HealthBreakdown {
        let progress = clamp_percent(snapshot.overall_progress);

        HealthBreakdown {
            progress: progress * self.config.progress_weight,
            time: self.time_component(progress, snapshot),
            completion: self.completion_component(snapshot),
        }
    }

    /// Health score in `[0, 100]`.
    pub fn score(&self, snapshot: &ProgressSnapshot) -> f64 {
        clamp_percent(self.breakdown(snapshot).total())
    }

    /// Map a score onto its band. The first band whose lower bound is met wins.
    pub fn classify(&self, score: f64) -> HealthStatus {
        let bands = &self.config.bands;
        if score >= bands.very_healthy {
            HealthStatus::VeryHealthy
        } else if score >= bands.healthy {
            HealthStatus::Healthy
        } else if score >= bands.needs_attention {
            HealthStatus::NeedsAttention
        } else if score >= bands.at_risk {
            HealthStatus::AtRisk
        } else {
            HealthStatus::Critical
        }
    }

    /// Advisory flags for `snapshot`. They never feed back into the score.
    pub fn insights(&self, snapshot: &ProgressSnapshot, _score: f64) -> Vec<Insight> {
        let mut insights = Vec::new();
        let progress = clamp_percent(snapshot.overall_progress);

        if let Some(days_remaining) = snapshot.days_remaining {
            let ideal = elapsed_percent(days_remaining, snapshot.total_days).unwrap_or(0.0);

            if progress > ideal {
                insights.push(Insight::AheadOfSchedule);
            }
            if progress < ideal - self.config.behind_schedule_tolerance {
                insights.push(Insight::BehindSchedule);
            }
        }

        let total = snapshot.total_key_results;
        if total > 0 && snapshot.key_results_completed.min(total) == total {
            insights.push(Insight::AllKeyResultsDone);
        }

        if let Some(days_remaining) = snapshot.days_remaining {
            if days_remaining < self.config.time_critical_days
                && progress < self.config.time_critical_progress
            {
                insights.push(Insight::TimeCriticalLowProgress);
            }
        }

        insights
    }

    /// Score, label and insights in one pass.
    pub fn assess(&self, snapshot: &ProgressSnapshot) -> HealthAssessment {
        let breakdown = self.breakdown(snapshot);
        let score = clamp_percent(breakdown.total());

        HealthAssessment {
            score,
            status: self.classify(score),
            insights: self.insights(snapshot, score),
            breakdown,
        }
    }

    fn time_component(&self, progress: f64, snapshot: &ProgressSnapshot) -> f64 {
        let max = self.config.time_health_max;
        let elapsed = snapshot
            .days_remaining
            .and_then(|days| elapsed_percent(days, snapshot.total_days));

        match elapsed {
            Some(time_progress) => {
                // Nothing elapsed yet must not divide by zero.
                let ratio = progress / time_progress.max(1.0);
                (ratio * max).min(max)
            }
            None => max,
        }
    }

    fn completion_component(&self, snapshot: &ProgressSnapshot) -> f64 {
        let total = snapshot.total_key_results;
        if total == 0 {
            return 0.0;
        }
        let completed = snapshot.key_results_completed.min(total);
        (completed as f64 / total as f64) * 100.0 * self.config.completion_weight
    }
}

/// Share of the cycle already elapsed, in percent. `None` for an empty cycle.
fn elapsed_percent(days_remaining: u32, total_days: u32) -> Option<f64> {
    if total_days == 0 {
        return None;
    }
    let total = total_days as f64;
    Some((total - days_remaining as f64) / total * 100.0)
}

/// Health score of `snapshot` with the default constants.
pub fn compute_health_score(snapshot: &ProgressSnapshot) -> f64 {
    HealthEngine::default().score(snapshot)
}

/// Health band of `score` with the default bands.
pub fn classify_health(score: f64) -> HealthStatus {
    HealthEngine::default().classify(score)
}

/// Advisory flags for `snapshot` with the default constants.
pub fn derive_insights(snapshot: &ProgressSnapshot, score: f64) -> Vec<Insight> {
    HealthEngine::default().insights(snapshot, score)
}

/// Full assessment of `snapshot` with the default constants.
pub fn assess(snapshot: &ProgressSnapshot) -> HealthAssessment {
    HealthEngine::default().assess(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: f64, expected: f64, tolerance: f64) -> bool {
        (actual - expected).abs() < tolerance
    }

    #[test]
    fn test_scenario_on_track_objective_is_very_healthy() {
        let snapshot = ProgressSnapshot::new(80.0)
            .with_schedule(10, 90)
            .with_key_results(2, 2)
            .with_tasks(5, 5);

        let assessment = assess(&snapshot);
        assert!(close(assessment.breakdown.progress, 32.0, 1e-9));
        assert!(close(assessment.breakdown.time, 27.0, 1e-9));
        assert!(close(assessment.breakdown.completion, 30.0, 1e-9));
        assert!(close(assessment.score, 89.0, 1e-9));
        assert_eq!(assessment.status, HealthStatus::VeryHealthy);
        assert!(assessment.has(Insight::AllKeyResultsDone));
        assert!(!assessment.has(Insight::TimeCriticalLowProgress));
    }

    #[test]
    fn test_scenario_late_objective_is_critical() {
        let snapshot = ProgressSnapshot::new(20.0)
            .with_schedule(5, 90)
            .with_key_results(0, 4);

        let assessment = assess(&snapshot);
        assert!(close(assessment.breakdown.time, 6.353, 0.001));
        assert!(close(assessment.score, 14.353, 0.001));
        assert_eq!(assessment.status, HealthStatus::Critical);
        assert_eq!(
            assessment.insights,
            vec![Insight::BehindSchedule, Insight::TimeCriticalLowProgress]
        );
    }

    #[test]
    fn test_score_is_always_clamped() {
        let extremes = [
            ProgressSnapshot { overall_progress: 150.0, ..Default::default() },
            ProgressSnapshot { overall_progress: -40.0, ..Default::default() },
            ProgressSnapshot { overall_progress: f64::NAN, ..Default::default() },
            ProgressSnapshot {
                overall_progress: 100.0,
                key_results_completed: 9,
                total_key_results: 3,
                ..Default::default()
            },
            ProgressSnapshot::new(100.0).with_schedule(90, 90).with_key_results(3, 3),
        ];
        for snapshot in extremes {
            let score = compute_health_score(&snapshot);
            assert!((0.0..=100.0).contains(&score), "score {} out of range", score);
        }
    }

    #[test]
    fn test_progress_share_is_capped_at_forty_points() {
        let over = ProgressSnapshot { overall_progress: 150.0, ..Default::default() };
        let breakdown = HealthEngine::new().breakdown(&over);
        assert!(close(breakdown.progress, 40.0, 1e-9));
    }

    #[test]
    fn test_score_is_monotonic_in_progress() {
        for days_remaining in [None, Some(0), Some(5), Some(45), Some(90)] {
            let mut previous = f64::MIN;
            for step in 0..=150 {
                let snapshot = ProgressSnapshot {
                    overall_progress: step as f64,
                    days_remaining,
                    total_days: 90,
                    key_results_completed: 1,
                    total_key_results: 3,
                    ..Default::default()
                };
                let score = compute_health_score(&snapshot);
                assert!(score >= previous, "score dropped at progress {}", step);
                previous = score;
            }
        }
    }

    #[test]
    fn test_no_deadline_awards_full_time_component() {
        for progress in [0.0, 12.5, 50.0, 100.0] {
            let snapshot = ProgressSnapshot::new(progress).with_key_results(1, 4);
            let breakdown = HealthEngine::new().breakdown(&snapshot);
            assert_eq!(breakdown.time, 30.0);
        }
    }

    #[test]
    fn test_nothing_elapsed_does_not_divide_by_zero() {
        let snapshot = ProgressSnapshot::new(0.0).with_schedule(90, 90);
        let breakdown = HealthEngine::new().breakdown(&snapshot);
        assert_eq!(breakdown.time, 0.0);

        let snapshot = ProgressSnapshot::new(5.0).with_schedule(90, 90);
        let breakdown = HealthEngine::new().breakdown(&snapshot);
        assert_eq!(breakdown.time, 30.0);
    }

    #[test]
    fn test_empty_cycle_counts_as_no_deadline() {
        let snapshot = ProgressSnapshot {
            overall_progress: 10.0,
            days_remaining: Some(3),
            total_days: 0,
            ..Default::default()
        };
        let engine = HealthEngine::new();
        assert_eq!(engine.breakdown(&snapshot).time, 30.0);
        let insights = engine.insights(&snapshot, 0.0);
        // Ideal progress falls back to 0.
        assert!(insights.contains(&Insight::AheadOfSchedule));
        assert!(insights.contains(&Insight::TimeCriticalLowProgress));
    }

    #[test]
    fn test_no_key_results_earns_no_completion_points() {
        let snapshot = ProgressSnapshot::new(50.0);
        assert_eq!(HealthEngine::new().breakdown(&snapshot).completion, 0.0);
    }

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(classify_health(100.0), HealthStatus::VeryHealthy);
        assert_eq!(classify_health(85.0), HealthStatus::VeryHealthy);
        assert_eq!(classify_health(84.999), HealthStatus::Healthy);
        assert_eq!(classify_health(70.0), HealthStatus::Healthy);
        assert_eq!(classify_health(69.999), HealthStatus::NeedsAttention);
        assert_eq!(classify_health(50.0), HealthStatus::NeedsAttention);
        assert_eq!(classify_health(49.999), HealthStatus::AtRisk);
        assert_eq!(classify_health(30.0), HealthStatus::AtRisk);
        assert_eq!(classify_health(29.999), HealthStatus::Critical);
        assert_eq!(classify_health(0.0), HealthStatus::Critical);
        assert_eq!(classify_health(f64::NAN), HealthStatus::Critical);
    }

    #[test]
    fn test_insights_are_independent() {
        // 50 of 100 days elapsed and exactly 50% done.
        let snapshot = ProgressSnapshot::new(50.0)
            .with_schedule(50, 100)
            .with_key_results(3, 3);

        let insights = derive_insights(&snapshot, compute_health_score(&snapshot));
        assert_eq!(insights, vec![Insight::AllKeyResultsDone]);
    }

    #[test]
    fn test_behind_schedule_tolerance_band() {
        // Ideal is 50; 40.5 is within the tolerance, 39.5 is not.
        let within = ProgressSnapshot::new(40.5).with_schedule(50, 100);
        assert!(!derive_insights(&within, 0.0).contains(&Insight::BehindSchedule));

        let behind = ProgressSnapshot::new(39.5).with_schedule(50, 100);
        assert!(derive_insights(&behind, 0.0).contains(&Insight::BehindSchedule));
    }

    #[test]
    fn test_schedule_insights_need_a_deadline() {
        let snapshot = ProgressSnapshot::new(0.0).with_key_results(0, 2);
        assert!(derive_insights(&snapshot, 0.0).is_empty());
    }

    #[test]
    fn test_time_critical_thresholds() {
        let engine = HealthEngine::new();
        let nearly_done = ProgressSnapshot::new(90.0).with_schedule(2, 90);
        assert!(!engine.insights(&nearly_done, 0.0).contains(&Insight::TimeCriticalLowProgress));

        let week_left = ProgressSnapshot::new(10.0).with_schedule(7, 90);
        assert!(!engine.insights(&week_left, 0.0).contains(&Insight::TimeCriticalLowProgress));

        let six_days = ProgressSnapshot::new(10.0).with_schedule(6, 90);
        assert!(engine.insights(&six_days, 0.0).contains(&Insight::TimeCriticalLowProgress));
    }

    #[test]
    fn test_insight_order_is_fixed() {
        let snapshot = ProgressSnapshot::new(80.0)
            .with_schedule(3, 10)
            .with_key_results(1, 1);
        let insights = derive_insights(&snapshot, 0.0);
        assert_eq!(
            insights,
            vec![
                Insight::AheadOfSchedule,
                Insight::AllKeyResultsDone,
                Insight::TimeCriticalLowProgress,
            ]
        );
    }

    #[test]
    fn test_custom_config() {
        let config = HealthConfig {
            bands: HealthBands {
                very_healthy: 95.0,
                ..Default::default()
            },
            time_critical_days: 14,
            ..Default::default()
        };
        let engine = HealthEngine::new().with_config(config);
        assert_eq!(engine.classify(90.0), HealthStatus::Healthy);

        let snapshot = ProgressSnapshot::new(10.0).with_schedule(10, 90);
        assert!(engine.insights(&snapshot, 0.0).contains(&Insight::TimeCriticalLowProgress));
    }

    #[test]
    fn test_config_deserializes_partially() {
        let config: HealthConfig =
            serde_json::from_str(r#"{"behind_schedule_tolerance": 5, "bands": {"at_risk": 25}}"#)
                .unwrap();
        assert_eq!(config.behind_schedule_tolerance, 5.0);
        assert_eq!(config.bands.at_risk, 25.0);
        assert_eq!(config.bands.healthy, 70.0);
        assert_eq!(config.progress_weight, PROGRESS_WEIGHT);
    }
}

//! Health assessment - derived, never persisted.

use serde::{Deserialize, Serialize};
use crate::ParseStatusError;

/// Categorical health label for an objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    /// Score of 85 or more
    VeryHealthy,
    /// Score of 70 or more
    Healthy,
    /// Score of 50 or more
    NeedsAttention,
    /// Score of 30 or more
    AtRisk,
    /// Anything lower
    Critical,
}

impl HealthStatus {
    /// All labels from best to worst.
    pub const ALL: [HealthStatus; 5] = [
        HealthStatus::VeryHealthy,
        HealthStatus::Healthy,
        HealthStatus::NeedsAttention,
        HealthStatus::AtRisk,
        HealthStatus::Critical,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::VeryHealthy => "very_healthy",
            HealthStatus::Healthy => "healthy",
            HealthStatus::NeedsAttention => "needs_attention",
            HealthStatus::AtRisk => "at_risk",
            HealthStatus::Critical => "critical",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HealthStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HealthStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError::new("health", s))
    }
}

/// Qualitative flag attached to an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Insight {
    /// Progress exceeds the share of the cycle already elapsed
    AheadOfSchedule,
    /// Progress trails elapsed time by more than the tolerance
    BehindSchedule,
    /// Every key result is achieved
    AllKeyResultsDone,
    /// Deadline is close and the objective is not nearly finished
    TimeCriticalLowProgress,
}

impl Insight {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Insight::AheadOfSchedule => "ahead-of-schedule",
            Insight::BehindSchedule => "behind-schedule",
            Insight::AllKeyResultsDone => "all-key-results-done",
            Insight::TimeCriticalLowProgress => "time-critical-low-progress",
        }
    }
}

impl std::fmt::Display for Insight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three score components before the final clamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthBreakdown {
    /// Share earned by stated completion (up to 40)
    pub progress: f64,
    /// Share earned by pace against elapsed time (up to 30)
    pub time: f64,
    /// Share earned by achieved key results (up to 30)
    pub completion: f64,
}

impl HealthBreakdown {
    /// Sum of all components, unclamped.
    pub fn total(&self) -> f64 {
        self.progress + self.time + self.completion
    }
}

/// Result of assessing one objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthAssessment {
    /// Health score, 0-100
    pub score: f64,

    /// Label derived from the score
    pub status: HealthStatus,

    /// Advisory flags, in evaluation order
    pub insights: Vec<Insight>,

    /// How the score was made up
    pub breakdown: HealthBreakdown,
}

impl HealthAssessment {
    /// Whether `insight` was raised.
    pub fn has(&self, insight: Insight) -> bool {
        self.insights.contains(&insight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_serialization() {
        let json = serde_json::to_string(&HealthStatus::NeedsAttention).unwrap();
        assert_eq!(json, "\"needs_attention\"");
        assert_eq!("at_risk".parse::<HealthStatus>().unwrap(), HealthStatus::AtRisk);
        assert!("fine".parse::<HealthStatus>().is_err());
    }

    #[test]
    fn test_insight_serialization_is_kebab_case() {
        let json = serde_json::to_string(&vec![
            Insight::AheadOfSchedule,
            Insight::TimeCriticalLowProgress,
        ])
        .unwrap();
        assert_eq!(json, r#"["ahead-of-schedule","time-critical-low-progress"]"#);
        for insight in [
            Insight::AheadOfSchedule,
            Insight::BehindSchedule,
            Insight::AllKeyResultsDone,
            Insight::TimeCriticalLowProgress,
        ] {
            let json = serde_json::to_string(&insight).unwrap();
            assert_eq!(json, format!("\"{}\"", insight.as_str()));
        }
    }

    #[test]
    fn test_breakdown_total() {
        let breakdown = HealthBreakdown {
            progress: 32.0,
            time: 27.0,
            completion: 30.0,
        };
        assert_eq!(breakdown.total(), 89.0);
    }
}

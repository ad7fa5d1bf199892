//! Engine configuration file.

use std::path::Path;

use anyhow::{Context, Result};
use okr_progress::{HealthConfig, HealthEngine, TimelineBucketer, TimelineWindows};
use serde::Deserialize;

/// Contents of the `--config` JSON file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Health engine constants
    pub health: HealthConfig,
    /// Timeline bucket windows
    pub timeline: TimelineWindows,
}

impl PulseConfig {
    /// Load from `path`, or use the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Health engine built from this configuration.
    pub fn engine(&self) -> HealthEngine {
        HealthEngine::new().with_config(self.health)
    }

    /// Timeline bucketer built from this configuration.
    pub fn bucketer(&self) -> TimelineBucketer {
        TimelineBucketer::new().with_windows(self.timeline)
    }
}

use serde::Deserialize;
use std::time::Duration;

use crate::domain::errors::{DashboardError, DashboardResult};
use crate::domain::facts::Granularity;
use crate::domain::logging::LogLevel;

/// Runtime settings; every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub initial_period: Granularity,
    /// Pause between chart teardown and rebuild after a period switch.
    pub rebuild_delay_ms: u64,
    pub chart_width: u32,
    pub chart_height: u32,
    pub log_level: LogLevel,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            initial_period: Granularity::Quarterly,
            rebuild_delay_ms: 100,
            chart_width: 400,
            chart_height: 300,
            log_level: LogLevel::build_default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> DashboardResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| DashboardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// `None` or blank input yields the defaults.
    pub fn from_optional_json(json: Option<&str>) -> DashboardResult<Self> {
        match json.map(str::trim) {
            Some(text) if !text.is_empty() => Self::from_json(text),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> DashboardResult<()> {
        if self.chart_width == 0 || self.chart_height == 0 {
            return Err(DashboardError::Config(format!(
                "chart size must be non-zero, got {}x{}",
                self.chart_width, self.chart_height
            )));
        }
        Ok(())
    }

    pub fn rebuild_delay(&self) -> Duration {
        Duration::from_millis(self.rebuild_delay_ms)
    }
}

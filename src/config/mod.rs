//! Analytics tuning knobs and their JSON persistence.

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::errors::{AnalyticsError, AnalyticsResult};
use crate::utils::{self, persistence};

/// Which [`DailySeriesAnalyzer`](crate::analytics::DailySeriesAnalyzer) backs rate estimation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorKind {
    #[default]
    Statistical,
    BucketMean,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Trailing days of history considered by the rate estimator.
    pub lookback_days: u32,
    /// Planning horizon for goals without a deadline.
    pub default_horizon_days: u32,
    /// Fewest cumulative points before the slope tier is attempted.
    pub min_slope_points: usize,
    pub estimator: EstimatorKind,
    pub currency: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            lookback_days: 90,
            default_horizon_days: 30,
            min_slope_points: 5,
            estimator: EstimatorKind::Statistical,
            currency: "USD".into(),
        }
    }
}

impl AnalyticsConfig {
    pub fn validate(&self) -> AnalyticsResult<()> {
        if self.lookback_days == 0 {
            return Err(AnalyticsError::InvalidInput(
                "lookback_days must be at least 1".into(),
            ));
        }
        if self.default_horizon_days == 0 {
            return Err(AnalyticsError::InvalidInput(
                "default_horizon_days must be at least 1".into(),
            ));
        }
        if self.min_slope_points < 2 {
            return Err(AnalyticsError::InvalidInput(
                "min_slope_points must be at least 2".into(),
            ));
        }
        Ok(())
    }
}

/// Loads and saves [`AnalyticsConfig`] as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager rooted at the application data directory.
    pub fn new() -> Self {
        Self::with_path(utils::config_file())
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn with_base_dir(base: &Path) -> Self {
        Self::with_path(base.join("config.json"))
    }

    /// Returns defaults when no configuration has been saved yet.
    pub fn load(&self) -> AnalyticsResult<AnalyticsConfig> {
        if !self.path.exists() {
            return Ok(AnalyticsConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: AnalyticsConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &AnalyticsConfig) -> AnalyticsResult<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        persistence::write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

//! Analysis configuration loaded from TOML.
//!
//! Every table and key is optional; anything left out falls back to the
//! defaults used by the analyses themselves:
//!
//! ```toml
//! [forecast]
//! periods = 10
//! model = "arima"
//! noise = "uniform"   # or "disabled"
//! seed = 42
//!
//! [moving_average]
//! windows = [5, 20, 50]
//!
//! [volatility]
//! window = 30
//! ```
//!
//! Unknown keys are rejected so that typos do not silently fall back to a
//! default.

use crate::error::{AnalyticsError, Result};
use crate::forecast::{ForecastSettings, NoiseMode, DEFAULT_MODEL, DEFAULT_PERIODS};
use crate::moving_average::DEFAULT_WINDOWS;
use crate::volatility::DEFAULT_VOLATILITY_WINDOW;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level analysis configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub forecast: ForecastConfig,
    pub moving_average: MovingAverageConfig,
    pub volatility: VolatilityConfig,
}

/// `[forecast]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastConfig {
    pub periods: usize,
    /// Requested model label, echoed in forecast output
    pub model: String,
    pub noise: NoiseMode,
    pub seed: Option<u64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            periods: DEFAULT_PERIODS,
            model: DEFAULT_MODEL.to_string(),
            noise: NoiseMode::default(),
            seed: None,
        }
    }
}

/// `[moving_average]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MovingAverageConfig {
    pub windows: Vec<usize>,
}

impl Default for MovingAverageConfig {
    fn default() -> Self {
        Self {
            windows: DEFAULT_WINDOWS.to_vec(),
        }
    }
}

/// `[volatility]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VolatilityConfig {
    pub window: usize,
}

impl Default for VolatilityConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_VOLATILITY_WINDOW,
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)?;
        log::debug!("loading analysis configuration from {}", path.display());
        Self::from_toml_str(&input)
    }

    /// Reject settings the analyses would refuse anyway
    pub fn validate(&self) -> Result<()> {
        if self.forecast.periods == 0 {
            return Err(AnalyticsError::Config(
                "forecast.periods must be positive".to_string(),
            ));
        }
        if self.moving_average.windows.is_empty() {
            return Err(AnalyticsError::Config(
                "moving_average.windows must not be empty".to_string(),
            ));
        }
        if self.moving_average.windows.contains(&0) {
            return Err(AnalyticsError::Config(
                "moving_average.windows must be positive".to_string(),
            ));
        }
        if self.volatility.window == 0 {
            return Err(AnalyticsError::Config(
                "volatility.window must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Noise settings for [`crate::forecast::forecast`]
    pub fn forecast_settings(&self) -> ForecastSettings {
        ForecastSettings {
            noise: self.forecast.noise,
            seed: self.forecast.seed,
        }
    }
}

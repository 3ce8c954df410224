use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::governance::ThresholdProfiles;
use crate::metrics::MetricsConfig;

/// A configuration file whose values break an ordering or range rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub reason: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid configuration: {}", self.reason)
    }
}

impl std::error::Error for ConfigError {}

/// Complete configuration for [`crate::OutcomeAssessor`].
///
/// Every field has a default, so a JSON file only needs the values it
/// overrides.
///
/// ```json
/// {
///   "metrics": { "canny_low": 40.0 },
///   "profiles": {
///     "treatments": {
///       "filler": { "timing": { "too_early_days": 7, "optimal_min_days": 10 } }
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessConfig {
    pub metrics: MetricsConfig,
    pub profiles: ThresholdProfiles,
}

impl AssessConfig {
    /// Load and validate a JSON configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&data)?)
    }

    pub fn from_json_str(data: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: AssessConfig = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Check ordering and range rules of every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.metrics
            .validate()
            .map_err(|reason| ConfigError {
                reason: format!("metrics: {}", reason),
            })?;
        self.profiles
            .validate()
            .map_err(|reason| ConfigError { reason })
    }
}

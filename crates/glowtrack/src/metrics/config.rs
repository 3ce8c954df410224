use serde::{Deserialize, Serialize};

use super::MetricError;

/// Horizontal face bands used by the wrinkle extractor, as `[top, bottom)`
/// fractions of image height. The bands overlap on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrinkleBands {
    pub forehead: [f64; 2],
    pub eyes: [f64; 2],
    pub mouth: [f64; 2],
}

impl Default for WrinkleBands {
    fn default() -> Self {
        Self {
            forehead: [0.1, 0.4],
            eyes: [0.3, 0.6],
            mouth: [0.5, 0.8],
        }
    }
}

/// Fixed constants for the classical metric extractors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Canny hysteresis low threshold.
    pub canny_low: f32,
    /// Canny hysteresis high threshold.
    pub canny_high: f32,
    /// Face bands for the regional wrinkle breakdown.
    pub wrinkle_bands: WrinkleBands,
    /// Lightness std that halves evenness: `evenness = 1 / (1 + std / scale)`.
    pub evenness_std_scale: f64,
    /// Laplacian variance that halves smoothness.
    pub smoothness_variance_scale: f64,
    /// Neutral value of the 8-bit `a` chroma channel; above it skin reads red.
    pub neutral_chroma: f64,
    /// Radius of the diamond structuring element for the pore black-hat.
    pub black_hat_radius: u8,
    /// Black-hat response above which a pixel counts as pore area.
    pub pore_threshold: u8,
    /// Pore area divisor for the reported visibility figure.
    pub pore_visibility_scale: f64,
    /// Run the four extractors concurrently.
    pub parallel: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            canny_low: 50.0,
            canny_high: 150.0,
            wrinkle_bands: WrinkleBands::default(),
            evenness_std_scale: 100.0,
            smoothness_variance_scale: 1000.0,
            neutral_chroma: 128.0,
            black_hat_radius: 1,
            pore_threshold: 10,
            pore_visibility_scale: 1000.0,
            parallel: true,
        }
    }
}

impl MetricsConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if !(self.canny_low.is_finite() && self.canny_high.is_finite())
            || self.canny_low < 0.0
            || self.canny_low > self.canny_high
        {
            return Err(format!(
                "canny thresholds must satisfy 0 <= low <= high (got {} / {})",
                self.canny_low, self.canny_high
            ));
        }
        for (name, band) in [
            ("forehead", self.wrinkle_bands.forehead),
            ("eyes", self.wrinkle_bands.eyes),
            ("mouth", self.wrinkle_bands.mouth),
        ] {
            let ordered = band[0] < band[1];
            let in_range = (0.0..=1.0).contains(&band[0]) && (0.0..=1.0).contains(&band[1]);
            if !(ordered && in_range) {
                return Err(format!(
                    "wrinkle band '{}' must be an ordered fraction range within [0, 1] (got {:?})",
                    name, band
                ));
            }
        }
        for (name, scale) in [
            ("evenness_std_scale", self.evenness_std_scale),
            ("smoothness_variance_scale", self.smoothness_variance_scale),
            ("pore_visibility_scale", self.pore_visibility_scale),
        ] {
            if !(scale.is_finite() && scale > 0.0) {
                return Err(format!("{} must be positive and finite (got {})", name, scale));
            }
        }
        if self.black_hat_radius == 0 {
            return Err("black_hat_radius must be at least 1".to_string());
        }
        Ok(())
    }

    /// [`MetricsConfig::validate`] as an extractor error.
    pub(crate) fn check(&self) -> Result<(), MetricError> {
        self.validate().map_err(MetricError::InvalidConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(MetricsConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validation_catches_bad_values() {
        let mut cfg = MetricsConfig {
            canny_low: 200.0,
            ..MetricsConfig::default()
        };
        assert!(cfg.validate().is_err());

        cfg = MetricsConfig::default();
        cfg.wrinkle_bands.eyes = [0.6, 0.3];
        assert!(cfg.validate().unwrap_err().contains("eyes"));

        cfg = MetricsConfig::default();
        cfg.smoothness_variance_scale = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn check_wraps_the_reason() {
        let cfg = MetricsConfig {
            canny_low: 200.0,
            canny_high: 100.0,
            ..MetricsConfig::default()
        };
        match cfg.check() {
            Err(MetricError::InvalidConfig(reason)) => assert!(reason.contains("canny")),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(MetricsConfig::default().check(), Ok(()));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: MetricsConfig = serde_json::from_str(r#"{"canny_low": 30.0}"#).unwrap();
        assert_eq!(cfg.canny_low, 30.0);
        assert_eq!(cfg.canny_high, 150.0);
        assert_eq!(cfg.wrinkle_bands, WrinkleBands::default());
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lower bounds (inclusive) of each effect tier, in percent improvement.
///
/// Anything below `poor` is `negative`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectThresholds {
    pub poor: f64,
    pub fair: f64,
    pub good: f64,
    pub excellent: f64,
}

impl Default for EffectThresholds {
    fn default() -> Self {
        Self {
            poor: 0.0,
            fair: 10.0,
            good: 30.0,
            excellent: 50.0,
        }
    }
}

impl EffectThresholds {
    fn validate(&self) -> Result<(), String> {
        let bounds = [self.poor, self.fair, self.good, self.excellent];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(format!("effect thresholds must be finite (got {:?})", bounds));
        }
        if !bounds.windows(2).all(|w| w[0] < w[1]) {
            return Err(format!(
                "effect thresholds must be strictly increasing poor < fair < good < excellent (got {:?})",
                bounds
            ));
        }
        Ok(())
    }
}

/// Elapsed-day windows for judging measurement reliability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingWindows {
    /// Photos taken before this many days are too early.
    pub too_early_days: i64,
    /// First day of the optimal window (inclusive).
    pub optimal_min_days: i64,
    /// Last day of the optimal window (inclusive).
    pub optimal_max_days: i64,
    /// Photos taken after this many days are too late.
    pub too_late_days: i64,
}

impl Default for TimingWindows {
    fn default() -> Self {
        Self {
            too_early_days: 14,
            optimal_min_days: 21,
            optimal_max_days: 90,
            too_late_days: 180,
        }
    }
}

impl TimingWindows {
    fn validate(&self) -> Result<(), String> {
        let ordered = 0 <= self.too_early_days
            && self.too_early_days <= self.optimal_min_days
            && self.optimal_min_days <= self.optimal_max_days
            && self.optimal_max_days <= self.too_late_days;
        if !ordered {
            return Err(format!(
                "timing windows must satisfy 0 <= too_early <= optimal_min <= optimal_max <= too_late (got {} / {} / {} / {})",
                self.too_early_days,
                self.optimal_min_days,
                self.optimal_max_days,
                self.too_late_days
            ));
        }
        Ok(())
    }
}

/// Trigger levels of the risk scan. All comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Symmetry improvement below this (percent) is a high risk.
    pub symmetry_regression_pct: f64,
    /// Naturalness below this (0–100) is a medium risk.
    pub min_naturalness: f64,
    /// Any metric improvement below this (percent) counts as a regression.
    pub negative_improvement_pct: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            symmetry_regression_pct: -10.0,
            min_naturalness: 70.0,
            negative_improvement_pct: -5.0,
        }
    }
}

impl RiskThresholds {
    fn validate(&self) -> Result<(), String> {
        if !(self.symmetry_regression_pct.is_finite()
            && self.min_naturalness.is_finite()
            && self.negative_improvement_pct.is_finite())
        {
            return Err("risk thresholds must be finite".to_string());
        }
        if !(0.0..=100.0).contains(&self.min_naturalness) {
            return Err(format!(
                "min_naturalness must be within [0, 100] (got {})",
                self.min_naturalness
            ));
        }
        Ok(())
    }
}

/// Complete threshold set for one governance profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GovernanceConfig {
    pub effect: EffectThresholds,
    pub timing: TimingWindows,
    pub risk: RiskThresholds,
}

impl GovernanceConfig {
    pub(crate) fn validate(&self) -> Result<(), String> {
        self.effect.validate()?;
        self.timing.validate()?;
        self.risk.validate()
    }
}

/// A default governance profile plus per-treatment overrides.
///
/// Lookup is by exact treatment label; unknown labels use the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdProfiles {
    pub default: GovernanceConfig,
    pub treatments: BTreeMap<String, GovernanceConfig>,
}

impl ThresholdProfiles {
    pub fn for_treatment(&self, treatment: &str) -> &GovernanceConfig {
        self.treatments.get(treatment).unwrap_or(&self.default)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        self.default
            .validate()
            .map_err(|e| format!("default profile: {}", e))?;
        for (name, profile) in &self.treatments {
            profile
                .validate()
                .map_err(|e| format!("profile '{}': {}", name, e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GovernanceConfig::default().validate(), Ok(()));
        assert_eq!(ThresholdProfiles::default().validate(), Ok(()));
    }

    #[test]
    fn unordered_values_are_rejected() {
        let mut cfg = GovernanceConfig::default();
        cfg.effect.good = 5.0;
        assert!(cfg.validate().is_err());

        let mut cfg = GovernanceConfig::default();
        cfg.timing.optimal_max_days = 200;
        assert!(cfg.validate().is_err());

        let mut cfg = GovernanceConfig::default();
        cfg.risk.min_naturalness = 140.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn profile_lookup_falls_back_to_default() {
        let mut profiles = ThresholdProfiles::default();
        let mut filler = GovernanceConfig::default();
        filler.timing.too_early_days = 7;
        filler.timing.optimal_min_days = 10;
        profiles.treatments.insert("filler".to_string(), filler.clone());

        assert_eq!(profiles.for_treatment("filler"), &filler);
        assert_eq!(profiles.for_treatment("laser"), &profiles.default);
    }

    #[test]
    fn bad_override_names_its_profile() {
        let mut profiles = ThresholdProfiles::default();
        let mut broken = GovernanceConfig::default();
        broken.effect.excellent = 20.0;
        profiles.treatments.insert("botox".to_string(), broken);
        let err = profiles.validate().unwrap_err();
        assert!(err.contains("'botox'"), "{err}");
    }
}

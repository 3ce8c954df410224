use serde::{Deserialize, Serialize};

use super::EffectThresholds;
use crate::analysis::AnalysisDocument;

/// Effect tier, ordered `Negative < Poor < Fair < Good < Excellent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectLevel {
    Negative,
    Poor,
    Fair,
    Good,
    Excellent,
}

impl EffectLevel {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Negative => "negative",
            Self::Poor => "poor",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Excellent => "excellent",
        }
    }
}

impl std::fmt::Display for EffectLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Step function from overall improvement (percent) to effect tier.
///
/// Each tier includes its lower bound, so with the default thresholds
/// `0 → poor`, `10 → fair`, `30 → good`, `50 → excellent`. Non-finite input
/// carries no usable measurement and maps to `poor`.
pub fn classify_effect(improvement_pct: f64, thresholds: &EffectThresholds) -> EffectLevel {
    if !improvement_pct.is_finite() {
        return EffectLevel::Poor;
    }
    if improvement_pct >= thresholds.excellent {
        EffectLevel::Excellent
    } else if improvement_pct >= thresholds.good {
        EffectLevel::Good
    } else if improvement_pct >= thresholds.fair {
        EffectLevel::Fair
    } else if improvement_pct >= thresholds.poor {
        EffectLevel::Poor
    } else {
        EffectLevel::Negative
    }
}

/// Effect tier of a whole document.
///
/// An unsuccessful document is forced to `poor`; a missing overall
/// improvement counts as 0.
pub fn effect_for_document(doc: &AnalysisDocument, thresholds: &EffectThresholds) -> EffectLevel {
    if !doc.success {
        return EffectLevel::Poor;
    }
    let improvement = doc.overall_assessment.overall_improvement.unwrap_or(0.0);
    classify_effect(improvement, thresholds)
}

use serde::{Deserialize, Serialize};

use super::{has_high_risk, EffectLevel, Risk, TimingStatus};

/// Who may see a report, from most to least open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityState {
    PublicShareable,
    PatientOnly,
    DoctorReview,
    DoctorOnly,
    /// Never chosen by [`decide_visibility`]; honoured by the composer.
    Hidden,
}

impl VisibilityState {
    pub const fn code(self) -> &'static str {
        match self {
            Self::PublicShareable => "public_shareable",
            Self::PatientOnly => "patient_only",
            Self::DoctorReview => "doctor_review",
            Self::DoctorOnly => "doctor_only",
            Self::Hidden => "hidden",
        }
    }
}

/// First-match decision table.
///
/// 1. any high risk → doctor only
/// 2. negative effect → doctor only
/// 3. too-early photo → doctor review
/// 4. poor effect → doctor review
/// 5. fair effect or any risk → patient only
/// 6. good effect → patient only
/// 7. excellent effect → public, shareable
pub fn decide_visibility(
    effect: EffectLevel,
    timing: TimingStatus,
    risks: &[Risk],
) -> VisibilityState {
    use EffectLevel::*;

    let high_risk = has_high_risk(risks);
    let any_risk = !risks.is_empty();

    match (high_risk, effect, timing, any_risk) {
        (true, ..) => VisibilityState::DoctorOnly,
        (_, Negative, ..) => VisibilityState::DoctorOnly,
        (_, _, TimingStatus::TooEarly, _) => VisibilityState::DoctorReview,
        (_, Poor, ..) => VisibilityState::DoctorReview,
        (_, Fair, ..) | (.., true) => VisibilityState::PatientOnly,
        (_, Good, ..) => VisibilityState::PatientOnly,
        (_, Excellent, ..) => VisibilityState::PublicShareable,
    }
}

//! Patient payloads, clinician view, doctor alerts and suggested actions.

use serde::Serialize;

use super::{
    has_high_risk, EffectLevel, ReviewAction, Risk, RiskKind, Severity, TimingReport,
    TimingStatus, VisibilityState,
};
use crate::analysis::{AnalysisDocument, Category};

const HIGHLIGHT_COUNT: usize = 3;
const PENDING_REVIEW_MESSAGE: &str =
    "Your follow-up photos have been received. Your doctor will review them shortly.";

/// What the patient app may render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PatientReport {
    /// Withheld until a clinician has looked at it.
    PendingReview { message: String, can_view: bool },
    Available(AvailableReport),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableReport {
    pub can_view: bool,
    pub can_share: bool,
    pub headline: String,
    pub badge: String,
    pub encouragement: String,
    pub overall_improvement: f64,
    /// Descriptions of the top improvements.
    pub highlights: Vec<String>,
    pub best_improvements: Vec<Improvement>,
    pub summary: String,
    pub next_steps: Vec<String>,
}

/// A positively improved metric, for ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Improvement {
    pub category: Category,
    pub metric: String,
    pub improvement: f64,
    pub description: String,
    pub before_score: Option<f64>,
    pub after_score: Option<f64>,
}

/// Full-detail view for clinicians, regardless of patient visibility.
#[derive(Debug, Clone, Serialize)]
pub struct ClinicianReport<'a> {
    pub effect_level: EffectLevel,
    pub visibility: VisibilityState,
    pub days_after_treatment: i64,
    pub timing: &'a TimingReport,
    pub risks: &'a [Risk],
    pub analysis: &'a AnalysisDocument,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Urgent,
    High,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    AnalysisFailed,
    AsymmetryIncreased,
    UnnaturalAppearance,
    NegativeImprovements,
    PoorOutcome,
    TimingEarly,
}

impl From<RiskKind> for AlertKind {
    fn from(kind: RiskKind) -> Self {
        match kind {
            RiskKind::AnalysisFailed => Self::AnalysisFailed,
            RiskKind::AsymmetryIncreased => Self::AsymmetryIncreased,
            RiskKind::UnnaturalAppearance => Self::UnnaturalAppearance,
            RiskKind::NegativeImprovements => Self::NegativeImprovements,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorAlert {
    pub level: AlertLevel,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub action: ReviewAction,
    /// 1 is most urgent.
    pub priority: u8,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

/// Operational follow-up tag for the clinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    UrgentDoctorContact,
    ScheduleConsultation,
    OfferFreeCorrection,
    DocumentCase,
    OfferFreeTouchUp,
    ScheduleFollowup,
    #[serde(rename = "schedule_followup_2weeks")]
    ScheduleFollowupTwoWeeks,
    SendCareInstructions,
    RequestTestimonial,
    OfferReferralDiscount,
}

struct TierCopy {
    headline: &'static str,
    badge: &'static str,
    encouragement: &'static str,
    next_steps: [&'static str; 3],
}

fn tier_copy(effect: EffectLevel) -> TierCopy {
    match effect {
        EffectLevel::Excellent => TierCopy {
            headline: "Outstanding! Your treatment results are remarkable",
            badge: "Excellent result",
            encouragement: "Your improvement is ahead of most patients and well worth sharing!",
            next_steps: [
                "Keep up your skincare routine",
                "Consider maintenance treatment in 6-8 months",
                "You are welcome to share your transformation",
            ],
        },
        EffectLevel::Good => TierCopy {
            headline: "Great! Your treatment results are clearly visible",
            badge: "Good result",
            encouragement: "Keep up good skincare habits and results will get even better!",
            next_steps: [
                "Good results, keep it up",
                "Use sun protection to maintain the effect",
                "Check in again in 4-6 months",
            ],
        },
        EffectLevel::Fair | EffectLevel::Poor | EffectLevel::Negative => TierCopy {
            headline: "Your treatment is still improving",
            badge: "Improving",
            encouragement: "Results are still developing; take new photos in 2 weeks",
            next_steps: [
                "Results are still developing",
                "Take new photos in 2-3 weeks",
                "Contact your doctor with any questions",
            ],
        },
    }
}

/// Patient payload for a visibility state.
///
/// `None` when the patient may not see anything; a pending-review marker
/// while a clinician must look first; the tiered report otherwise.
pub fn compose_patient_report(
    doc: &AnalysisDocument,
    effect: EffectLevel,
    visibility: VisibilityState,
) -> Option<PatientReport> {
    match visibility {
        VisibilityState::DoctorOnly | VisibilityState::Hidden => None,
        VisibilityState::DoctorReview => Some(PatientReport::PendingReview {
            message: PENDING_REVIEW_MESSAGE.to_string(),
            can_view: false,
        }),
        VisibilityState::PatientOnly | VisibilityState::PublicShareable => {
            let copy = tier_copy(effect);
            let best_improvements = find_best_improvements(doc);
            Some(PatientReport::Available(AvailableReport {
                can_view: true,
                can_share: visibility == VisibilityState::PublicShareable,
                headline: copy.headline.to_string(),
                badge: copy.badge.to_string(),
                encouragement: copy.encouragement.to_string(),
                overall_improvement: doc.overall_assessment.overall_improvement.unwrap_or(0.0),
                highlights: best_improvements
                    .iter()
                    .take(HIGHLIGHT_COUNT)
                    .map(|i| i.description.clone())
                    .collect(),
                best_improvements,
                summary: doc.overall_assessment.summary.clone(),
                next_steps: copy.next_steps.iter().map(|s| s.to_string()).collect(),
            }))
        }
    }
}

/// Positively improved metrics, largest improvement first.
///
/// Metrics without an improvement value, or with a non-positive one, are
/// left out. Ties keep document order.
pub fn find_best_improvements(doc: &AnalysisDocument) -> Vec<Improvement> {
    let mut improvements: Vec<Improvement> = doc
        .metrics()
        .filter_map(|m| {
            let improvement = m.entry.improvement_pct?;
            (improvement > 0.0).then(|| Improvement {
                category: m.category,
                metric: m.name.to_string(),
                improvement,
                description: m.entry.description.clone(),
                before_score: m.entry.before_score,
                after_score: m.entry.after_score,
            })
        })
        .collect();
    improvements.sort_by(|a, b| b.improvement.total_cmp(&a.improvement));
    improvements
}

/// Alerts for the clinician dashboard, sorted by ascending priority.
pub fn compose_doctor_alerts(
    effect: EffectLevel,
    risks: &[Risk],
    timing: TimingStatus,
) -> Vec<DoctorAlert> {
    let mut alerts: Vec<DoctorAlert> = risks
        .iter()
        .filter(|r| r.severity == Severity::High)
        .map(|r| DoctorAlert {
            level: AlertLevel::Urgent,
            kind: r.kind.into(),
            message: r.message.clone(),
            action: r.action,
            priority: 1,
            suggestions: Vec::new(),
        })
        .collect();

    if matches!(effect, EffectLevel::Poor | EffectLevel::Negative) {
        alerts.push(DoctorAlert {
            level: AlertLevel::High,
            kind: AlertKind::PoorOutcome,
            message: format!("Treatment effect is {}; doctor follow-up needed", effect),
            action: ReviewAction::ContactPatient,
            priority: 2,
            suggestions: vec![
                "Assess whether a touch-up is needed".to_string(),
                "Check for adverse reactions".to_string(),
                "Consider adjusting the treatment plan".to_string(),
            ],
        });
    }

    if timing == TimingStatus::TooEarly {
        alerts.push(DoctorAlert {
            level: AlertLevel::Info,
            kind: AlertKind::TimingEarly,
            message: "Photos were taken early; the effect may not be fully visible yet"
                .to_string(),
            action: ReviewAction::ScheduleFollowup,
            priority: 3,
            suggestions: Vec::new(),
        });
    }

    alerts.sort_by_key(|a| a.priority);
    alerts
}

/// Follow-up tags. Triggers append; a high risk comes first.
pub fn suggest_actions(effect: EffectLevel, risks: &[Risk]) -> Vec<SuggestedAction> {
    use SuggestedAction::*;

    let mut actions = Vec::new();
    if has_high_risk(risks) {
        actions.extend([UrgentDoctorContact, ScheduleConsultation]);
    }
    match effect {
        EffectLevel::Negative => actions.extend([OfferFreeCorrection, DocumentCase]),
        EffectLevel::Poor => actions.extend([OfferFreeTouchUp, ScheduleFollowup]),
        EffectLevel::Fair => actions.extend([ScheduleFollowupTwoWeeks, SendCareInstructions]),
        EffectLevel::Excellent => actions.extend([RequestTestimonial, OfferReferralDiscount]),
        EffectLevel::Good => {}
    }
    actions
}

//! Danger-signal scan over an analysis document.

use serde::Serialize;

use super::RiskThresholds;
use crate::analysis::{AnalysisDocument, Category, MetricEntry};

/// Risk severity. `High` outranks `Medium` in every routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskKind {
    AnalysisFailed,
    AsymmetryIncreased,
    UnnaturalAppearance,
    NegativeImprovements,
}

/// Follow-up requested by a risk or doctor alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewAction {
    ManualReview,
    UrgentDoctorReview,
    DoctorReview,
    ContactPatient,
    ScheduleFollowup,
}

/// One metric that regressed past the negative-improvement threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NegativeItem {
    pub category: Category,
    pub metric: String,
    pub improvement: f64,
    pub before: Option<f64>,
    pub after: Option<f64>,
}

/// Evidence attached to a risk.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RiskEvidence {
    Metric(MetricEntry),
    Naturalness { naturalness: f64 },
    NegativeItems(Vec<NegativeItem>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Risk {
    #[serde(rename = "type")]
    pub kind: RiskKind,
    pub severity: Severity,
    pub message: String,
    pub action: ReviewAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<RiskEvidence>,
}

const SYMMETRY_METRIC: &str = "facial_symmetry";
const DEFAULT_NATURALNESS: f64 = 100.0;

/// Scan a document for danger signals.
///
/// An unsuccessful document yields only `analysis_failed`. Otherwise the
/// symmetry, naturalness and negative-improvement checks run independently
/// and append in that order.
pub fn detect_risks(doc: &AnalysisDocument, thresholds: &RiskThresholds) -> Vec<Risk> {
    if !doc.success {
        return vec![Risk {
            kind: RiskKind::AnalysisFailed,
            severity: Severity::High,
            message: match &doc.error {
                Some(reason) => format!("Upstream analysis failed: {}", reason),
                None => "Upstream analysis failed".to_string(),
            },
            action: ReviewAction::ManualReview,
            data: None,
        }];
    }

    let mut risks = Vec::new();

    if let Some(symmetry) = doc.metric(Category::FacialContour, SYMMETRY_METRIC) {
        if symmetry.improvement_or_zero() < thresholds.symmetry_regression_pct {
            risks.push(Risk {
                kind: RiskKind::AsymmetryIncreased,
                severity: Severity::High,
                message: format!(
                    "Facial symmetry decreased by more than {}%",
                    -thresholds.symmetry_regression_pct
                ),
                action: ReviewAction::UrgentDoctorReview,
                data: Some(RiskEvidence::Metric(symmetry.clone())),
            });
        }
    }

    let naturalness = doc
        .overall_assessment
        .naturalness
        .unwrap_or(DEFAULT_NATURALNESS);
    if naturalness < thresholds.min_naturalness {
        risks.push(Risk {
            kind: RiskKind::UnnaturalAppearance,
            severity: Severity::Medium,
            message: format!("Low naturalness score ({}/100)", naturalness),
            action: ReviewAction::DoctorReview,
            data: Some(RiskEvidence::Naturalness { naturalness }),
        });
    }

    let negatives = find_negative_improvements(doc, thresholds.negative_improvement_pct);
    if !negatives.is_empty() {
        risks.push(Risk {
            kind: RiskKind::NegativeImprovements,
            severity: Severity::Medium,
            message: format!("{} metric(s) regressed", negatives.len()),
            action: ReviewAction::DoctorReview,
            data: Some(RiskEvidence::NegativeItems(negatives)),
        });
    }

    tracing::debug!(n_risks = risks.len(), "risk scan complete");
    risks
}

/// Every metric whose improvement is strictly below `threshold_pct`.
///
/// Missing improvements count as 0.
pub fn find_negative_improvements(doc: &AnalysisDocument, threshold_pct: f64) -> Vec<NegativeItem> {
    doc.metrics()
        .filter(|m| m.entry.improvement_or_zero() < threshold_pct)
        .map(|m| NegativeItem {
            category: m.category,
            metric: m.name.to_string(),
            improvement: m.entry.improvement_or_zero(),
            before: m.entry.before_score,
            after: m.entry.after_score,
        })
        .collect()
}

pub fn has_high_risk(risks: &[Risk]) -> bool {
    risks.iter().any(|r| r.severity == Severity::High)
}

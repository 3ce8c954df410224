use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    classify_timing, compose_doctor_alerts, compose_patient_report, days_between, decide_visibility,
    detect_risks, effect_for_document, suggest_actions, ClinicianReport, DoctorAlert, EffectLevel,
    GovernanceConfig, PatientReport, Risk, SuggestedAction, TimingAssessment, TimingError,
    VisibilityState,
};
use crate::analysis::AnalysisDocument;

/// Treatment facts that accompany one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentContext {
    pub treatment_date: NaiveDate,
    pub photo_date: NaiveDate,
    /// Free-text label, used in messages and for profile lookup.
    pub treatment_type: String,
}

impl TreatmentContext {
    pub fn new(
        treatment_date: NaiveDate,
        photo_date: NaiveDate,
        treatment_type: impl Into<String>,
    ) -> Self {
        Self {
            treatment_date,
            photo_date,
            treatment_type: treatment_type.into(),
        }
    }

    pub fn days_elapsed(&self) -> i64 {
        days_between(self.treatment_date, self.photo_date)
    }
}

/// Timing assessment with its guidance text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingReport {
    #[serde(flatten)]
    pub assessment: TimingAssessment,
    pub message: String,
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationError {
    Timing(TimingError),
}

impl std::fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timing(err) => write!(f, "invalid treatment timing: {}", err),
        }
    }
}

impl std::error::Error for EvaluationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Timing(err) => Some(err),
        }
    }
}

impl From<TimingError> for EvaluationError {
    fn from(err: TimingError) -> Self {
        Self::Timing(err)
    }
}

/// Result of governing one analysis document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub effect_level: EffectLevel,
    pub visibility: VisibilityState,
    pub days_after_treatment: i64,
    pub timing_status: TimingReport,
    pub risks: Vec<Risk>,
    /// `None` when the patient may not see anything.
    pub patient_report: Option<PatientReport>,
    pub doctor_alerts: Vec<DoctorAlert>,
    /// The evaluated document, unchanged, for clinicians.
    pub raw_analysis: AnalysisDocument,
    pub actions: Vec<SuggestedAction>,
}

impl Evaluation {
    /// Full-detail view, independent of patient visibility.
    pub fn clinician_report(&self) -> ClinicianReport<'_> {
        ClinicianReport {
            effect_level: self.effect_level,
            visibility: self.visibility,
            days_after_treatment: self.days_after_treatment,
            timing: &self.timing_status,
            risks: &self.risks,
            analysis: &self.raw_analysis,
        }
    }
}

/// Applies one governance profile to analysis documents.
///
/// Create once, evaluate many documents.
#[derive(Debug, Clone, Default)]
pub struct ReportGovernor {
    config: GovernanceConfig,
}

impl ReportGovernor {
    pub fn new(config: GovernanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    /// Classify, scan, route and compose reports for one document.
    ///
    /// Fails only on invalid timing input; every document problem is
    /// expressed as an effect tier and risks instead.
    pub fn evaluate(
        &self,
        doc: &AnalysisDocument,
        context: &TreatmentContext,
    ) -> Result<Evaluation, EvaluationError> {
        let days = context.days_elapsed();
        let timing = classify_timing(days, &self.config.timing)?;
        tracing::debug!(days, status = ?timing.status, "timing classified");

        let effect_level = effect_for_document(doc, &self.config.effect);
        let risks = detect_risks(doc, &self.config.risk);
        let visibility = decide_visibility(effect_level, timing.status, &risks);

        let patient_report = compose_patient_report(doc, effect_level, visibility);
        let doctor_alerts = compose_doctor_alerts(effect_level, &risks, timing.status);
        let actions = suggest_actions(effect_level, &risks);

        tracing::info!(
            treatment = %context.treatment_type,
            effect = %effect_level,
            visibility = visibility.code(),
            n_risks = risks.len(),
            n_alerts = doctor_alerts.len(),
            "report evaluated"
        );

        Ok(Evaluation {
            effect_level,
            visibility,
            days_after_treatment: days,
            timing_status: TimingReport {
                message: timing.message(&context.treatment_type),
                recommendation: timing.recommendation().map(str::to_string),
                assessment: timing,
            },
            risks,
            patient_report,
            doctor_alerts,
            raw_analysis: doc.clone(),
            actions,
        })
    }
}

//! Rule-based governance of analysis documents.
//!
//! Pipeline stages:
//! 1. Timing: elapsed days → timing status and reliability.
//! 2. Effect: overall improvement → effect tier.
//! 3. Risks: ordered scan of the document for danger signals.
//! 4. Visibility: first-match decision table over effect, timing and risks.
//! 5. Reports: patient payload, clinician view, doctor alerts, actions.
//!
//! Every stage is a pure function of its inputs and a [`GovernanceConfig`].

mod config;
mod effect;
mod evaluate;
mod report;
mod risk;
mod timing;
mod visibility;

pub use config::{
    EffectThresholds, GovernanceConfig, RiskThresholds, ThresholdProfiles, TimingWindows,
};
pub use effect::{classify_effect, effect_for_document, EffectLevel};
pub use evaluate::{Evaluation, EvaluationError, ReportGovernor, TimingReport, TreatmentContext};
pub use report::{
    compose_doctor_alerts, compose_patient_report, find_best_improvements, suggest_actions,
    AlertKind, AlertLevel, AvailableReport, ClinicianReport, DoctorAlert, Improvement,
    PatientReport, SuggestedAction,
};
pub use risk::{
    detect_risks, find_negative_improvements, has_high_risk, NegativeItem, ReviewAction, Risk,
    RiskEvidence, RiskKind, Severity,
};
pub use timing::{
    classify_timing, days_between, Reliability, TimingAssessment, TimingError, TimingStatus,
};
pub use visibility::{decide_visibility, VisibilityState};

//! glowtrack: before/after outcome quantification and report governance.
//!
//! The crate turns two aligned photographs of the same subject into
//! per-dimension improvement scores, and turns improvement data (from those
//! scores or from an external structured analysis) into a governed report.
//! The stages are:
//!
//! 1. **Imaging** – grayscale / L\*a\*b\* conversion, Canny edges, Laplacian,
//!    morphological black-hat.
//! 2. **Metrics** – wrinkle, skin-tone, texture and pore extractors, each
//!    producing a [`MetricScore`] or an error-tagged result.
//! 3. **Aggregate** – mean of the present dimension scores.
//! 4. **Analysis** – the canonical [`AnalysisDocument`] shared by every scorer.
//! 5. **Governance** – effect tier, timing reliability, risk scan, visibility
//!    decision and patient / clinician payloads.
//!
//! # Public API
//! - [`OutcomeAssessor`] as the primary entry point
//! - [`AssessConfig`] and its parts for threshold tuning
//! - the free stage functions for callers that only need one stage
//!
//! Every stage is a pure function of its inputs and an explicit config value.

mod api;
mod config;
mod imaging;
mod metrics;

pub mod analysis;
pub mod governance;

#[cfg(test)]
pub(crate) mod test_utils;

pub use analysis::{AnalysisDocument, Category, DocumentError, MetricEntry, OverallAssessment};
pub use api::{Assessment, OutcomeAssessor};
pub use config::{AssessConfig, ConfigError};
pub use governance::{
    EffectLevel, EffectThresholds, Evaluation, EvaluationError, GovernanceConfig, ReportGovernor,
    Risk, RiskKind, RiskThresholds, Severity, ThresholdProfiles, TimingAssessment, TimingStatus,
    TimingWindows, TreatmentContext, VisibilityState,
};
pub use imaging::{side_by_side, to_lab, LabPlanes};
pub use metrics::{
    analyze_pores, analyze_skin_tone, analyze_texture, analyze_wrinkles, compare_images,
    overall_score, BandReport, ComparisonReport, Dimension, DimensionResult, FaceBand,
    MetricError, MetricScore, MetricsConfig, PoreReport, SkinToneReport, TextureReport,
    WrinkleBands, WrinkleReport,
};

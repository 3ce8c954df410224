//! High-level assessment API.
//!
//! [`OutcomeAssessor`] is the primary entry point. It wraps an
//! [`AssessConfig`] and runs the classical image comparison, document
//! governance, or both back to back.

use std::path::Path;

use image::RgbImage;
use serde::Serialize;

use crate::analysis::AnalysisDocument;
use crate::config::AssessConfig;
use crate::governance::{Evaluation, EvaluationError, ReportGovernor, TreatmentContext};
use crate::metrics::{compare_images, ComparisonReport};

/// Classical comparison plus its governed evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub comparison: ComparisonReport,
    pub evaluation: Evaluation,
}

/// Primary assessment interface.
///
/// Create once, assess many photo pairs.
///
/// # Examples
///
/// ```no_run
/// use chrono::NaiveDate;
/// use glowtrack::{OutcomeAssessor, TreatmentContext};
///
/// let assessor = OutcomeAssessor::new();
/// let before = image::open("before.jpg").unwrap().to_rgb8();
/// let after = image::open("after.jpg").unwrap().to_rgb8();
/// let context = TreatmentContext::new(
///     NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
///     "Botox",
/// );
/// let assessment = assessor.assess(&before, &after, &context).unwrap();
/// println!("visibility: {:?}", assessment.evaluation.visibility);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OutcomeAssessor {
    config: AssessConfig,
}

impl OutcomeAssessor {
    /// Create an assessor with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with full config control.
    pub fn with_config(config: AssessConfig) -> Self {
        Self { config }
    }

    /// Load a JSON config file and create an assessor in one step.
    pub fn from_config_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::with_config(AssessConfig::from_json_file(path)?))
    }

    /// Access the current configuration.
    pub fn config(&self) -> &AssessConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut AssessConfig {
        &mut self.config
    }

    /// Classical before/after metrics for an aligned pair.
    pub fn compare(&self, before: &RgbImage, after: &RgbImage) -> ComparisonReport {
        compare_images(before, after, &self.config.metrics)
    }

    /// Govern an analysis document from any scorer.
    ///
    /// Thresholds come from the profile matching the treatment label.
    pub fn evaluate(
        &self,
        doc: &AnalysisDocument,
        context: &TreatmentContext,
    ) -> Result<Evaluation, EvaluationError> {
        let profile = self.config.profiles.for_treatment(&context.treatment_type);
        ReportGovernor::new(profile.clone()).evaluate(doc, context)
    }

    /// Compare an image pair and govern the result.
    pub fn assess(
        &self,
        before: &RgbImage,
        after: &RgbImage,
        context: &TreatmentContext,
    ) -> Result<Assessment, EvaluationError> {
        let comparison = self.compare(before, after);
        let doc = AnalysisDocument::from_comparison(&comparison);
        let evaluation = self.evaluate(&doc, context)?;
        Ok(Assessment {
            comparison,
            evaluation,
        })
    }
}

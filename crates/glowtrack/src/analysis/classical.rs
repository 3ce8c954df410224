//! Adapter from a classical [`ComparisonReport`] to the canonical document.

use super::{AnalysisDocument, Category, MetricEntry};
use crate::metrics::{ComparisonReport, FaceBand, MetricScore};

impl AnalysisDocument {
    /// Express a classical image comparison in document form.
    ///
    /// Metrics carry the signed change so regressions stay visible to risk
    /// detection. Failed dimensions are left out. The overall improvement is
    /// the 0–10 overall score on the 0–100 scale. A report with no measured
    /// dimension becomes a failed document.
    pub fn from_comparison(report: &ComparisonReport) -> Self {
        if report.n_measured() == 0 {
            return Self::failed("no image dimension could be measured");
        }

        let mut doc = AnalysisDocument {
            success: true,
            ..AnalysisDocument::default()
        };

        if let Some(wrinkles) = report.wrinkles.measured() {
            doc.insert_metric(
                Category::WrinkleAnalysis,
                "edge_density",
                entry(&wrinkles.edges, "Fine-line edge density"),
            );
            for band in &wrinkles.bands {
                let (name, label) = match band.band {
                    FaceBand::Forehead => ("forehead_lines", "Forehead lines"),
                    FaceBand::Eyes => ("periorbital_lines", "Lines around the eyes"),
                    FaceBand::Mouth => ("perioral_lines", "Lines around the mouth"),
                };
                doc.insert_metric(Category::WrinkleAnalysis, name, entry(&band.edges, label));
            }
        }

        if let Some(tone) = report.skin_tone.measured() {
            doc.insert_metric(
                Category::SkinQuality,
                "tone_evenness",
                entry(&tone.evenness, "Skin tone evenness"),
            );
            doc.insert_metric(
                Category::SkinQuality,
                "redness",
                MetricEntry {
                    before_score: Some(tone.redness_before),
                    after_score: Some(tone.redness_after),
                    improvement_pct: Some(tone.redness_change_pct),
                    description: describe("Redness", tone.redness_change_pct),
                },
            );
        }

        if let Some(texture) = report.texture.measured() {
            doc.insert_metric(
                Category::SkinQuality,
                "texture_smoothness",
                entry(&texture.smoothness, "Texture smoothness"),
            );
        }

        if let Some(pores) = report.pores.measured() {
            doc.insert_metric(
                Category::SkinQuality,
                "pore_size",
                entry(&pores.area, "Visible pore area"),
            );
        }

        doc.overall_assessment.overall_improvement = Some(report.overall_score * 10.0);
        doc.overall_assessment.summary = format!(
            "Classical image comparison: {} of 4 dimensions measured, overall score {:.1}/10",
            report.n_measured(),
            report.overall_score
        );
        doc
    }
}

fn entry(metric: &MetricScore, label: &str) -> MetricEntry {
    MetricEntry {
        before_score: Some(metric.before_value),
        after_score: Some(metric.after_value),
        improvement_pct: Some(metric.change_pct),
        description: describe(label, metric.change_pct),
    }
}

fn describe(label: &str, change_pct: f64) -> String {
    if change_pct > 0.0 {
        format!("{} improved by {:.1}%", label, change_pct)
    } else if change_pct < 0.0 {
        format!("{} worsened by {:.1}%", label, -change_pct)
    } else {
        format!("{} unchanged", label)
    }
}

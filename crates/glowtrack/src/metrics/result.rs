use serde::{Deserialize, Serialize};

use super::{MetricError, MetricScore, PoreReport, SkinToneReport, TextureReport, WrinkleReport};

/// Common view over a per-dimension report.
pub trait Dimension {
    /// Stable dimension name used in logs and documents.
    const NAME: &'static str;

    /// The headline before/after metric of this dimension.
    fn metric(&self) -> &MetricScore;

    fn score(&self) -> f64 {
        self.metric().score
    }
}

/// Outcome of one extractor: a measured report, or an error tag.
///
/// A failed dimension is absent for aggregation, never a zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionResult<T> {
    Measured(T),
    Failed { error: String },
}

impl<T: Dimension> DimensionResult<T> {
    /// Convert an extractor result, logging the failure path.
    pub(crate) fn capture(result: Result<T, MetricError>) -> Self {
        match result {
            Ok(report) => {
                tracing::debug!(
                    dimension = T::NAME,
                    score = report.score(),
                    "dimension measured"
                );
                Self::Measured(report)
            }
            Err(err) => {
                tracing::warn!(dimension = T::NAME, error = %err, "dimension analysis failed");
                Self::Failed {
                    error: err.to_string(),
                }
            }
        }
    }

    pub fn measured(&self) -> Option<&T> {
        match self {
            Self::Measured(report) => Some(report),
            Self::Failed { .. } => None,
        }
    }

    pub fn score(&self) -> Option<f64> {
        self.measured().map(Dimension::score)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Measured(_) => None,
            Self::Failed { error } => Some(error),
        }
    }
}

/// Full classical comparison of one before/after pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    /// Before image dimensions `[width, height]`.
    pub image_size: [u32; 2],
    pub wrinkles: DimensionResult<WrinkleReport>,
    pub skin_tone: DimensionResult<SkinToneReport>,
    pub texture: DimensionResult<TextureReport>,
    pub pores: DimensionResult<PoreReport>,
    /// Mean of the present dimension scores, one decimal, `0.0` when none.
    pub overall_score: f64,
}

impl ComparisonReport {
    /// Scores of the four dimensions in fixed order; `None` for failures.
    pub fn scores(&self) -> [Option<f64>; 4] {
        [
            self.wrinkles.score(),
            self.skin_tone.score(),
            self.texture.score(),
            self.pores.score(),
        ]
    }

    /// Number of dimensions that produced a measurement.
    pub fn n_measured(&self) -> usize {
        self.scores().iter().filter(|s| s.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_dimension_serializes_as_error_tag() {
        let failed: DimensionResult<TextureReport> =
            DimensionResult::capture(Err(MetricError::EmptyImage));
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "empty image" }));
        assert_eq!(failed.score(), None);
        assert_eq!(failed.error(), Some("empty image"));
    }

    #[test]
    fn measured_dimension_round_trips_through_json() {
        let report = TextureReport {
            smoothness: MetricScore::from_gain(0.5, 0.6),
            variance_before: 1000.0,
            variance_after: 666.0,
        };
        let measured = DimensionResult::Measured(report.clone());
        let json = serde_json::to_string(&measured).unwrap();
        let back: DimensionResult<TextureReport> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.measured(), Some(&report));
    }
}

use image::RgbImage;
use serde::{Deserialize, Serialize};

use super::result::Dimension;
use super::score::ensure_finite;
use super::{DimensionResult, MetricError, MetricScore, MetricsConfig};
use crate::imaging::{self, PlaneStats};

/// Texture smoothness from Laplacian variance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureReport {
    /// `1 / (1 + var / scale)` before and after.
    pub smoothness: MetricScore,
    pub variance_before: f64,
    pub variance_after: f64,
}

impl Dimension for TextureReport {
    const NAME: &'static str = "texture";

    fn metric(&self) -> &MetricScore {
        &self.smoothness
    }
}

pub fn analyze_texture(
    before: &RgbImage,
    after: &RgbImage,
    config: &MetricsConfig,
) -> DimensionResult<TextureReport> {
    DimensionResult::capture(measure(before, after, config))
}

fn measure(
    before: &RgbImage,
    after: &RgbImage,
    config: &MetricsConfig,
) -> Result<TextureReport, MetricError> {
    config.check()?;
    imaging::validate_pair(before, after)?;

    let variance_of = |img: &RgbImage| {
        let lap = imaging::laplacian(&imaging::to_gray(img));
        ensure_finite("laplacian_variance", PlaneStats::of_signed(&lap).variance)
    };
    let variance_before = variance_of(before)?;
    let variance_after = variance_of(after)?;

    let smoothness_of = |var: f64| 1.0 / (1.0 + var / config.smoothness_variance_scale);

    Ok(TextureReport {
        smoothness: MetricScore::from_gain(
            smoothness_of(variance_before),
            smoothness_of(variance_after),
        ),
        variance_before,
        variance_after,
    })
}

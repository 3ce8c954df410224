use image::RgbImage;
use serde::{Deserialize, Serialize};

use super::result::Dimension;
use super::{DimensionResult, MetricError, MetricScore, MetricsConfig};
use crate::imaging::{self, count_above};

/// Pore area from a thresholded black-hat response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoreReport {
    /// Before/after pore area in pixels.
    pub area: MetricScore,
    /// `area / scale`, a coarse human-facing visibility figure.
    pub visibility_before: f64,
    pub visibility_after: f64,
}

impl Dimension for PoreReport {
    const NAME: &'static str = "pores";

    fn metric(&self) -> &MetricScore {
        &self.area
    }
}

pub fn analyze_pores(
    before: &RgbImage,
    after: &RgbImage,
    config: &MetricsConfig,
) -> DimensionResult<PoreReport> {
    DimensionResult::capture(measure(before, after, config))
}

fn measure(
    before: &RgbImage,
    after: &RgbImage,
    config: &MetricsConfig,
) -> Result<PoreReport, MetricError> {
    config.check()?;
    imaging::validate_pair(before, after)?;

    let area_of = |img: &RgbImage| {
        let hat = imaging::black_hat(&imaging::to_gray(img), config.black_hat_radius);
        count_above(&hat, config.pore_threshold) as f64
    };
    let area = MetricScore::from_reduction(area_of(before), area_of(after));

    Ok(PoreReport {
        visibility_before: area.before_value / config.pore_visibility_scale,
        visibility_after: area.after_value / config.pore_visibility_scale,
        area,
    })
}

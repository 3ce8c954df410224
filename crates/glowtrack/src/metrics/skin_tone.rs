use image::RgbImage;
use serde::{Deserialize, Serialize};

use super::result::Dimension;
use super::score::ensure_finite;
use super::{DimensionResult, MetricError, MetricScore, MetricsConfig};
use crate::imaging::{self, PlaneStats};

/// Tone evenness and redness in L\*a\*b\*.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinToneReport {
    /// `1 / (1 + std(L) / scale)` before and after.
    pub evenness: MetricScore,
    pub lightness_std_before: f64,
    pub lightness_std_after: f64,
    /// Mean lightness (8-bit L plane).
    pub brightness_before: f64,
    pub brightness_after: f64,
    /// Mean of the 8-bit `a` plane; 128 is neutral.
    pub redness_before: f64,
    pub redness_after: f64,
    /// Share of the initial red bias removed, floored at 0.
    pub redness_reduction_pct: f64,
    /// Signed variant of `redness_reduction_pct`.
    pub redness_change_pct: f64,
}

impl Dimension for SkinToneReport {
    const NAME: &'static str = "skin_tone";

    fn metric(&self) -> &MetricScore {
        &self.evenness
    }
}

pub fn analyze_skin_tone(
    before: &RgbImage,
    after: &RgbImage,
    config: &MetricsConfig,
) -> DimensionResult<SkinToneReport> {
    DimensionResult::capture(measure(before, after, config))
}

fn measure(
    before: &RgbImage,
    after: &RgbImage,
    config: &MetricsConfig,
) -> Result<SkinToneReport, MetricError> {
    config.check()?;
    imaging::validate_pair(before, after)?;

    let lab_before = imaging::to_lab(before);
    let lab_after = imaging::to_lab(after);

    let l_before = PlaneStats::of_gray(&lab_before.l);
    let l_after = PlaneStats::of_gray(&lab_after.l);
    let std_before = ensure_finite("lightness_std", l_before.std_dev())?;
    let std_after = ensure_finite("lightness_std", l_after.std_dev())?;

    let evenness_of = |std: f64| 1.0 / (1.0 + std / config.evenness_std_scale);
    let evenness = MetricScore::from_gain(evenness_of(std_before), evenness_of(std_after));

    let redness_before = ensure_finite("redness", PlaneStats::of_gray(&lab_before.a).mean)?;
    let redness_after = ensure_finite("redness", PlaneStats::of_gray(&lab_after.a).mean)?;
    let redness_change_pct = redness_change(redness_before, redness_after, config.neutral_chroma);

    Ok(SkinToneReport {
        evenness,
        lightness_std_before: std_before,
        lightness_std_after: std_after,
        brightness_before: l_before.mean,
        brightness_after: l_after.mean,
        redness_before,
        redness_after,
        redness_reduction_pct: redness_change_pct.max(0.0),
        redness_change_pct,
    })
}

/// Fraction of the red bias above `neutral` that was removed, in percent.
fn redness_change(before: f64, after: f64, neutral: f64) -> f64 {
    if before > neutral {
        (before - after) / (before - neutral) * 100.0
    } else {
        0.0
    }
}

//! Wrinkle density from Canny edge counts, overall and per face band.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use super::result::Dimension;
use super::{DimensionResult, MetricError, MetricScore, MetricsConfig};
use crate::imaging::{self, count_above, count_above_in_rows, RowBand};

/// Horizontal region of an aligned face crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceBand {
    Forehead,
    Eyes,
    Mouth,
}

impl FaceBand {
    pub const ALL: [FaceBand; 3] = [FaceBand::Forehead, FaceBand::Eyes, FaceBand::Mouth];
}

/// Edge counts inside one face band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandReport {
    pub band: FaceBand,
    /// Half-open row range `[start, end)` the band covered.
    pub rows: [u32; 2],
    /// Before/after edge-pixel counts and the band's own reduction.
    pub edges: MetricScore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WrinkleReport {
    /// Whole-image edge-pixel counts.
    pub edges: MetricScore,
    pub bands: Vec<BandReport>,
}

impl Dimension for WrinkleReport {
    const NAME: &'static str = "wrinkles";

    fn metric(&self) -> &MetricScore {
        &self.edges
    }
}

/// Compare wrinkle density between two aligned images.
///
/// Edge pixels from a Canny detector stand in for fine lines; fewer edges
/// after treatment reads as a reduction. The three face bands overlap and
/// are scored independently of the whole-image figure.
pub fn analyze_wrinkles(
    before: &RgbImage,
    after: &RgbImage,
    config: &MetricsConfig,
) -> DimensionResult<WrinkleReport> {
    DimensionResult::capture(measure(before, after, config))
}

fn measure(
    before: &RgbImage,
    after: &RgbImage,
    config: &MetricsConfig,
) -> Result<WrinkleReport, MetricError> {
    config.check()?;
    imaging::validate_pair(before, after)?;

    let edges_of = |img: &RgbImage| {
        imaging::edge_map(&imaging::to_gray(img), config.canny_low, config.canny_high)
    };
    let edges_before = edges_of(before);
    let edges_after = edges_of(after);

    let edges = MetricScore::from_reduction(
        count_above(&edges_before, 0) as f64,
        count_above(&edges_after, 0) as f64,
    );

    let height = before.height();
    let bands = FaceBand::ALL
        .iter()
        .map(|&band| {
            let fractions = match band {
                FaceBand::Forehead => config.wrinkle_bands.forehead,
                FaceBand::Eyes => config.wrinkle_bands.eyes,
                FaceBand::Mouth => config.wrinkle_bands.mouth,
            };
            let rows = RowBand::from_fractions(height, fractions);
            BandReport {
                band,
                rows: rows.rows(),
                edges: MetricScore::from_reduction(
                    count_above_in_rows(&edges_before, rows, 0) as f64,
                    count_above_in_rows(&edges_after, rows, 0) as f64,
                ),
            }
        })
        .collect();

    Ok(WrinkleReport { edges, bands })
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::test_utils::{flat_rgb, striped_rgb};

    #[test]
    fn stripes_to_flat_is_full_reduction() {
        let before = striped_rgb(64, 64, 8, 0, 255);
        let after = flat_rgb(64, 64, [128, 128, 128]);
        let report = analyze_wrinkles(&before, &after, &MetricsConfig::default());
        let report = report.measured().expect("measured");

        assert!(report.edges.before_value > 0.0);
        assert_eq!(report.edges.after_value, 0.0);
        assert_abs_diff_eq!(report.edges.improvement_pct, 100.0, epsilon = 1e-12);
        assert_abs_diff_eq!(report.score(), 10.0, epsilon = 1e-12);

        assert_eq!(report.bands.len(), 3);
        for band in &report.bands {
            assert!(band.edges.before_value > 0.0, "{:?}", band.band);
            assert_abs_diff_eq!(band.edges.improvement_pct, 100.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn bands_overlap_and_follow_image_height() {
        let img = flat_rgb(20, 100, [90, 90, 90]);
        let report = analyze_wrinkles(&img, &img, &MetricsConfig::default());
        let rows: Vec<[u32; 2]> = report
            .measured()
            .expect("measured")
            .bands
            .iter()
            .map(|b| b.rows)
            .collect();
        assert_eq!(rows, vec![[10, 40], [30, 60], [50, 80]]);
    }

    #[test]
    fn no_edges_before_means_zero_reduction() {
        let before = flat_rgb(32, 32, [100, 100, 100]);
        let after = striped_rgb(32, 32, 8, 0, 255);
        let report = analyze_wrinkles(&before, &after, &MetricsConfig::default());
        let report = report.measured().expect("measured");
        assert_eq!(report.edges.before_value, 0.0);
        assert_eq!(report.edges.change_pct, 0.0);
        assert_eq!(report.edges.improvement_pct, 0.0);
        assert_eq!(report.score(), 0.0);
    }

    #[test]
    fn more_lines_after_keeps_signed_regression() {
        let before = striped_rgb(64, 64, 32, 0, 255);
        let after = striped_rgb(64, 64, 8, 0, 255);
        let report = analyze_wrinkles(&before, &after, &MetricsConfig::default());
        let edges = report.measured().expect("measured").edges;
        assert!(edges.after_value > edges.before_value);
        assert!(edges.change_pct < 0.0);
        assert_eq!(edges.improvement_pct, 0.0);
        assert_eq!(edges.score, 0.0);
    }

    #[test]
    fn mismatched_pair_is_error_tagged() {
        let before = flat_rgb(32, 32, [0, 0, 0]);
        let after = flat_rgb(16, 32, [0, 0, 0]);
        let report = analyze_wrinkles(&before, &after, &MetricsConfig::default());
        assert!(report.measured().is_none());
        assert!(report.error().is_some_and(|e| e.contains("mismatch")));
    }
}

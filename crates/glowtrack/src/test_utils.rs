//! Shared test utilities: synthetic photographs and analysis documents.
//!
//! The synthetic images stand in for aligned face crops. They are small and
//! deterministic so extractor tests can reason about exact edge, spot and
//! variance behaviour.

use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::analysis::{AnalysisDocument, Category, MetricEntry};

/// Uniform image.
pub(crate) fn flat_rgb(w: u32, h: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(w, h, Rgb(rgb))
}

/// Horizontal gray stripes of `period` rows (half dark, half light).
pub(crate) fn striped_rgb(w: u32, h: u32, period: u32, dark: u8, light: u8) -> RgbImage {
    let half = (period / 2).max(1);
    RgbImage::from_fn(w, h, |_, y| {
        let v = if (y / half) % 2 == 0 { dark } else { light };
        Rgb([v, v, v])
    })
}

/// Light background with single dark pixels on a `spacing` grid.
///
/// The first spot sits at `spacing / 2` so no spot touches the border.
pub(crate) fn speckled_rgb(w: u32, h: u32, background: u8, spot: u8, spacing: u32) -> RgbImage {
    let offset = spacing / 2;
    RgbImage::from_fn(w, h, |x, y| {
        let on_grid = x >= offset
            && y >= offset
            && (x - offset) % spacing == 0
            && (y - offset) % spacing == 0
            && x + offset < w
            && y + offset < h;
        let v = if on_grid { spot } else { background };
        Rgb([v, v, v])
    })
}

/// Gray image with uniform noise of `amplitude` around `base` (seeded).
pub(crate) fn noisy_rgb(w: u32, h: u32, base: u8, amplitude: u8, seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let amp = i16::from(amplitude);
    RgbImage::from_fn(w, h, |_, _| {
        let v = (i16::from(base) + rng.gen_range(-amp..=amp)).clamp(0, 255) as u8;
        Rgb([v, v, v])
    })
}

pub(crate) fn entry(before: f64, after: f64, improvement: f64, description: &str) -> MetricEntry {
    MetricEntry {
        before_score: Some(before),
        after_score: Some(after),
        improvement_pct: Some(improvement),
        description: description.to_string(),
    }
}

/// Successful document with the given overall numbers and no metrics.
pub(crate) fn document(overall_improvement: f64, naturalness: Option<f64>) -> AnalysisDocument {
    let mut doc = AnalysisDocument {
        success: true,
        ..AnalysisDocument::default()
    };
    doc.overall_assessment.overall_improvement = Some(overall_improvement);
    doc.overall_assessment.naturalness = naturalness;
    doc.overall_assessment.summary = "synthetic".to_string();
    doc
}

/// [`document`] plus the given metrics.
pub(crate) fn document_with(
    overall_improvement: f64,
    naturalness: Option<f64>,
    metrics: &[(Category, &str, MetricEntry)],
) -> AnalysisDocument {
    let mut doc = document(overall_improvement, naturalness);
    for (category, name, metric) in metrics {
        doc.insert_metric(*category, name, metric.clone());
    }
    doc
}

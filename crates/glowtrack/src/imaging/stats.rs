//! Scalar reductions over image planes.

use image::{GrayImage, Luma, Pixel};
use imageproc::definitions::Image;

/// Half-open row range `[start, end)` of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RowBand {
    pub start: u32,
    pub end: u32,
}

impl RowBand {
    /// Band covering `[lo, hi)` as fractions of `height`, truncated to whole
    /// rows and clipped to the image.
    pub fn from_fractions(height: u32, fractions: [f64; 2]) -> Self {
        let to_row = |f: f64| ((f64::from(height) * f.clamp(0.0, 1.0)) as u32).min(height);
        let start = to_row(fractions[0]);
        let end = to_row(fractions[1]).max(start);
        Self { start, end }
    }

    pub fn rows(self) -> [u32; 2] {
        [self.start, self.end]
    }
}

/// Number of pixels strictly above `threshold`.
pub(crate) fn count_above(img: &GrayImage, threshold: u8) -> u64 {
    img.pixels().filter(|p| p[0] > threshold).count() as u64
}

/// [`count_above`] restricted to a row band.
pub(crate) fn count_above_in_rows(img: &GrayImage, band: RowBand, threshold: u8) -> u64 {
    img.rows()
        .skip(band.start as usize)
        .take(band.end.saturating_sub(band.start) as usize)
        .flatten()
        .filter(|p| p[0] > threshold)
        .count() as u64
}

/// Population mean and variance of a plane (single pass, Welford).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct PlaneStats {
    pub count: u64,
    pub mean: f64,
    pub variance: f64,
}

impl PlaneStats {
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut count = 0u64;
        let mut mean = 0.0;
        let mut m2 = 0.0;
        for v in values {
            count += 1;
            let delta = v - mean;
            mean += delta / count as f64;
            m2 += delta * (v - mean);
        }
        if count == 0 {
            return Self::default();
        }
        Self {
            count,
            mean,
            variance: m2 / count as f64,
        }
    }

    pub fn of_gray(img: &GrayImage) -> Self {
        Self::from_values(img.pixels().map(|p| f64::from(p[0])))
    }

    pub fn of_signed(img: &Image<Luma<i16>>) -> Self {
        Self::from_values(img.pixels().map(|p| f64::from(p.channels()[0])))
    }

    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

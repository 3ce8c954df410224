//! Image primitives shared by the metric extractors.
//!
//! Thin wrappers over `imageproc` plus the plane statistics the extractors
//! reduce images to. Nothing here knows about improvement percentages.

mod color;
mod composite;
mod stats;

pub use color::{to_lab, LabPlanes};
pub use composite::side_by_side;
pub(crate) use stats::{count_above, count_above_in_rows, PlaneStats, RowBand};

use image::{GrayImage, Luma, RgbImage};
use imageproc::definitions::Image;
use imageproc::morphology::Mask;

use crate::metrics::MetricError;

/// Check that a before/after pair can be compared pixel-for-pixel.
///
/// Alignment itself is the caller's job; this only rejects pairs that are
/// structurally unusable (empty, or different frame sizes).
pub(crate) fn validate_pair(before: &RgbImage, after: &RgbImage) -> Result<(), MetricError> {
    let (bw, bh) = before.dimensions();
    let (aw, ah) = after.dimensions();
    if bw == 0 || bh == 0 || aw == 0 || ah == 0 {
        return Err(MetricError::EmptyImage);
    }
    if (bw, bh) != (aw, ah) {
        return Err(MetricError::DimensionMismatch {
            before: [bw, bh],
            after: [aw, ah],
        });
    }
    Ok(())
}

pub(crate) fn to_gray(rgb: &RgbImage) -> GrayImage {
    image::imageops::grayscale(rgb)
}

/// Binary Canny edge map (255 = edge).
pub(crate) fn edge_map(gray: &GrayImage, low: f32, high: f32) -> GrayImage {
    imageproc::edges::canny(gray, low, high)
}

/// 3x3 Laplacian response (signed).
pub(crate) fn laplacian(gray: &GrayImage) -> Image<Luma<i16>> {
    imageproc::filter::laplacian_filter(gray)
}

/// Morphological black-hat: `close(gray) - gray`.
///
/// Highlights dark spots narrower than the structuring element. A radius-1
/// diamond is the 3x3 cross.
pub(crate) fn black_hat(gray: &GrayImage, radius: u8) -> GrayImage {
    let mask = Mask::diamond(radius);
    let closed = imageproc::morphology::grayscale_close(gray, &mask);
    let mut out = GrayImage::new(gray.width(), gray.height());
    for (dst, (c, g)) in out.pixels_mut().zip(closed.pixels().zip(gray.pixels())) {
        // closing is extensive, the subtraction never underflows on valid input
        dst[0] = c[0].saturating_sub(g[0]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{flat_rgb, speckled_rgb, striped_rgb};

    #[test]
    fn validate_pair_rejects_empty_and_mismatched() {
        let a = flat_rgb(8, 8, [10, 10, 10]);
        let empty = RgbImage::new(0, 8);
        let wide = flat_rgb(9, 8, [10, 10, 10]);

        assert_eq!(validate_pair(&a, &a), Ok(()));
        assert_eq!(validate_pair(&empty, &a), Err(MetricError::EmptyImage));
        assert_eq!(
            validate_pair(&a, &wide),
            Err(MetricError::DimensionMismatch {
                before: [8, 8],
                after: [9, 8],
            })
        );
    }

    #[test]
    fn edge_map_is_empty_on_flat_image() {
        let gray = to_gray(&flat_rgb(32, 32, [120, 120, 120]));
        let edges = edge_map(&gray, 50.0, 150.0);
        assert_eq!(count_above(&edges, 0), 0);
    }

    #[test]
    fn edge_map_finds_stripe_boundaries() {
        let gray = to_gray(&striped_rgb(48, 48, 8, 0, 255));
        let edges = edge_map(&gray, 50.0, 150.0);
        assert!(count_above(&edges, 0) > 0);
    }

    #[test]
    fn laplacian_of_flat_image_is_zero() {
        let gray = to_gray(&flat_rgb(16, 16, [77, 77, 77]));
        let lap = laplacian(&gray);
        assert!(lap.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn black_hat_marks_isolated_dark_spots() {
        let rgb = speckled_rgb(40, 40, 200, 50, 8);
        let gray = to_gray(&rgb);
        let spots = gray.pixels().filter(|p| p[0] < 100).count() as u64;
        let hat = black_hat(&gray, 1);
        assert!(spots > 0);
        assert_eq!(count_above(&hat, 10), spots);
    }
}

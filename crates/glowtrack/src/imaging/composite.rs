//! Side-by-side comparison canvas.

use image::RgbImage;

use super::validate_pair;
use crate::metrics::MetricError;

/// Place `before` on the left and `after` on the right of one canvas.
///
/// Both images must share dimensions; the canvas is `2w x h`.
pub fn side_by_side(before: &RgbImage, after: &RgbImage) -> Result<RgbImage, MetricError> {
    validate_pair(before, after)?;
    let (w, h) = before.dimensions();
    let mut canvas = RgbImage::new(w * 2, h);
    image::imageops::replace(&mut canvas, before, 0, 0);
    image::imageops::replace(&mut canvas, after, i64::from(w), 0);
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::flat_rgb;

    #[test]
    fn halves_carry_their_source_pixels() {
        let before = flat_rgb(5, 3, [10, 20, 30]);
        let after = flat_rgb(5, 3, [200, 100, 50]);
        let canvas = side_by_side(&before, &after).unwrap();
        assert_eq!(canvas.dimensions(), (10, 3));
        assert_eq!(canvas.get_pixel(0, 0).0, [10, 20, 30]);
        assert_eq!(canvas.get_pixel(4, 2).0, [10, 20, 30]);
        assert_eq!(canvas.get_pixel(5, 0).0, [200, 100, 50]);
        assert_eq!(canvas.get_pixel(9, 2).0, [200, 100, 50]);
    }

    #[test]
    fn mismatched_pair_is_rejected() {
        let before = flat_rgb(5, 3, [0, 0, 0]);
        let after = flat_rgb(5, 4, [0, 0, 0]);
        assert!(side_by_side(&before, &after).is_err());
    }
}

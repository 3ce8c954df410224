//! sRGB to 8-bit CIE L\*a\*b\* conversion.
//!
//! Uses the D65 white point and the usual 8-bit packing:
//! `L = L*·255/100`, `a = a* + 128`, `b = b* + 128`, rounded and saturated.
//! A neutral gray therefore maps to `a = b = 128`.

use image::{GrayImage, Luma, RgbImage};

const D65_XN: f64 = 0.950456;
const D65_ZN: f64 = 1.088754;
const LAB_EPSILON: f64 = 0.008856;
const LAB_KAPPA: f64 = 903.3;
const CHROMA_OFFSET: f64 = 128.0;

/// The three planes of an 8-bit L\*a\*b\* image.
#[derive(Debug, Clone)]
pub struct LabPlanes {
    /// Lightness, `L*·255/100`.
    pub l: GrayImage,
    /// Green–red axis, `a* + 128`.
    pub a: GrayImage,
    /// Blue–yellow axis, `b* + 128`.
    pub b: GrayImage,
}

/// Convert an sRGB image to 8-bit L\*a\*b\* planes.
pub fn to_lab(rgb: &RgbImage) -> LabPlanes {
    let (w, h) = rgb.dimensions();
    let linear = srgb_linear_table();
    let mut l = GrayImage::new(w, h);
    let mut a = GrayImage::new(w, h);
    let mut b = GrayImage::new(w, h);

    for (x, y, px) in rgb.enumerate_pixels() {
        let [lv, av, bv] = lab_from_linear(
            linear[px[0] as usize],
            linear[px[1] as usize],
            linear[px[2] as usize],
        );
        l.put_pixel(x, y, Luma([saturate_u8(lv * 255.0 / 100.0)]));
        a.put_pixel(x, y, Luma([saturate_u8(av + CHROMA_OFFSET)]));
        b.put_pixel(x, y, Luma([saturate_u8(bv + CHROMA_OFFSET)]));
    }

    LabPlanes { l, a, b }
}

fn srgb_linear_table() -> [f64; 256] {
    let mut table = [0.0; 256];
    for (i, v) in table.iter_mut().enumerate() {
        let c = i as f64 / 255.0;
        *v = if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        };
    }
    table
}

fn lab_from_linear(r: f64, g: f64, b: f64) -> [f64; 3] {
    let x = (0.412453 * r + 0.357580 * g + 0.180423 * b) / D65_XN;
    let y = 0.212671 * r + 0.715160 * g + 0.072169 * b;
    let z = (0.019334 * r + 0.119193 * g + 0.950227 * b) / D65_ZN;

    let fx = lab_f(x);
    let fy = lab_f(y);
    let fz = lab_f(z);

    let l = if y > LAB_EPSILON {
        116.0 * y.cbrt() - 16.0
    } else {
        LAB_KAPPA * y
    };
    [l, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

fn saturate_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::flat_rgb;

    fn lab_of(rgb: [u8; 3]) -> [u8; 3] {
        let planes = to_lab(&flat_rgb(1, 1, rgb));
        [
            planes.l.get_pixel(0, 0)[0],
            planes.a.get_pixel(0, 0)[0],
            planes.b.get_pixel(0, 0)[0],
        ]
    }

    #[test]
    fn white_and_black_hit_lightness_extremes() {
        assert_eq!(lab_of([255, 255, 255]), [255, 128, 128]);
        assert_eq!(lab_of([0, 0, 0]), [0, 128, 128]);
    }

    #[test]
    fn grays_are_chroma_neutral() {
        for v in [17u8, 64, 128, 200] {
            let [_, a, b] = lab_of([v, v, v]);
            assert_eq!(a, 128, "gray {v}");
            assert_eq!(b, 128, "gray {v}");
        }
    }

    #[test]
    fn red_pushes_a_channel_up_and_blue_pushes_b_down() {
        let [_, a_red, _] = lab_of([220, 60, 60]);
        let [_, _, b_blue] = lab_of([40, 40, 220]);
        assert!(a_red > 128);
        assert!(b_blue < 128);
    }

    #[test]
    fn lightness_is_monotonic_in_gray_level() {
        let mut prev = 0u8;
        for v in (0..=255u8).step_by(15) {
            let [l, _, _] = lab_of([v, v, v]);
            assert!(l >= prev);
            prev = l;
        }
    }
}

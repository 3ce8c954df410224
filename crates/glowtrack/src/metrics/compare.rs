use image::RgbImage;

use super::{
    analyze_pores, analyze_skin_tone, analyze_texture, analyze_wrinkles, overall_score,
    ComparisonReport, MetricsConfig,
};

/// Run all four extractors on an aligned pair and aggregate their scores.
///
/// The extractors are independent; with `config.parallel` they run as a
/// `rayon::join` fan-out. A failing extractor is recorded as an error tag
/// and left out of the overall score.
pub fn compare_images(
    before: &RgbImage,
    after: &RgbImage,
    config: &MetricsConfig,
) -> ComparisonReport {
    let parallel = config.parallel;
    let ((wrinkles, skin_tone), (texture, pores)) = join(
        parallel,
        || {
            join(
                parallel,
                || analyze_wrinkles(before, after, config),
                || analyze_skin_tone(before, after, config),
            )
        },
        || {
            join(
                parallel,
                || analyze_texture(before, after, config),
                || analyze_pores(before, after, config),
            )
        },
    );

    let mut report = ComparisonReport {
        image_size: [before.width(), before.height()],
        wrinkles,
        skin_tone,
        texture,
        pores,
        overall_score: 0.0,
    };
    report.overall_score = overall_score(report.scores().into_iter().flatten());

    tracing::info!(
        width = before.width(),
        height = before.height(),
        measured = report.n_measured(),
        overall_score = report.overall_score,
        "image comparison complete"
    );
    report
}

fn join<A, B, RA, RB>(parallel: bool, a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    if parallel {
        rayon::join(a, b)
    } else {
        (a(), b())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::test_utils::{flat_rgb, noisy_rgb, striped_rgb};

    #[test]
    fn overall_is_mean_of_dimension_scores() {
        let before = noisy_rgb(64, 64, 128, 30, 5);
        let after = flat_rgb(64, 64, [128, 128, 128]);
        let report = compare_images(&before, &after, &MetricsConfig::default());

        assert_eq!(report.n_measured(), 4);
        let scores: Vec<f64> = report.scores().into_iter().flatten().collect();
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        assert_abs_diff_eq!(
            report.overall_score,
            (mean * 10.0).round_ties_even() / 10.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn sequential_and_parallel_agree() {
        let before = striped_rgb(48, 48, 8, 30, 220);
        let after = noisy_rgb(48, 48, 128, 10, 9);
        let parallel = compare_images(&before, &after, &MetricsConfig::default());
        let sequential = compare_images(
            &before,
            &after,
            &MetricsConfig {
                parallel: false,
                ..MetricsConfig::default()
            },
        );
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn mismatched_sizes_fail_every_dimension() {
        let before = flat_rgb(32, 32, [10, 10, 10]);
        let after = flat_rgb(32, 16, [10, 10, 10]);
        let report = compare_images(&before, &after, &MetricsConfig::default());
        assert_eq!(report.n_measured(), 0);
        assert_eq!(report.overall_score, 0.0);
        assert!(report.wrinkles.error().is_some());
        assert!(report.pores.error().is_some());
    }

    #[test]
    fn inverted_canny_thresholds_are_error_tags() {
        let img = striped_rgb(32, 32, 8, 30, 220);
        let config = MetricsConfig {
            canny_low: 200.0,
            canny_high: 100.0,
            ..MetricsConfig::default()
        };
        for parallel in [true, false] {
            let config = MetricsConfig {
                parallel,
                ..config.clone()
            };
            let report = compare_images(&img, &img, &config);
            assert!(report.wrinkles.error().is_some_and(|e| e.contains("canny")));
            assert_eq!(report.n_measured(), 0);
            assert_eq!(report.overall_score, 0.0);
        }
    }
}

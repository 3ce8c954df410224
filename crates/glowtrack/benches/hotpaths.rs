use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use glowtrack::{
    analyze_pores, analyze_skin_tone, analyze_texture, analyze_wrinkles, compare_images,
    AnalysisDocument, GovernanceConfig, MetricsConfig, ReportGovernor, TreatmentContext,
};

/// Skin-toned image with horizontal dark lines and scattered dark pores.
///
/// `line_depth` and `pore_frac` control how "aged" the fixture looks.
fn make_face_fixture(
    width: u32,
    height: u32,
    line_depth: u8,
    pore_frac: f32,
    seed: u64,
) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = [204u8, 160, 140];
    let mut img = RgbImage::from_fn(width, height, |_, _| {
        let n = rng.gen_range(-6i16..=6);
        Rgb(base.map(|c| (i16::from(c) + n).clamp(0, 255) as u8))
    });

    let n_lines = 24;
    for i in 0..n_lines {
        let y = height / 10 + i * (height * 7 / 10) / n_lines;
        let x0 = rng.gen_range(0..width / 4);
        let x1 = rng.gen_range(width * 3 / 4..width);
        for x in x0..x1 {
            let px = img.get_pixel_mut(x, y);
            *px = Rgb(px.0.map(|c| c.saturating_sub(line_depth)));
        }
    }

    let n_pores = (width as f32 * height as f32 * pore_frac) as usize;
    for _ in 0..n_pores {
        let x = rng.gen_range(1..width - 1);
        let y = rng.gen_range(1..height - 1);
        let px = img.get_pixel_mut(x, y);
        *px = Rgb(px.0.map(|c| c.saturating_sub(60)));
    }

    img
}

fn bench_extractors(c: &mut Criterion) {
    let cfg = MetricsConfig::default();
    let before = make_face_fixture(512, 512, 70, 0.004, 7);
    let after = make_face_fixture(512, 512, 25, 0.002, 7);

    c.bench_function("wrinkles_512", |b| {
        b.iter(|| black_box(analyze_wrinkles(black_box(&before), black_box(&after), &cfg)))
    });
    c.bench_function("skin_tone_512", |b| {
        b.iter(|| black_box(analyze_skin_tone(black_box(&before), black_box(&after), &cfg)))
    });
    c.bench_function("texture_512", |b| {
        b.iter(|| black_box(analyze_texture(black_box(&before), black_box(&after), &cfg)))
    });
    c.bench_function("pores_512", |b| {
        b.iter(|| black_box(analyze_pores(black_box(&before), black_box(&after), &cfg)))
    });
}

fn bench_compare(c: &mut Criterion) {
    let before = make_face_fixture(1024, 1024, 70, 0.004, 11);
    let after = make_face_fixture(1024, 1024, 25, 0.002, 11);
    let parallel = MetricsConfig::default();
    let sequential = MetricsConfig {
        parallel: false,
        ..MetricsConfig::default()
    };

    c.bench_function("compare_1024_parallel", |b| {
        b.iter(|| {
            let report = compare_images(black_box(&before), black_box(&after), &parallel);
            black_box(report.overall_score)
        })
    });
    c.bench_function("compare_1024_sequential", |b| {
        b.iter(|| {
            let report = compare_images(black_box(&before), black_box(&after), &sequential);
            black_box(report.overall_score)
        })
    });
}

fn bench_governance(c: &mut Criterion) {
    let before = make_face_fixture(256, 256, 70, 0.004, 3);
    let after = make_face_fixture(256, 256, 25, 0.002, 3);
    let report = compare_images(&before, &after, &MetricsConfig::default());
    let doc = AnalysisDocument::from_comparison(&report);
    let treated = NaiveDate::from_ymd_opt(2024, 1, 8).unwrap_or_default();
    let photo = NaiveDate::from_ymd_opt(2024, 2, 19).unwrap_or_default();
    let context = TreatmentContext::new(treated, photo, "bench");
    let governor = ReportGovernor::new(GovernanceConfig::default());

    c.bench_function("evaluate_classical_document", |b| {
        b.iter(|| black_box(governor.evaluate(black_box(&doc), &context)))
    });
}

criterion_group!(hotpaths, bench_extractors, bench_compare, bench_governance);
criterion_main!(hotpaths);

//! Benchmarks for the skinscore analysis pipeline
//!
//! Run with: cargo bench -p skinscore-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{Rgb, RgbImage};
use skinscore_core::extract::extract_all;
use skinscore_core::{prepare_region, AnalysisOptions, SkinAnalyzer};

/// Generate a synthetic skin-toned image with mild texture and a few streaks
fn generate_test_face(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let grain = ((x * 7 + y * 13) % 11) as i32 - 5;
        let streak = if (x + 2 * y) % 97 < 2 { -40 } else { 0 };
        let v = |base: i32| (base + grain + streak).clamp(0, 255) as u8;
        Rgb([v(205), v(165), v(145)])
    })
}

fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare");
    let options = AnalysisOptions::default();

    for (w, h) in [(640, 480), (1920, 1080), (4032, 3024)] {
        let image = generate_test_face(w, h);
        group.throughput(Throughput::Elements((w * h) as u64));
        group.bench_with_input(
            BenchmarkId::new("prepare_region", format!("{}x{}", w, h)),
            &image,
            |b, image| b.iter(|| prepare_region(black_box(image), &options)),
        );
    }

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let options = AnalysisOptions::default();
    let region = prepare_region(&generate_test_face(1920, 1080), &options);

    c.bench_function("extract_all", |b| {
        b.iter(|| extract_all(black_box(&region), &options))
    });
}

fn bench_analyze(c: &mut Criterion) {
    let analyzer = SkinAnalyzer::default();
    let image = generate_test_face(1920, 1080);

    c.bench_function("analyze_1920x1080", |b| {
        b.iter(|| analyzer.analyze(black_box(&image)))
    });
}

criterion_group!(benches, bench_prepare, bench_extract, bench_analyze);
criterion_main!(benches);

//! Benchmarks for segmentation throughput

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use speakseg_core::{Budgets, LengthEnforcer, Segmenter, SegmenterConfig};
use std::hint::black_box;
use std::path::PathBuf;

/// Generate test text of roughly `size_kb` kilobytes
fn generate_test_text(base_text: &str, size_kb: usize) -> String {
    let repetitions = (size_kb * 1024) / base_text.len();
    base_text.repeat(repetitions.max(1))
}

fn segmenter() -> Segmenter {
    let config = SegmenterConfig::builder()
        .rules_dir(None::<PathBuf>)
        .build()
        .expect("default budgets are valid");
    Segmenter::new(config).expect("default budgets are valid")
}

fn benchmark_segment_english(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment_english");
    let base = "This is a test sentence. It contains several words, a comma and ends with a period. Dr. Smith agreed! ";
    let segmenter = segmenter();

    for size_kb in [1, 16, 256] {
        let text = generate_test_text(base, size_kb);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("{size_kb}KB"), |b| {
            b.iter(|| segmenter.segment(black_box(&text), "en"));
        });
    }

    group.finish();
}

fn benchmark_segment_japanese(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment_japanese");
    let base = "今日は良い天気です。散歩に行きましょう！本当ですか？";
    let segmenter = segmenter();

    for size_kb in [1, 16, 256] {
        let text = generate_test_text(base, size_kb);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(format!("{size_kb}KB"), |b| {
            b.iter(|| segmenter.segment(black_box(&text), "ja"));
        });
    }

    group.finish();
}

fn benchmark_enforce_unpunctuated(c: &mut Criterion) {
    let mut group = c.benchmark_group("enforce_unpunctuated");
    let enforcer = LengthEnforcer::new(Budgets::default());

    let roman = generate_test_text("word ", 64);
    group.throughput(Throughput::Bytes(roman.len() as u64));
    group.bench_function("roman_64KB", |b| {
        b.iter(|| enforcer.enforce([black_box(roman.as_str())]));
    });

    let cjk = generate_test_text("漢字仮名交じり文", 64);
    group.throughput(Throughput::Bytes(cjk.len() as u64));
    group.bench_function("cjk_64KB", |b| {
        b.iter(|| enforcer.enforce([black_box(cjk.as_str())]));
    });

    group.finish();
}

fn benchmark_language_switching(c: &mut Criterion) {
    let segmenter = segmenter();
    let text = "A short sentence. Another one follows.";

    c.bench_function("language_switching", |b| {
        b.iter(|| {
            segmenter.segment(black_box(text), "en");
            segmenter.segment(black_box(text), "de");
        });
    });
}

criterion_group!(
    benches,
    benchmark_segment_english,
    benchmark_segment_japanese,
    benchmark_enforce_unpunctuated,
    benchmark_language_switching
);
criterion_main!(benches);

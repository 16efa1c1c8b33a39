//! Throughput benchmarks for tokenization and segmentation
//!
//! Run with: cargo bench --bench tokenize

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use tokseg_core::{tokenize, Segmenter, SplitterConfig, TokenizerOptions};

/// Generate English-like text of roughly `size` bytes
fn generate_text(size: usize) -> String {
    let base = "Mr. Smith paid $3 1/2 for the (rather old) book. \"Really?\" she asked... \
                It wasn't cheap -- the U.S. edition costs more.\n\n";
    let mut text = base.repeat(size / base.len() + 1);
    text.truncate(size);
    text
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    let options = TokenizerOptions::default();

    for size in [1024, 10_240, 102_400] {
        let text = generate_text(size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("default", size), &text, |b, text| {
            b.iter(|| tokenize(black_box(text), &options).unwrap());
        });
    }

    group.finish();
}

fn bench_option_sets(c: &mut Criterion) {
    let mut group = c.benchmark_group("options");
    let text = generate_text(102_400);

    for spec in ["", "invertible", "ptb3Escaping=false", "americanize,quotes=unicode"] {
        let options = TokenizerOptions::parse(spec).unwrap();
        let label = if spec.is_empty() { "default" } else { spec };
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("tokenize", label), &text, |b, text| {
            b.iter(|| tokenize(black_box(text), &options).unwrap());
        });
    }

    group.finish();
}

fn bench_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("segment");
    let segmenter = Segmenter::new(TokenizerOptions::default(), SplitterConfig::default()).unwrap();

    for size in [10_240, 102_400] {
        let text = generate_text(size);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("batch", size), &text, |b, text| {
            b.iter(|| segmenter.segment(black_box(text)).unwrap().len());
        });
        group.bench_with_input(BenchmarkId::new("streaming", size), &text, |b, text| {
            b.iter(|| segmenter.sentences_in(black_box(text)).count());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tokenize, bench_option_sets, bench_segment);
criterion_main!(benches);

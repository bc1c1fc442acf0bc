//! DynAIS Feed Benchmarks
//!
//! Per-marker cost of `Engine::feed` across window sizes, level counts,
//! stream shapes and sample widths.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use ear_bench::{
    LEVEL_COUNTS, STREAM_LEN, WINDOW_SIZES, generate_nested_stream, generate_periodic_stream,
    generate_random_stream,
};
use ear_dynais::{Engine, Sample};

fn feed_stream<S: Sample>(engine: &mut Engine<S>, stream: &[S]) {
    engine.reset();
    for &sample in stream {
        black_box(engine.feed(sample));
    }
}

/// Benchmark feed cost against the window
fn bench_feed_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("feed_window");
    let stream = generate_random_stream(STREAM_LEN, 256, 42);

    for &window in WINDOW_SIZES {
        group.throughput(Throughput::Elements(STREAM_LEN as u64));

        let mut engine = Engine::<u32>::new(window, 10).unwrap();
        group.bench_with_input(BenchmarkId::new("random", window), &window, |b, _| {
            b.iter(|| feed_stream(&mut engine, &stream))
        });
    }

    group.finish();
}

/// Benchmark feed cost against the number of levels
fn bench_feed_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("feed_levels");
    let stream = generate_nested_stream(STREAM_LEN);

    for &levels in LEVEL_COUNTS {
        group.throughput(Throughput::Elements(STREAM_LEN as u64));

        let mut engine = Engine::<u32>::new(16, levels).unwrap();
        group.bench_with_input(BenchmarkId::new("nested", levels), &levels, |b, _| {
            b.iter(|| feed_stream(&mut engine, &stream))
        });
    }

    group.finish();
}

/// Benchmark feed cost per stream shape
fn bench_feed_shapes(c: &mut Criterion) {
    let mut group = c.benchmark_group("feed_shapes");
    group.throughput(Throughput::Elements(STREAM_LEN as u64));

    let shapes = [
        ("random", generate_random_stream(STREAM_LEN, 256, 7)),
        ("periodic_3", generate_periodic_stream(STREAM_LEN, 3)),
        ("periodic_50", generate_periodic_stream(STREAM_LEN, 50)),
        ("nested", generate_nested_stream(STREAM_LEN)),
    ];

    for (name, stream) in &shapes {
        let mut engine = Engine::<u32>::new(200, 10).unwrap();
        group.bench_function(*name, |b| b.iter(|| feed_stream(&mut engine, stream)));
    }

    group.finish();
}

/// Benchmark history element widths
fn bench_sample_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_width");
    group.throughput(Throughput::Elements(STREAM_LEN as u64));

    let stream = generate_random_stream(STREAM_LEN, 256, 11);
    let narrow: Vec<u16> = stream.iter().map(|&m| m as u16).collect();
    let wide: Vec<u64> = stream.iter().map(|&m| u64::from(m)).collect();

    let mut engine16 = Engine::<u16>::new(512, 10).unwrap();
    group.bench_function("u16", |b| b.iter(|| feed_stream(&mut engine16, &narrow)));

    let mut engine32 = Engine::<u32>::new(512, 10).unwrap();
    group.bench_function("u32", |b| b.iter(|| feed_stream(&mut engine32, &stream)));

    let mut engine64 = Engine::<u64>::new(512, 10).unwrap();
    group.bench_function("u64", |b| b.iter(|| feed_stream(&mut engine64, &wide)));

    group.finish();
}

criterion_group!(
    benches,
    bench_feed_window,
    bench_feed_levels,
    bench_feed_shapes,
    bench_sample_width,
);
criterion_main!(benches);

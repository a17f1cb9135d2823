use std::collections::HashSet;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use protolex::processing::{process_corpus, HeldOutPolicy};
use protolex::sampling::{generate_samples, SamplingPolicy, SliceFactor};

pub fn sampler_benchmark(c: &mut Criterion) {
    let near_total = SliceFactor::new(1.01625).unwrap();
    let eighth = SliceFactor::new(8.0).unwrap();

    c.bench_function("sample 8 x 1/8 of 100k", |b| {
        b.iter(|| {
            generate_samples(
                black_box(100_000),
                8,
                eighth,
                Some(42),
                SamplingPolicy::PerSplit,
            )
        })
    });
    c.bench_function("sample 8 x 98% of 100k", |b| {
        b.iter(|| {
            generate_samples(
                black_box(100_000),
                8,
                near_total,
                Some(42),
                SamplingPolicy::PerSplit,
            )
        })
    });
}

pub fn process_benchmark(c: &mut Criterion) {
    let corpus: Vec<String> = (0..10_000)
        .map(|i| format!("yu want {} D^ b6k {}", i % 97, i % 13))
        .collect();
    let held_out: HashSet<usize> = (0..10_000).step_by(2).collect();

    c.bench_function("process 10k lines", |b| {
        b.iter(|| process_corpus(black_box(&corpus), &held_out, HeldOutPolicy::Unsegmented))
    });
}

criterion_group!(benches, sampler_benchmark, process_benchmark);
criterion_main!(benches);

// SPDX-License-Identifier: MIT

use criterion::{
    black_box, criterion_group, criterion_main, BenchmarkId, Criterion,
    Throughput,
};
use parexec::algorithms::{filter, sum};
use parexec::{BoundedPool, ExecutionPolicy};
use test_utils::producers::random_sequence;

/// Parallel sum over a fixed array while scaling the worker cap.
fn bench_sum(c: &mut Criterion) {
    let array_size = 1_000_000;
    let input = random_sequence(array_size, 0);

    let mut group = c.benchmark_group("sum");
    group.throughput(Throughput::Elements(array_size as u64));
    for max_workers in [1, 2, 4, 8] {
        let pool = BoundedPool::new(max_workers).unwrap();
        let id = BenchmarkId::new("workers", max_workers);
        group.bench_with_input(id, &input, |b, input| {
            b.iter(|| sum(&pool, black_box(input), ExecutionPolicy::Parallel))
        });
    }
    group.finish();
}

/// Stencil filter for growing arrays, sequential against parallel.
fn bench_filter(c: &mut Criterion) {
    let pool = BoundedPool::new(4).unwrap();

    let mut group = c.benchmark_group("filter");
    for size in [100_000, 1_000_000] {
        let input = random_sequence(size, 0);
        let mut output = vec![0.0; size];
        group.throughput(Throughput::Elements(size as u64));

        for policy in [ExecutionPolicy::Sequential, ExecutionPolicy::Parallel] {
            let id = BenchmarkId::new(format!("{policy:?}"), size);
            group.bench_function(id, |b| {
                b.iter(|| {
                    filter(&pool, black_box(&input), &mut output, policy)
                        .unwrap()
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_sum, bench_filter);
criterion_main!(benches);

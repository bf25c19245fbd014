//! Benchmark for piecewise-linear interpolation, the per-sub-score hot
//! path run once per metric per scan.

use agent_readiness::config::Breakpoint;
use agent_readiness::scoring::interpolate::interpolate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

fn breakpoints(n: usize) -> Vec<Breakpoint> {
    (0..n)
        .map(|i| Breakpoint {
            raw_value: i as f64 * 5.0,
            score: 10.0 - (i as f64 * 9.0 / (n - 1) as f64),
        })
        .collect()
}

fn bench_single_lookup(c: &mut Criterion) {
    let bps = breakpoints(4);
    c.bench_function("interpolate_single", |b| {
        b.iter(|| interpolate(black_box(&bps), black_box(17.5)))
    });
}

fn bench_varying_breakpoint_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolate_by_breakpoint_count");
    for size in [2, 4, 8, 16].iter() {
        let bps = breakpoints(*size);
        group.bench_with_input(BenchmarkId::new("breakpoints", size), size, |b, _| {
            b.iter(|| interpolate(black_box(&bps), black_box(12.3)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_lookup, bench_varying_breakpoint_counts);
criterion_main!(benches);

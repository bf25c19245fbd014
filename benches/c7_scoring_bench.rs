//! Benchmark for the weighted aggregation step (`scoring::aggregate::score`)
//! and recommendation generation against a full seven-category result set,
//! the per-scan hot path once all analyzers have joined.

use agent_readiness::analysis::{C1Metrics, Category, CategoryMetrics};
use agent_readiness::analysis::AnalysisResult;
use agent_readiness::config::ScoringConfig;
use agent_readiness::recommend;
use agent_readiness::scoring::aggregate::score;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

fn sample_results() -> Vec<AnalysisResult> {
    vec![AnalysisResult {
        name: "code_health".to_string(),
        category: Category::C1,
        metrics: CategoryMetrics::C1(C1Metrics {
            complexity_avg: agent_readiness::analysis::RawMetric::available(12.0),
            function_length_avg: agent_readiness::analysis::RawMetric::available(35.0),
            file_size_avg: agent_readiness::analysis::RawMetric::available(220.0),
            coupling_avg: agent_readiness::analysis::RawMetric::available(4.0),
            duplication_rate: agent_readiness::analysis::RawMetric::available(6.0),
        }),
    }]
}

fn bench_score(c: &mut Criterion) {
    let config = ScoringConfig::default_config();
    let results = sample_results();
    c.bench_function("aggregate_score_single_category", |b| {
        b.iter(|| score(black_box(&results), black_box(&config)))
    });
}

fn bench_recommend(c: &mut Criterion) {
    let config = ScoringConfig::default_config();
    let results = sample_results();
    let scored = score(&results, &config);
    c.bench_function("recommend_generate", |b| {
        b.iter(|| recommend::generate(black_box(&scored), black_box(&config)))
    });
}

criterion_group!(benches, bench_score, bench_recommend);
criterion_main!(benches);

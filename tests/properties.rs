//! Property-based tests for the universal invariants in spec.md §8 that
//! aren't already pinned down by example-based unit tests: interpolation
//! behaves correctly across arbitrary monotone breakpoint tables, and a
//! recommendation's claimed `score_improvement` actually matches what you
//! get by simulating its target value.

use agent_readiness::analysis::{AnalysisResult, C1Metrics, Category, CategoryMetrics, RawMetric};
use agent_readiness::config::{Breakpoint, ScoringConfig};
use agent_readiness::recommend;
use agent_readiness::scoring::aggregate::score;
use agent_readiness::scoring::interpolate::interpolate;
use proptest::prelude::*;

/// Build a strictly increasing-in-`raw_value` breakpoint table whose
/// scores move monotonically from `start` to `end`.
fn monotone_breakpoints(raw_values: &[f64], start: f64, end: f64) -> Vec<Breakpoint> {
    let n = raw_values.len();
    raw_values
        .iter()
        .enumerate()
        .map(|(i, &raw_value)| {
            let t = if n <= 1 { 0.0 } else { i as f64 / (n - 1) as f64 };
            Breakpoint {
                raw_value,
                score: start + t * (end - start),
            }
        })
        .collect()
}

proptest! {
    #[test]
    fn interpolate_never_leaves_the_one_to_ten_range(
        raws in prop::collection::vec(0.0f64..1000.0, 2..8),
        x in -500.0f64..1500.0,
    ) {
        let mut sorted = raws.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        sorted.dedup();
        prop_assume!(sorted.len() >= 2);
        let breakpoints = monotone_breakpoints(&sorted, 1.0, 10.0);
        let score = interpolate(&breakpoints, x);
        prop_assert!((1.0..=10.0).contains(&score));
    }

    #[test]
    fn interpolate_clamps_at_or_beyond_either_end(
        raws in prop::collection::vec(0.0f64..1000.0, 2..8),
        below in -1000.0f64..0.0,
        above in 1000.1f64..2000.0,
    ) {
        let mut sorted = raws.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        sorted.dedup();
        prop_assume!(sorted.len() >= 2);
        let breakpoints = monotone_breakpoints(&sorted, 2.0, 9.0);
        let first = breakpoints.first().unwrap();
        let last = breakpoints.last().unwrap();

        prop_assert_eq!(interpolate(&breakpoints, first.raw_value + below), first.score);
        prop_assert_eq!(interpolate(&breakpoints, last.raw_value + above), last.score);
    }

    #[test]
    fn interpolate_is_monotone_for_monotone_increasing_tables(
        raws in prop::collection::vec(0.0f64..1000.0, 2..8),
        sample_count in 5..40usize,
    ) {
        let mut sorted = raws.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        sorted.dedup();
        prop_assume!(sorted.len() >= 2);
        let breakpoints = monotone_breakpoints(&sorted, 1.0, 10.0);
        let first = breakpoints.first().unwrap().raw_value;
        let last = breakpoints.last().unwrap().raw_value;

        let mut prev = interpolate(&breakpoints, first);
        for i in 0..=sample_count {
            let x = first + (last - first) * (i as f64 / sample_count as f64);
            let current = interpolate(&breakpoints, x);
            prop_assert!(current >= prev - 1e-9);
            prev = current;
        }
    }
}

fn sample_result(complexity: f64) -> AnalysisResult {
    AnalysisResult {
        name: "code_health".to_string(),
        category: Category::C1,
        metrics: CategoryMetrics::C1(C1Metrics {
            complexity_avg: RawMetric::available(complexity),
            function_length_avg: RawMetric::available(35.0),
            file_size_avg: RawMetric::available(220.0),
            coupling_avg: RawMetric::available(4.0),
            duplication_rate: RawMetric::available(6.0),
        }),
    }
}

#[test]
fn top_recommendation_impact_matches_resimulated_composite() {
    let config = ScoringConfig::default_config();
    let results = vec![sample_result(28.0)];
    let scored = score(&results, &config);
    let recs = recommend::generate(&scored, &config);
    let top = recs.first().expect("a tightened complexity metric yields a recommendation");

    let cat_config = config
        .categories
        .get(Category::C1.config_key())
        .expect("C1 category config exists");
    assert!(
        cat_config.metrics.iter().any(|m| m.name == top.metric_name),
        "recommended metric has a breakpoint table"
    );

    let mut bumped = sample_result(28.0);
    if let CategoryMetrics::C1(m) = &mut bumped.metrics {
        match top.metric_name.as_str() {
            "complexity_avg" => m.complexity_avg = RawMetric::available(top.target_value),
            "function_length_avg" => m.function_length_avg = RawMetric::available(top.target_value),
            "file_size_avg" => m.file_size_avg = RawMetric::available(top.target_value),
            "coupling_avg" => m.coupling_avg = RawMetric::available(top.target_value),
            "duplication_rate" => m.duplication_rate = RawMetric::available(top.target_value),
            other => panic!("unexpected metric name in recommendation: {other}"),
        }
    }
    let bumped_scored = score(&[bumped], &config);

    let delta = bumped_scored.composite - scored.composite;
    assert!(
        (delta - top.score_improvement).abs() < 0.05,
        "resimulated delta {delta} should match claimed improvement {}",
        top.score_improvement
    );
}

#[test]
fn recommendation_ranks_are_sequential_and_bounded() {
    let config = ScoringConfig::default_config();
    let results = vec![sample_result(40.0)];
    let scored = score(&results, &config);
    let recs = recommend::generate(&scored, &config);

    assert!(recs.len() <= 5);
    for (i, rec) in recs.iter().enumerate() {
        assert_eq!(rec.rank, i + 1);
    }
    for window in recs.windows(2) {
        assert!(window[0].score_improvement >= window[1].score_improvement);
    }
}

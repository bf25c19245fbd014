//! Recommendation generator: turns a `ScoredResult` into up to five ranked,
//! actionable improvement suggestions (spec.md §4.5).

use crate::config::{Breakpoint, ScoringConfig};
use crate::scoring::aggregate::{CategoryScore, ScoredResult, SubScore};
use serde::{Deserialize, Serialize};

/// Metrics where a raw-value improvement of the same relative size still
/// represents much deeper real-world refactoring work than other metrics,
/// so they receive a one-level effort bump regardless of the measured gap.
const DIFFICULTY_BUMP_METRICS: &[&str] = &["complexity_avg", "duplication_rate"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Effort {
    Low,
    Medium,
    High,
}

impl Effort {
    fn bump(self) -> Self {
        match self {
            Effort::Low => Effort::Medium,
            Effort::Medium => Effort::High,
            Effort::High => Effort::High,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub rank: usize,
    pub category: String,
    pub metric_name: String,
    pub current_value: f64,
    pub current_score: f64,
    pub target_value: f64,
    pub target_score: f64,
    pub score_improvement: f64,
    pub effort: Effort,
    pub summary: String,
    pub action: String,
}

/// Generate up to five ranked recommendations from a scored result.
pub fn generate(scored: &ScoredResult, config: &ScoringConfig) -> Vec<Recommendation> {
    let mut candidates = Vec::new();

    for (cat_idx, category) in scored.categories.iter().enumerate() {
        let cat_config = config.categories.get(&category.name);
        for (sub_idx, sub) in category.sub_scores.iter().enumerate() {
            if !sub.available || sub.score >= 9.0 {
                continue;
            }
            let metric_config = cat_config.and_then(|c| c.metrics.iter().find(|m| m.name == sub.metric_name));
            let breakpoints = match metric_config {
                Some(m) if !m.breakpoints.is_empty() => &m.breakpoints,
                _ => continue,
            };

            let Some(target) = next_target_breakpoint(breakpoints, sub.raw_value, sub.score) else {
                continue;
            };

            let simulated = simulate_composite(scored, cat_idx, sub_idx, target.score);
            let improvement = simulated - scored.composite;
            if improvement <= 0.0 {
                continue;
            }

            let effort = assign_effort(&sub.metric_name, breakpoints, sub.raw_value, target.raw_value);
            let (summary, action) = describe(&sub.metric_name, sub.raw_value, target.raw_value);

            candidates.push(Recommendation {
                rank: 0,
                category: category.name.clone(),
                metric_name: sub.metric_name.clone(),
                current_value: sub.raw_value,
                current_score: sub.score,
                target_value: target.raw_value,
                target_score: target.score,
                score_improvement: improvement,
                effort,
                summary,
                action,
            });
        }
    }

    candidates.sort_by(|a, b| b.score_improvement.partial_cmp(&a.score_improvement).unwrap());
    candidates.truncate(5);
    for (i, rec) in candidates.iter_mut().enumerate() {
        rec.rank = i + 1;
    }
    candidates
}

/// The nearest breakpoint (by raw-value distance) whose score strictly
/// improves on `current_score` -- the direction of travel that actually
/// helps, whichever way the metric's breakpoints run.
fn next_target_breakpoint(breakpoints: &[Breakpoint], raw_value: f64, current_score: f64) -> Option<Breakpoint> {
    breakpoints
        .iter()
        .filter(|b| b.score > current_score + 1e-9)
        .min_by(|a, b| {
            (a.raw_value - raw_value)
                .abs()
                .partial_cmp(&(b.raw_value - raw_value).abs())
                .unwrap()
        })
        .copied()
}

fn assign_effort(metric_name: &str, breakpoints: &[Breakpoint], current: f64, target: f64) -> Effort {
    let min_raw = breakpoints.iter().map(|b| b.raw_value).fold(f64::INFINITY, f64::min);
    let max_raw = breakpoints.iter().map(|b| b.raw_value).fold(f64::NEG_INFINITY, f64::max);
    let range = (max_raw - min_raw).max(f64::EPSILON);
    let relative_gap = (target - current).abs() / range;

    let base = if relative_gap < 0.15 {
        Effort::Low
    } else if relative_gap < 0.40 {
        Effort::Medium
    } else {
        Effort::High
    };

    if DIFFICULTY_BUMP_METRICS.contains(&metric_name) {
        base.bump()
    } else {
        base
    }
}

/// Recompute the composite with exactly one sub-score's `score` replaced,
/// everything else held constant -- the "simulate" step of spec.md §4.5.
fn simulate_composite(scored: &ScoredResult, cat_idx: usize, sub_idx: usize, new_score: f64) -> f64 {
    let categories: Vec<CategoryScore> = scored
        .categories
        .iter()
        .enumerate()
        .map(|(i, cat)| {
            if i != cat_idx {
                return cat.clone();
            }
            let sub_scores: Vec<SubScore> = cat
                .sub_scores
                .iter()
                .enumerate()
                .map(|(j, s)| {
                    let mut s = s.clone();
                    if j == sub_idx {
                        s.score = new_score;
                    }
                    s
                })
                .collect();
            let (numerator, denominator) = sub_scores
                .iter()
                .filter(|s| s.available)
                .fold((0.0, 0.0), |(n, d), s| (n + s.score * s.weight, d + s.weight));
            let score = if denominator > 0.0 { numerator / denominator } else { -1.0 };
            CategoryScore { name: cat.name.clone(), score, weight: cat.weight, sub_scores }
        })
        .collect();

    let (numerator, denominator) = categories
        .iter()
        .filter(|c| c.score >= 0.0)
        .fold((0.0, 0.0), |(n, d), c| (n + c.score * c.weight, d + c.weight));
    if denominator > 0.0 { numerator / denominator } else { 1.0 }
}

/// Metric-specific summary/action text, framed around what makes a
/// repository easier for an autonomous coding agent to work in.
fn describe(metric_name: &str, current: f64, target: f64) -> (String, String) {
    match metric_name {
        "complexity_avg" => (
            format!("Average cyclomatic complexity is {current:.1}; agents struggle to reason about branchy functions."),
            format!("Refactor the most complex functions toward an average complexity of {target:.1} by extracting guard clauses and sub-routines."),
        ),
        "function_length_avg" => (
            format!("Functions average {current:.0} lines, making it harder for an agent to hold the whole body in context."),
            format!("Split long functions so the average length falls to around {target:.0} lines."),
        ),
        "file_size_avg" => (
            format!("Files average {current:.0} lines, pushing agents to truncate or paginate reads."),
            format!("Break up large files so the average size falls to around {target:.0} lines."),
        ),
        "coupling_avg" => (
            format!("Modules average {current:.1} direct dependencies, widening the blast radius of any single edit."),
            format!("Reduce average module coupling toward {target:.1} dependencies via narrower interfaces."),
        ),
        "duplication_rate" => (
            format!("{current:.1}% of code is duplicated, so an agent's fix in one copy silently misses the others."),
            format!("Extract shared logic to bring duplication down to about {target:.1}%."),
        ),
        "type_annotation_coverage" => (
            format!("Only {current:.0}% of signatures carry type annotations, leaving an agent to infer types from usage."),
            format!("Annotate more signatures to raise coverage toward {target:.0}%."),
        ),
        "naming_consistency" => (
            format!("Naming consistency sits at {current:.0}%, so identifiers don't reliably signal intent."),
            format!("Align naming conventions across the codebase to raise consistency toward {target:.0}%."),
        ),
        "magic_number_ratio" => (
            format!("{current:.1}% of numeric literals are unexplained magic numbers."),
            format!("Extract named constants to bring the magic-number ratio down to about {target:.1}%."),
        ),
        "type_strictness" => (
            format!("Type strictness is at {current:.0}%, leaving room for agent-introduced type errors."),
            format!("Tighten type declarations to raise strictness toward {target:.0}%."),
        ),
        "null_safety_score" => (
            format!("Null-safety coverage is {current:.0}%, so an agent can't always tell which values may be absent."),
            format!("Add explicit optionality/null checks to raise the score toward {target:.0}%."),
        ),
        "max_directory_depth" => (
            format!("The deepest directory nesting is {current:.0} levels, making module paths harder to navigate."),
            format!("Flatten the directory structure toward a max depth of {target:.0}."),
        ),
        "avg_module_fanout" => (
            format!("Modules import an average of {current:.1} others, amplifying change ripple effects."),
            format!("Reduce average module fan-out toward {target:.1} by consolidating imports."),
        ),
        "circular_dependency_count" => (
            format!("{current:.0} circular dependency chains exist, which confuse any agent tracing call flow."),
            format!("Break cycles to bring the count down to {target:.0}."),
        ),
        "avg_import_complexity" => (
            format!("Average import complexity is {current:.1}, making dependency graphs harder to follow."),
            format!("Simplify import graphs toward an average complexity of {target:.1}."),
        ),
        "dead_export_count" => (
            format!("{current:.0} exports have no in-repo consumers, misleading an agent about what is actually used."),
            format!("Remove or inline dead exports to bring the count down to {target:.0}."),
        ),
        "churn_rate" => (
            format!("Files change an average of {current:.1} times per week, a moving target for an agent's mental model."),
            format!("Stabilize the hottest files to bring churn down toward {target:.1} changes per week."),
        ),
        "temporal_coupling_pct" => (
            format!("{current:.1}% of commits touch unrelated files together, hinting at hidden coupling an agent won't see in the code."),
            format!("Decouple co-changing files to bring temporal coupling down to about {target:.1}%."),
        ),
        "author_fragmentation" => (
            format!("Author fragmentation is {current:.0}%, meaning conventions vary by who last touched a file."),
            format!("Consolidate ownership or conventions to bring fragmentation down toward {target:.0}%."),
        ),
        "commit_stability" => (
            format!("Commit stability is {current:.0}%, so recently-changed code may still be in flux."),
            format!("Let hotspots settle or add review gates to raise stability toward {target:.0}%."),
        ),
        "hotspot_concentration" => (
            format!("{current:.0}% of changes concentrate in a few hotspot files, a risky area for any automated edit."),
            format!("Spread responsibilities out of hotspots to bring concentration down to about {target:.0}%."),
        ),
        "test_to_code_ratio" => (
            format!("Test code is {current:.0}% the size of source code, offering an agent little regression safety net."),
            format!("Grow the test suite to bring the ratio toward {target:.0}%."),
        ),
        "coverage_percent" => (
            format!("Test coverage is {current:.0}%, leaving large surfaces an agent's changes won't be checked against."),
            format!("Add tests to raise coverage toward {target:.0}%."),
        ),
        "test_isolation" => (
            format!("Test isolation is {current:.0}%, so failures are harder for an agent to attribute to a single change."),
            format!("Remove shared mutable test fixtures to raise isolation toward {target:.0}%."),
        ),
        "assertion_density" => (
            format!("Tests average {current:.1} assertions each, a thin signal when an agent's change breaks something subtly."),
            format!("Add assertions to raise the average toward {target:.1} per test."),
        ),
        "test_file_ratio" => (
            format!("Only {current:.0}% of source files have a corresponding test file."),
            format!("Add test files to raise coverage of source files toward {target:.0}%."),
        ),
        "task_execution_consistency" => (
            format!("Repeated runs of the same task score {current:.1}/10 for consistency, suggesting ambiguous context."),
            format!("Clarify the surrounding code and docs so repeated runs converge toward {target:.1}/10."),
        ),
        "code_behavior_comprehension" => (
            format!("Agent comprehension of code behavior scores {current:.1}/10."),
            format!("Improve naming, structure, and comments so behavior is easier to infer, toward {target:.1}/10."),
        ),
        "cross_file_navigation" => (
            format!("Cross-file navigation scores {current:.1}/10, meaning agents struggle to trace logic across files."),
            format!("Strengthen module boundaries and imports so navigation improves toward {target:.1}/10."),
        ),
        "identifier_interpretability" => (
            format!("Identifier interpretability scores {current:.1}/10."),
            format!("Rename unclear identifiers to raise interpretability toward {target:.1}/10."),
        ),
        "documentation_accuracy_detection" => (
            format!("Agents detect stale or inaccurate documentation only {current:.1}/10 of the time."),
            format!("Audit and refresh documentation so accuracy detection rises toward {target:.1}/10."),
        ),
        other => (
            format!("{other} currently scores below the agent-readiness bar at a raw value of {current:.1}."),
            format!("Improve {other} toward a raw value of {target:.1}."),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CategoryConfig, MetricThresholds};
    use std::collections::BTreeMap;

    fn config_with(metric: &str, breakpoints: Vec<(f64, f64)>) -> ScoringConfig {
        let mut categories = BTreeMap::new();
        categories.insert(
            "C1".to_string(),
            CategoryConfig {
                weight: 1.0,
                metrics: vec![MetricThresholds {
                    name: metric.to_string(),
                    weight: 1.0,
                    breakpoints: breakpoints
                        .into_iter()
                        .map(|(r, s)| Breakpoint { raw_value: r, score: s })
                        .collect(),
                }],
            },
        );
        ScoringConfig { categories, c7: Default::default() }
    }

    fn scored_with(category: &str, metric: &str, raw_value: f64, score: f64) -> ScoredResult {
        ScoredResult {
            categories: vec![CategoryScore {
                name: category.to_string(),
                score,
                weight: 1.0,
                sub_scores: vec![SubScore {
                    metric_name: metric.to_string(),
                    raw_value,
                    score,
                    weight: 1.0,
                    available: true,
                    evidence: Vec::new(),
                }],
            }],
            composite: score,
            tier: "Agent-Limited".into(),
        }
    }

    #[test]
    fn skips_unavailable_and_near_perfect_metrics() {
        let config = config_with("complexity_avg", vec![(1.0, 10.0), (40.0, 1.0)]);

        let mut scored = scored_with("C1", "complexity_avg", 20.0, 9.5);
        scored.categories[0].sub_scores[0].available = false;
        assert!(generate(&scored, &config).is_empty());

        let scored = scored_with("C1", "complexity_avg", 2.0, 9.5);
        assert!(generate(&scored, &config).is_empty());
    }

    #[test]
    fn complexity_and_duplication_get_a_difficulty_bump() {
        let config = config_with("complexity_avg", vec![(1.0, 10.0), (40.0, 1.0)]);
        let scored = scored_with("C1", "complexity_avg", 20.0, 5.0);
        let recs = generate(&scored, &config);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].rank, 1);
        assert_eq!(recs[0].effort, Effort::High);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let scored = ScoredResult { categories: vec![], composite: 5.0, tier: "Agent-Limited".into() };
        let config = ScoringConfig { categories: BTreeMap::new(), c7: Default::default() };
        assert!(generate(&scored, &config).is_empty());
    }

    #[test]
    fn recommendations_sorted_by_improvement_descending() {
        let mut categories = BTreeMap::new();
        categories.insert(
            "C1".to_string(),
            CategoryConfig {
                weight: 0.5,
                metrics: vec![
                    MetricThresholds {
                        name: "complexity_avg".into(),
                        weight: 1.0,
                        breakpoints: vec![Breakpoint { raw_value: 1.0, score: 10.0 }, Breakpoint { raw_value: 40.0, score: 1.0 }],
                    },
                ],
            },
        );
        categories.insert(
            "C6".to_string(),
            CategoryConfig {
                weight: 0.5,
                metrics: vec![MetricThresholds {
                    name: "coverage_percent".into(),
                    weight: 1.0,
                    breakpoints: vec![Breakpoint { raw_value: 0.0, score: 1.0 }, Breakpoint { raw_value: 90.0, score: 10.0 }],
                }],
            },
        );
        let config = ScoringConfig { categories, c7: Default::default() };

        let scored = ScoredResult {
            categories: vec![
                CategoryScore {
                    name: "C1".into(),
                    score: 4.0,
                    weight: 0.5,
                    sub_scores: vec![SubScore {
                        metric_name: "complexity_avg".into(),
                        raw_value: 25.0,
                        score: 4.0,
                        weight: 1.0,
                        available: true,
                        evidence: Vec::new(),
                    }],
                },
                CategoryScore {
                    name: "C6".into(),
                    score: 2.0,
                    weight: 0.5,
                    sub_scores: vec![SubScore {
                        metric_name: "coverage_percent".into(),
                        raw_value: 10.0,
                        score: 2.0,
                        weight: 1.0,
                        available: true,
                        evidence: Vec::new(),
                    }],
                },
            ],
            composite: 3.0,
            tier: "Agent-Hostile".into(),
        };

        let recs = generate(&scored, &config);
        for pair in recs.windows(2) {
            assert!(pair[0].score_improvement >= pair[1].score_improvement);
        }
        for (i, rec) in recs.iter().enumerate() {
            assert_eq!(rec.rank, i + 1);
        }
    }
}

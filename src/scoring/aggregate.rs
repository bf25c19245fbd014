//! Weighted aggregation: sub-scores -> category scores -> composite ->
//! tier (spec.md §4.2).

use super::interpolate::interpolate;
use crate::analysis::{AnalysisResult, Category};
use crate::config::ScoringConfig;
use crate::core::EvidenceItem;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubScore {
    pub metric_name: String,
    pub raw_value: f64,
    pub score: f64,
    pub weight: f64,
    pub available: bool,
    pub evidence: Vec<EvidenceItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub name: String,
    /// -1 signals "unavailable" (every sub-score unavailable).
    pub score: f64,
    pub weight: f64,
    pub sub_scores: Vec<SubScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    AgentReady,
    AgentAssisted,
    AgentLimited,
    AgentHostile,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::AgentReady => "Agent-Ready",
            Tier::AgentAssisted => "Agent-Assisted",
            Tier::AgentLimited => "Agent-Limited",
            Tier::AgentHostile => "Agent-Hostile",
        }
    }

    pub fn from_composite(composite: f64) -> Self {
        if composite >= 8.0 {
            Tier::AgentReady
        } else if composite >= 6.0 {
            Tier::AgentAssisted
        } else if composite >= 4.0 {
            Tier::AgentLimited
        } else {
            Tier::AgentHostile
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
    pub categories: Vec<CategoryScore>,
    pub composite: f64,
    pub tier: String,
}

/// Extract one category's sub-scores, category score, and evidence map
/// from its `AnalysisResult`. The evidence map always has an entry for
/// every metric name, even when the list is empty -- the hard invariant
/// spec.md §4.2 asserts across all seven categories.
pub fn extract_category(
    result: &AnalysisResult,
    config: &ScoringConfig,
) -> (Vec<SubScore>, f64, BTreeMap<String, Vec<EvidenceItem>>) {
    let evidence_map = result.metrics.evidence_map();
    let cat_config = config.categories.get(result.category.config_key());

    let mut sub_scores = Vec::new();
    for (metric_name, raw_metric) in result.metrics.named() {
        let metric_config = cat_config.and_then(|c| c.metrics.iter().find(|m| m.name == metric_name));
        let weight = metric_config.map(|m| m.weight).unwrap_or(1.0);

        match raw_metric.value {
            Some(raw_value) => {
                let breakpoints = metric_config.map(|m| m.breakpoints.as_slice()).unwrap_or(&[]);
                let score = interpolate(breakpoints, raw_value);
                sub_scores.push(SubScore {
                    metric_name: metric_name.to_string(),
                    raw_value,
                    score,
                    weight,
                    available: true,
                    evidence: raw_metric.evidence.clone(),
                });
            }
            None => {
                sub_scores.push(SubScore {
                    metric_name: metric_name.to_string(),
                    raw_value: 0.0,
                    score: 0.0,
                    weight,
                    available: false,
                    evidence: raw_metric.evidence.clone(),
                });
            }
        }
    }

    let (numerator, denominator) = sub_scores
        .iter()
        .filter(|s| s.available)
        .fold((0.0, 0.0), |(n, d), s| (n + s.score * s.weight, d + s.weight));

    let category_score = if denominator > 0.0 { numerator / denominator } else { -1.0 };

    (sub_scores, category_score, evidence_map)
}

/// Compute the full `ScoredResult` from every analyzer's output.
pub fn score(results: &[AnalysisResult], config: &ScoringConfig) -> ScoredResult {
    let mut sorted: Vec<&AnalysisResult> = results.iter().collect();
    sorted.sort_by_key(|r| r.category.config_key());

    let mut categories = Vec::new();
    for result in sorted {
        let (sub_scores, cat_score, _evidence) = extract_category(result, config);
        let weight = config
            .categories
            .get(result.category.config_key())
            .map(|c| c.weight)
            .unwrap_or(0.0);
        categories.push(CategoryScore {
            name: result.category.config_key().to_string(),
            score: cat_score,
            weight,
            sub_scores,
        });
    }

    let (numerator, denominator) = categories
        .iter()
        .filter(|c| c.score >= 0.0)
        .fold((0.0, 0.0), |(n, d), c| (n + c.score * c.weight, d + c.weight));

    let composite = if denominator > 0.0 { numerator / denominator } else { 1.0 };
    let tier = Tier::from_composite(composite);

    ScoredResult {
        categories,
        composite,
        tier: tier.label().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{C1Metrics, CategoryMetrics, RawMetric};
    use crate::config::{Breakpoint, CategoryConfig, MetricThresholds};

    fn simple_config() -> ScoringConfig {
        let mut categories = BTreeMap::new();
        categories.insert(
            "C1".to_string(),
            CategoryConfig {
                weight: 0.6,
                metrics: vec![MetricThresholds {
                    name: "complexity_avg".into(),
                    weight: 1.0,
                    breakpoints: vec![
                        Breakpoint { raw_value: 0.0, score: 10.0 },
                        Breakpoint { raw_value: 10.0, score: 1.0 },
                    ],
                }],
            },
        );
        ScoringConfig { categories, c7: Default::default() }
    }

    #[test]
    fn all_tens_normalizes_to_ten_not_sum_of_weights() {
        let config = simple_config();
        let result = AnalysisResult {
            name: "code_health".into(),
            category: Category::C1,
            metrics: CategoryMetrics::C1(C1Metrics {
                complexity_avg: RawMetric::available(0.0),
                ..Default::default()
            }),
        };
        let scored = score(&[result], &config);
        assert!((scored.composite - 10.0).abs() < 1e-9);
    }

    #[test]
    fn tier_boundaries_are_strict_gte() {
        assert_eq!(Tier::from_composite(8.0).label(), "Agent-Ready");
        assert_eq!(Tier::from_composite(7.9999).label(), "Agent-Assisted");
        assert_eq!(Tier::from_composite(6.0).label(), "Agent-Assisted");
        assert_eq!(Tier::from_composite(4.0).label(), "Agent-Limited");
        assert_eq!(Tier::from_composite(3.9999).label(), "Agent-Hostile");
    }

    #[test]
    fn unavailable_metrics_exclude_weight_from_both_sides() {
        let config = simple_config();
        let result = AnalysisResult {
            name: "code_health".into(),
            category: Category::C1,
            metrics: CategoryMetrics::C1(C1Metrics {
                complexity_avg: RawMetric::unavailable(),
                ..Default::default()
            }),
        };
        let (sub_scores, cat_score, evidence) = extract_category(&result, &config);
        assert_eq!(cat_score, -1.0);
        assert!(!sub_scores[0].available);
        assert!(evidence.contains_key("complexity_avg"));
        assert!(evidence.contains_key("function_length_avg"));
    }
}

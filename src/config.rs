//! Scoring configuration: typed, validated records loaded from YAML
//! (spec.md §9's "use typed validated records, not dynamic maps").
//! Breakpoint monotonicity and score range are enforced at load time so a
//! malformed config fails fast as a Configuration Error, never silently
//! producing out-of-range sub-scores downstream.

use crate::errors::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const DEFAULT_SCORING_YAML: &str = include_str!("../config/default_scoring.yaml");

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Breakpoint {
    pub raw_value: f64,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricThresholds {
    pub name: String,
    #[serde(default = "default_metric_weight")]
    pub weight: f64,
    pub breakpoints: Vec<Breakpoint>,
}

fn default_metric_weight() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub weight: f64,
    pub metrics: Vec<MetricThresholds>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct C7ScoringExtras {
    #[serde(default = "default_blended_rate")]
    pub blended_rate_usd_per_mtok: f64,
    #[serde(default = "default_variance_breakpoints")]
    pub variance_breakpoints: Vec<Breakpoint>,
}

fn default_blended_rate() -> f64 {
    crate::analysis::c7::cost::DEFAULT_BLENDED_RATE_PER_MTOK
}

fn default_variance_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint { raw_value: 0.0, score: 10.0 },
        Breakpoint { raw_value: 1.0, score: 7.0 },
        Breakpoint { raw_value: 4.0, score: 4.0 },
        Breakpoint { raw_value: 9.0, score: 1.0 },
    ]
}

impl Default for C7ScoringExtras {
    fn default() -> Self {
        C7ScoringExtras {
            blended_rate_usd_per_mtok: default_blended_rate(),
            variance_breakpoints: default_variance_breakpoints(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub categories: BTreeMap<String, CategoryConfig>,
    #[serde(default)]
    pub c7: C7ScoringExtras,
}

impl ScoringConfig {
    pub fn default_config() -> Self {
        serde_yaml::from_str(DEFAULT_SCORING_YAML).expect("embedded default_scoring.yaml is valid")
    }

    /// Load from `path`, overlaying onto the embedded default: any
    /// category/metric the file omits inherits the default's breakpoints.
    /// Invalid YAML or a failed validation is a fatal Configuration Error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let overlay: PartialScoringConfig = serde_yaml::from_str(&content)
            .map_err(|e| AnalysisError::Configuration(format!("invalid YAML in {}: {e}", path.display())))?;

        let mut config = Self::default_config();
        overlay.merge_into(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (cat_name, cat) in &self.categories {
            if !(0.0..=1.0).contains(&cat.weight) {
                return Err(AnalysisError::Configuration(format!(
                    "category {cat_name} weight {} out of [0,1]",
                    cat.weight
                )));
            }
            for metric in &cat.metrics {
                validate_breakpoints(&metric.name, &metric.breakpoints)?;
            }
        }
        validate_breakpoints("c7.variance", &self.c7.variance_breakpoints)?;
        Ok(())
    }
}

fn validate_breakpoints(name: &str, breakpoints: &[Breakpoint]) -> Result<()> {
    if breakpoints.is_empty() {
        return Err(AnalysisError::Configuration(format!(
            "metric {name} has no breakpoints"
        )));
    }
    for bp in breakpoints {
        if !(1.0..=10.0).contains(&bp.score) {
            return Err(AnalysisError::Configuration(format!(
                "metric {name} breakpoint score {} out of [1,10]",
                bp.score
            )));
        }
    }
    for window in breakpoints.windows(2) {
        if window[0].raw_value > window[1].raw_value {
            return Err(AnalysisError::Configuration(format!(
                "metric {name} breakpoints are not monotonic in raw_value"
            )));
        }
    }
    Ok(())
}

/// A possibly-partial override document: missing categories/metrics are
/// left untouched in the base default.
#[derive(Debug, Clone, Deserialize, Default)]
struct PartialScoringConfig {
    #[serde(default)]
    categories: BTreeMap<String, PartialCategoryConfig>,
    #[serde(default)]
    c7: Option<C7ScoringExtras>,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct PartialCategoryConfig {
    weight: Option<f64>,
    #[serde(default)]
    metrics: Vec<MetricThresholds>,
}

impl PartialScoringConfig {
    fn merge_into(self, base: &mut ScoringConfig) {
        for (cat_name, partial) in self.categories {
            let entry = base.categories.entry(cat_name).or_insert_with(|| CategoryConfig {
                weight: 0.0,
                metrics: Vec::new(),
            });
            if let Some(weight) = partial.weight {
                entry.weight = weight;
            }
            for metric in partial.metrics {
                if let Some(existing) = entry.metrics.iter_mut().find(|m| m.name == metric.name) {
                    *existing = metric;
                } else {
                    entry.metrics.push(metric);
                }
            }
        }
        if let Some(c7) = self.c7 {
            base.c7 = c7;
        }
    }
}

/// Runtime knobs for the C7 subsystem: a composed view drawn from the
/// loaded `ScoringConfig` plus CLI flags (sandbox/debug-dir/replay mode),
/// passed around independently of the YAML-sourced `ScoringConfig` since
/// those knobs are never serialized to the config file.
#[derive(Debug, Clone)]
pub struct C7Config {
    pub per_prompt_timeout_secs: u64,
    pub sandbox_dir: PathBuf,
    pub debug_dir: Option<PathBuf>,
    pub is_replay: bool,
    pub variance_breakpoints: Vec<Breakpoint>,
    pub blended_rate_usd_per_mtok: f64,
    pub max_parallel: usize,
}

impl C7Config {
    pub fn from_scoring(extras: &C7ScoringExtras, sandbox_dir: PathBuf, debug_dir: Option<PathBuf>, is_replay: bool) -> Self {
        C7Config {
            per_prompt_timeout_secs: 60,
            sandbox_dir,
            debug_dir,
            is_replay,
            variance_breakpoints: extras.variance_breakpoints.clone(),
            blended_rate_usd_per_mtok: extras.blended_rate_usd_per_mtok,
            max_parallel: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_default_is_valid() {
        let config = ScoringConfig::default_config();
        config.validate().unwrap();
        assert!(config.categories.contains_key("C1"));
        assert!(config.categories.contains_key("C7"));
    }

    #[test]
    fn rejects_non_monotonic_breakpoints() {
        let metric = MetricThresholds {
            name: "x".into(),
            weight: 1.0,
            breakpoints: vec![
                Breakpoint { raw_value: 5.0, score: 2.0 },
                Breakpoint { raw_value: 1.0, score: 8.0 },
            ],
        };
        assert!(validate_breakpoints(&metric.name, &metric.breakpoints).is_err());
    }

    #[test]
    fn rejects_out_of_range_score() {
        let breakpoints = vec![Breakpoint { raw_value: 0.0, score: 11.0 }];
        assert!(validate_breakpoints("x", &breakpoints).is_err());
    }
}

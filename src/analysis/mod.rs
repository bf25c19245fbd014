//! The seven-category metric extraction model.
//!
//! Each analyzer (C1..C7) implements [`Analyzer`], consumes the parsed
//! [`AnalysisTarget`]s, and emits one [`AnalysisResult`] -- always, even on
//! internal failure, signalled by `RawMetric.value == None` rather than by
//! a missing result. Per the design notes (spec.md §9), the untyped
//! `map[string]any` the original system used for per-category metrics is
//! replaced here by a tagged sum type, [`CategoryMetrics`], with one
//! concrete struct per category; each struct's named fields stand in for
//! the metric-keyed map spec.md describes, giving compile-time guarantees
//! the map could not.

pub mod c1_code_health;
pub mod c2_semantic;
pub mod c3_architecture;
pub mod c5_temporal;
pub mod c6_testing;
pub mod c7;

use crate::core::{AnalysisTarget, EvidenceItem};
use crate::parsing::SyntaxProvider;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    C1,
    C2,
    C3,
    C5,
    C6,
    C7,
}

impl Category {
    /// Key used to look up this category's config in `ScoringConfig`
    /// (`"C1"`..`"C7"`), distinct from the human-readable `name()`.
    pub fn config_key(&self) -> &'static str {
        match self {
            Category::C1 => "C1",
            Category::C2 => "C2",
            Category::C3 => "C3",
            Category::C5 => "C5",
            Category::C6 => "C6",
            Category::C7 => "C7",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::C1 => "Code Health",
            Category::C2 => "Semantic Explicitness",
            Category::C3 => "Architecture",
            Category::C5 => "Temporal Dynamics",
            Category::C6 => "Testing",
            Category::C7 => "Agent Evaluation",
        }
    }
}

/// One metric's raw extracted value. `value = None` means the metric is
/// unavailable (its weight will be redistributed by the scorer); the
/// evidence list is always present, possibly empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMetric {
    pub value: Option<f64>,
    pub evidence: Vec<EvidenceItem>,
}

impl RawMetric {
    pub fn available(value: f64) -> Self {
        RawMetric { value: Some(value), evidence: Vec::new() }
    }

    pub fn available_with_evidence(value: f64, evidence: Vec<EvidenceItem>) -> Self {
        RawMetric { value: Some(value), evidence }
    }

    pub fn unavailable() -> Self {
        RawMetric { value: None, evidence: Vec::new() }
    }

    pub fn is_available(&self) -> bool {
        self.value.is_some()
    }
}

/// Implemented by every per-category metrics struct so the scorer can walk
/// `(metric_name, &RawMetric)` pairs generically without matching on the
/// enum itself.
pub trait NamedMetrics {
    fn named(&self) -> Vec<(&'static str, &RawMetric)>;
}

macro_rules! category_metrics {
    ($name:ident { $($field:ident => $key:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Default, Serialize, Deserialize)]
        pub struct $name {
            $(pub $field: RawMetric),+
        }

        impl NamedMetrics for $name {
            fn named(&self) -> Vec<(&'static str, &RawMetric)> {
                vec![ $(($key, &self.$field)),+ ]
            }
        }
    };
}

category_metrics!(C1Metrics {
    complexity_avg => "complexity_avg",
    function_length_avg => "function_length_avg",
    file_size_avg => "file_size_avg",
    coupling_avg => "coupling_avg",
    duplication_rate => "duplication_rate",
});

category_metrics!(C2Metrics {
    type_annotation_coverage => "type_annotation_coverage",
    naming_consistency => "naming_consistency",
    magic_number_ratio => "magic_number_ratio",
    type_strictness => "type_strictness",
    null_safety_score => "null_safety_score",
});

category_metrics!(C3Metrics {
    max_directory_depth => "max_directory_depth",
    avg_module_fanout => "avg_module_fanout",
    circular_dependency_count => "circular_dependency_count",
    avg_import_complexity => "avg_import_complexity",
    dead_export_count => "dead_export_count",
});

category_metrics!(C5Metrics {
    churn_rate => "churn_rate",
    temporal_coupling_pct => "temporal_coupling_pct",
    author_fragmentation => "author_fragmentation",
    commit_stability => "commit_stability",
    hotspot_concentration => "hotspot_concentration",
});

category_metrics!(C6Metrics {
    test_to_code_ratio => "test_to_code_ratio",
    coverage_percent => "coverage_percent",
    test_isolation => "test_isolation",
    assertion_density => "assertion_density",
    test_file_ratio => "test_file_ratio",
});

category_metrics!(C7Metrics {
    task_execution_consistency => "task_execution_consistency",
    code_behavior_comprehension => "code_behavior_comprehension",
    cross_file_navigation => "cross_file_navigation",
    identifier_interpretability => "identifier_interpretability",
    documentation_accuracy_detection => "documentation_accuracy_detection",
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CategoryMetrics {
    C1(C1Metrics),
    C2(C2Metrics),
    C3(C3Metrics),
    C5(C5Metrics),
    C6(C6Metrics),
    C7(C7Metrics),
}

impl CategoryMetrics {
    pub fn named(&self) -> Vec<(&'static str, &RawMetric)> {
        match self {
            CategoryMetrics::C1(m) => m.named(),
            CategoryMetrics::C2(m) => m.named(),
            CategoryMetrics::C3(m) => m.named(),
            CategoryMetrics::C5(m) => m.named(),
            CategoryMetrics::C6(m) => m.named(),
            CategoryMetrics::C7(m) => m.named(),
        }
    }

    /// Every metric name has an entry, possibly empty -- this is the hard
    /// evidence-map invariant spec.md §4.2 asserts for all seven
    /// categories.
    pub fn evidence_map(&self) -> BTreeMap<String, Vec<EvidenceItem>> {
        self.named()
            .into_iter()
            .map(|(name, metric)| (name.to_string(), metric.evidence.clone()))
            .collect()
    }
}

/// One analyzer's output. Always produced, even on internal failure --
/// failure shows up as every contained `RawMetric` being unavailable, not
/// as a missing `AnalysisResult`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub name: String,
    pub category: Category,
    pub metrics: CategoryMetrics,
}

/// Shared contract for the five static analyzers (C1/C2/C3/C5/C6). C7 has
/// its own richer entry point (see `c7::C7Analyzer`) since it is async and
/// stateful (executor, debug dir); it is driven separately by the
/// pipeline rather than through this trait.
pub trait Analyzer: Send + Sync {
    fn name(&self) -> &'static str;
    fn category(&self) -> Category;
    fn analyze(&self, targets: &[AnalysisTarget], provider: &dyn SyntaxProvider) -> AnalysisResult;

    /// Optional capability interface the pipeline probes at runtime (spec.md
    /// §9's "optional capability interface" pattern). No analyzer in this
    /// implementation overrides it: there is no typed Go-package provider
    /// distinct from the tree-sitter `SyntaxProvider` every analyzer already
    /// receives, so the hook is a documented no-op (see DESIGN.md).
    fn as_go_aware(&self) -> Option<&dyn GoAware> {
        None
    }
}

/// Capability an analyzer may implement to receive parsed Go package data
/// ahead of richer Go-specific analysis. Kept as a marker contract per
/// spec.md §4.1/§9; no analyzer here implements it (see DESIGN.md).
pub trait GoAware {
    fn set_go_packages(&mut self, packages: Vec<String>);
}

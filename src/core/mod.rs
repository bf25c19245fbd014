//! Shared data model: analysis targets, evidence, and the polymorphic
//! per-category metric shapes that flow from analyzers into the scorer.

mod target;

pub use target::{build_targets, AnalysisTarget, SourceFile};

use serde::{Deserialize, Serialize};

/// A pointer to a specific offending location contributing to a metric
/// value. Always present as a (possibly empty) list on every metric --
/// empty means "no violations found", never "unknown".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvidenceItem {
    pub file_path: String,
    pub line: Option<usize>,
    pub value: f64,
    pub description: String,
}

/// Summary of a numeric distribution across a category's evaluated
/// entities (functions, files, packages).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricSummary {
    pub avg: f64,
    pub max: f64,
    pub max_entity: String,
    pub p95: Option<f64>,
}

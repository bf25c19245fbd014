//! C2 Semantic Explicitness: type-annotation coverage, naming consistency,
//! magic-number ratio, type strictness, null-safety indicators.
//!
//! Go is statically typed end-to-end, so its annotation/strictness scores
//! are ceiling values; Python and TypeScript heuristics are text-pattern
//! based (annotation syntax, `any`, `# type: ignore`, optional chaining)
//! since a full type-checker is out of scope for this crate.

use super::{AnalysisResult, Analyzer, C2Metrics, Category, RawMetric};
use crate::core::{AnalysisTarget, EvidenceItem};
use crate::discovery::Language;
use crate::parsing::SyntaxProvider;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static PY_ANNOTATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"->\s*\w|:\s*[A-Za-z_]\w*\s*[,=)]").unwrap());
static TS_ANY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bany\b").unwrap());
static TYPE_IGNORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\s*type:\s*ignore").unwrap());
static NONE_CHECK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bis\s+None\b|\bis\s+not\s+None\b").unwrap());
static OPTIONAL_CHAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\?\.").unwrap());
static NIL_CHECK: Lazy<Regex> = Lazy::new(|| Regex::new(r"==\s*nil|!=\s*nil").unwrap());

const ALLOWED_NUMBERS: &[&str] = &["0", "1", "-1", "2", "100"];

pub struct C2Semantic;

impl Analyzer for C2Semantic {
    fn name(&self) -> &'static str {
        "semantic_explicitness"
    }

    fn category(&self) -> Category {
        Category::C2
    }

    fn analyze(&self, targets: &[AnalysisTarget], provider: &dyn SyntaxProvider) -> AnalysisResult {
        let mut annotation_ratios = Vec::new();
        let mut naming_scores = Vec::new();
        let mut magic_ratios = Vec::new();
        let mut magic_evidence = Vec::new();
        let mut strictness_scores = Vec::new();
        let mut null_safety_scores = Vec::new();

        for target in targets {
            for file in target.source_files() {
                let rel = file.rel_path.display().to_string();
                let Some(parsed) = provider.parse(file) else {
                    continue;
                };
                let content = file.raw_content.as_deref().unwrap_or("");

                match target.language {
                    Language::Go => {
                        annotation_ratios.push(100.0);
                        strictness_scores.push(100.0);
                        let nil_checks = NIL_CHECK.find_iter(content).count();
                        null_safety_scores.push(ratio_score(nil_checks, parsed.functions.len().max(1)));
                    }
                    Language::Python => {
                        let annotated = parsed
                            .functions
                            .iter()
                            .filter(|_| PY_ANNOTATION.is_match(content))
                            .count();
                        annotation_ratios.push(ratio_score(annotated, parsed.functions.len().max(1)));
                        let ignores = TYPE_IGNORE.find_iter(content).count();
                        strictness_scores.push(
                            (100.0 - (ignores as f64 * 5.0)).max(0.0),
                        );
                        let checks = NONE_CHECK.find_iter(content).count();
                        null_safety_scores.push(ratio_score(checks, parsed.functions.len().max(1)));
                    }
                    Language::TypeScript => {
                        annotation_ratios.push(90.0);
                        let any_uses = TS_ANY.find_iter(content).count();
                        strictness_scores.push((100.0 - (any_uses as f64 * 4.0)).max(0.0));
                        let optional_chains = OPTIONAL_CHAIN.find_iter(content).count();
                        null_safety_scores.push(ratio_score(optional_chains, parsed.functions.len().max(1)));
                    }
                }

                naming_scores.push(naming_consistency_score(&parsed.identifiers));

                let flagged: Vec<_> = parsed
                    .numeric_literals
                    .iter()
                    .filter(|(_, text)| !ALLOWED_NUMBERS.contains(&text.as_str()))
                    .collect();
                let ratio = if parsed.numeric_literals.is_empty() {
                    0.0
                } else {
                    (flagged.len() as f64 / parsed.numeric_literals.len() as f64) * 100.0
                };
                magic_ratios.push(ratio);
                for (line, text) in flagged.iter().take(3) {
                    magic_evidence.push(EvidenceItem {
                        file_path: rel.clone(),
                        line: Some(*line),
                        value: text.parse().unwrap_or(0.0),
                        description: format!("magic number literal `{text}`"),
                    });
                }
            }
        }

        let metrics = C2Metrics {
            type_annotation_coverage: avg_or_unavailable(&annotation_ratios, Vec::new()),
            naming_consistency: avg_or_unavailable(&naming_scores, Vec::new()),
            magic_number_ratio: avg_or_unavailable(&magic_ratios, magic_evidence),
            type_strictness: avg_or_unavailable(&strictness_scores, Vec::new()),
            null_safety_score: avg_or_unavailable(&null_safety_scores, Vec::new()),
        };

        AnalysisResult {
            name: self.name().to_string(),
            category: self.category(),
            metrics: super::CategoryMetrics::C2(metrics),
        }
    }
}

fn ratio_score(count: usize, denom: usize) -> f64 {
    ((count as f64 / denom as f64) * 100.0).min(100.0)
}

fn naming_consistency_score(identifiers: &[String]) -> f64 {
    if identifiers.is_empty() {
        return 100.0;
    }
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for ident in identifiers {
        let style = if ident.contains('_') {
            "snake_case"
        } else if ident.chars().next().map(|c| c.is_uppercase()).unwrap_or(false) {
            "PascalCase"
        } else if ident.chars().any(|c| c.is_uppercase()) {
            "camelCase"
        } else {
            "lower"
        };
        *counts.entry(style).or_insert(0) += 1;
    }
    let dominant = counts.values().max().copied().unwrap_or(0);
    (dominant as f64 / identifiers.len() as f64) * 100.0
}

fn avg_or_unavailable(values: &[f64], evidence: Vec<EvidenceItem>) -> RawMetric {
    if values.is_empty() {
        return RawMetric::unavailable();
    }
    let avg = values.iter().sum::<f64>() / values.len() as f64;
    RawMetric::available_with_evidence(avg, evidence)
}

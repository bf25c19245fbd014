//! C3 Architecture: directory depth, module fanout, circular package
//! dependencies, import complexity, dead exports.

use super::{AnalysisResult, Analyzer, C3Metrics, Category, RawMetric};
use crate::core::{AnalysisTarget, EvidenceItem};
use crate::parsing::SyntaxProvider;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

pub struct C3Architecture;

impl Analyzer for C3Architecture {
    fn name(&self) -> &'static str {
        "architecture"
    }

    fn category(&self) -> Category {
        Category::C3
    }

    fn analyze(&self, targets: &[AnalysisTarget], provider: &dyn SyntaxProvider) -> AnalysisResult {
        let mut max_depth = 0usize;
        let mut fanouts = Vec::new();
        let mut import_complexities = Vec::new();
        let mut graph: DiGraph<String, ()> = DiGraph::new();
        let mut node_of: HashMap<String, NodeIndex> = HashMap::new();
        let mut defined_names: HashMap<String, usize> = HashMap::new();
        let mut all_identifiers: HashMap<String, usize> = HashMap::new();
        let mut dead_evidence = Vec::new();

        for target in targets {
            for file in target.source_files() {
                let rel = file.rel_path.display().to_string();
                node_of.entry(rel.clone()).or_insert_with(|| graph.add_node(rel.clone()));
            }
        }

        for target in targets {
            for file in target.source_files() {
                let rel = file.rel_path.display().to_string();
                let Some(parsed) = provider.parse(file) else {
                    continue;
                };

                let depth = parsed.max_directory_depth_hint;
                if depth > max_depth {
                    max_depth = depth;
                }

                let import_count = parsed.imports.len();
                import_complexities.push(import_count as f64);

                let mut edges = 0;
                for other_rel in node_of.keys() {
                    if other_rel == &rel {
                        continue;
                    }
                    let stem = std::path::Path::new(other_rel)
                        .file_stem()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_default();
                    if !stem.is_empty()
                        && parsed.imports.iter().any(|imp| imp.raw.contains(&stem))
                    {
                        graph.add_edge(node_of[&rel], node_of[other_rel], ());
                        edges += 1;
                    }
                }
                fanouts.push(edges as f64);

                for func in &parsed.functions {
                    *defined_names.entry(func.name.clone()).or_insert(0) += 1;
                }
                for ident in &parsed.identifiers {
                    *all_identifiers.entry(ident.clone()).or_insert(0) += 1;
                }
            }
        }

        let circular_groups = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .count();

        let mut dead_export_count = 0usize;
        for (name, defs) in &defined_names {
            if name.starts_with('_') || name == "<anonymous>" {
                continue;
            }
            let references = all_identifiers.get(name).copied().unwrap_or(0);
            // Only the definition occurrence(s) observed, never referenced elsewhere.
            if references <= *defs {
                dead_export_count += 1;
                if dead_evidence.len() < 10 {
                    dead_evidence.push(EvidenceItem {
                        file_path: String::new(),
                        line: None,
                        value: 1.0,
                        description: format!("`{name}` appears unreferenced outside its definition"),
                    });
                }
            }
        }

        let metrics = C3Metrics {
            max_directory_depth: RawMetric::available(max_depth as f64),
            avg_module_fanout: avg_or_unavailable(&fanouts),
            circular_dependency_count: RawMetric::available(circular_groups as f64),
            avg_import_complexity: avg_or_unavailable(&import_complexities),
            dead_export_count: RawMetric::available_with_evidence(
                dead_export_count as f64,
                dead_evidence,
            ),
        };

        AnalysisResult {
            name: self.name().to_string(),
            category: self.category(),
            metrics: super::CategoryMetrics::C3(metrics),
        }
    }
}

fn avg_or_unavailable(values: &[f64]) -> RawMetric {
    if values.is_empty() {
        return RawMetric::unavailable();
    }
    RawMetric::available(values.iter().sum::<f64>() / values.len() as f64)
}

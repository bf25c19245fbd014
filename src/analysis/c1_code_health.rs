//! C1 Code Health: cyclomatic complexity, function length, file size,
//! coupling, duplication.

use super::{AnalysisResult, Analyzer, C1Metrics, Category, RawMetric};
use crate::core::{AnalysisTarget, EvidenceItem};
use crate::parsing::SyntaxProvider;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};

pub struct C1CodeHealth;

impl Analyzer for C1CodeHealth {
    fn name(&self) -> &'static str {
        "code_health"
    }

    fn category(&self) -> Category {
        Category::C1
    }

    fn analyze(&self, targets: &[AnalysisTarget], provider: &dyn SyntaxProvider) -> AnalysisResult {
        let mut complexities = Vec::new();
        let mut complexity_evidence = Vec::new();
        let mut lengths = Vec::new();
        let mut length_evidence = Vec::new();
        let mut file_sizes = Vec::new();
        let mut file_size_evidence = Vec::new();
        let mut import_counts: HashMap<String, HashSet<String>> = HashMap::new();
        let mut hashes: HashMap<u64, Vec<String>> = HashMap::new();
        let mut total_lines = 0usize;
        let mut duplicated_lines = 0usize;

        for target in targets {
            for file in target.source_files() {
                let rel = file.rel_path.display().to_string();
                let Some(parsed) = provider.parse(file) else {
                    continue;
                };

                let line_count = file.line_count.unwrap_or(0);
                file_sizes.push(line_count as f64);
                if line_count > 400 {
                    file_size_evidence.push(EvidenceItem {
                        file_path: rel.clone(),
                        line: None,
                        value: line_count as f64,
                        description: format!("file has {line_count} lines"),
                    });
                }

                for func in &parsed.functions {
                    complexities.push(func.cyclomatic_complexity as f64);
                    if func.cyclomatic_complexity > 10 {
                        complexity_evidence.push(EvidenceItem {
                            file_path: rel.clone(),
                            line: Some(func.start_line),
                            value: func.cyclomatic_complexity as f64,
                            description: format!(
                                "{} has cyclomatic complexity {}",
                                func.name, func.cyclomatic_complexity
                            ),
                        });
                    }

                    lengths.push(func.length as f64);
                    if func.length > 60 {
                        length_evidence.push(EvidenceItem {
                            file_path: rel.clone(),
                            line: Some(func.start_line),
                            value: func.length as f64,
                            description: format!("{} is {} lines long", func.name, func.length),
                        });
                    }
                }

                let imports: HashSet<String> =
                    parsed.imports.iter().map(|i| i.raw.clone()).collect();
                import_counts.insert(rel.clone(), imports);

                if let Some(content) = &file.raw_content {
                    total_lines += content.lines().count();
                    for window in content.lines().collect::<Vec<_>>().windows(6) {
                        if window.iter().all(|l| l.trim().len() > 4) {
                            let mut hasher = Sha256::new();
                            hasher.update(window.join("\n"));
                            let digest: [u8; 32] = hasher.finalize().into();
                            let key = u64::from_le_bytes(digest[0..8].try_into().unwrap());
                            hashes.entry(key).or_default().push(rel.clone());
                        }
                    }
                }
            }
        }

        for (key, files) in &hashes {
            if files.len() > 1 {
                duplicated_lines += 6 * (files.len() - 1);
                let _ = key;
            }
        }

        let duplication_rate = if total_lines > 0 {
            ((duplicated_lines as f64 / total_lines as f64) * 100.0).min(100.0)
        } else {
            0.0
        };

        let coupling_values: Vec<f64> = import_counts.values().map(|s| s.len() as f64).collect();

        let metrics = C1Metrics {
            complexity_avg: avg_metric(&complexities, complexity_evidence),
            function_length_avg: avg_metric(&lengths, length_evidence),
            file_size_avg: avg_metric(&file_sizes, file_size_evidence),
            coupling_avg: avg_metric(&coupling_values, Vec::new()),
            duplication_rate: if total_lines == 0 {
                RawMetric::unavailable()
            } else {
                RawMetric::available(duplication_rate)
            },
        };

        AnalysisResult {
            name: self.name().to_string(),
            category: self.category(),
            metrics: super::CategoryMetrics::C1(metrics),
        }
    }
}

fn avg_metric(values: &[f64], evidence: Vec<EvidenceItem>) -> RawMetric {
    if values.is_empty() {
        return RawMetric::unavailable();
    }
    let avg = values.iter().sum::<f64>() / values.len() as f64;
    RawMetric::available_with_evidence(avg, evidence)
}

//! Sample selection: choose 1-5 concrete code locations per metric, ranked
//! by a deterministic `SelectionScore` (file size × complexity proxy,
//! descending), stable-sorted so sample indices reproduce across runs.

use crate::core::AnalysisTarget;
use crate::parsing::SyntaxProvider;

#[derive(Debug, Clone)]
pub struct Sample {
    pub file_path: String,
    pub function_name: Option<String>,
    pub selection_score: f64,
    pub snippet: String,
}

const MAX_SAMPLES: usize = 5;

/// Rank every source file's largest function by `size * complexity` and
/// keep the top `MAX_SAMPLES`. A stable sort on a pre-computed score
/// guarantees sample index `i` names the same location across runs given
/// the same targets.
pub fn select_samples(targets: &[AnalysisTarget], provider: &dyn SyntaxProvider) -> Vec<Sample> {
    let mut candidates = Vec::new();

    for target in targets {
        for file in target.source_files() {
            let Some(parsed) = provider.parse(file) else {
                continue;
            };
            let Some(content) = &file.raw_content else {
                continue;
            };
            let Some(biggest) = parsed
                .functions
                .iter()
                .max_by(|a, b| {
                    let score_a = a.length as f64 * a.cyclomatic_complexity as f64;
                    let score_b = b.length as f64 * b.cyclomatic_complexity as f64;
                    score_a.partial_cmp(&score_b).unwrap_or(std::cmp::Ordering::Equal)
                })
            else {
                continue;
            };

            let selection_score = biggest.length as f64 * biggest.cyclomatic_complexity as f64;
            let lines: Vec<&str> = content.lines().collect();
            let start = biggest.start_line.saturating_sub(1).min(lines.len());
            let end = biggest.end_line.min(lines.len());
            let snippet = lines[start..end].join("\n");

            candidates.push(Sample {
                file_path: file.rel_path.display().to_string(),
                function_name: Some(biggest.name.clone()),
                selection_score,
                snippet,
            });
        }
    }

    candidates.sort_by(|a, b| {
        b.selection_score
            .partial_cmp(&a.selection_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.file_path.cmp(&b.file_path))
    });
    candidates.truncate(MAX_SAMPLES);
    candidates
}

//! C6 Testing: test-to-code LOC ratio, coverage percent (from `cover.out`,
//! unavailable if missing), test isolation heuristic, assertion density,
//! test-file ratio.

use super::coverage;
use super::{AnalysisResult, Analyzer, C6Metrics, Category, RawMetric};
use crate::core::AnalysisTarget;
use crate::parsing::SyntaxProvider;
use once_cell::sync::Lazy;
use regex::Regex;

static ASSERTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bassert\w*\s*\(|\.should\(|\bexpect\(|\.Equal\(|\.True\(|\.False\(").unwrap()
});
static MOCK_OR_FIXTURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bmock\w*|\bfixture\w*|setUp|tearDown").unwrap());

pub struct C6Testing;

impl Analyzer for C6Testing {
    fn name(&self) -> &'static str {
        "testing"
    }

    fn category(&self) -> Category {
        Category::C6
    }

    fn analyze(&self, targets: &[AnalysisTarget], _provider: &dyn SyntaxProvider) -> AnalysisResult {
        let mut source_lines = 0usize;
        let mut test_lines = 0usize;
        let mut source_file_count = 0usize;
        let mut test_file_count = 0usize;
        let mut assertion_counts = Vec::new();
        let mut isolation_scores = Vec::new();

        for target in targets {
            for file in &target.files {
                match file.class {
                    crate::discovery::FileClass::Source => {
                        source_file_count += 1;
                        source_lines += file.line_count.unwrap_or(0);
                    }
                    crate::discovery::FileClass::Test => {
                        test_file_count += 1;
                        test_lines += file.line_count.unwrap_or(0);
                        let content = file.raw_content.as_deref().unwrap_or("");
                        let assertions = ASSERTION.find_iter(content).count();
                        let lines = file.line_count.unwrap_or(1).max(1);
                        assertion_counts.push((assertions as f64 / lines as f64) * 1000.0);

                        let has_isolation_markers = MOCK_OR_FIXTURE.is_match(content);
                        isolation_scores.push(if has_isolation_markers { 100.0 } else { 40.0 });
                    }
                    _ => {}
                }
            }
        }

        let test_to_code_ratio = if source_lines == 0 {
            RawMetric::unavailable()
        } else {
            RawMetric::available((test_lines as f64 / source_lines as f64) * 100.0)
        };

        let test_file_ratio = if source_file_count + test_file_count == 0 {
            RawMetric::unavailable()
        } else {
            RawMetric::available(
                (test_file_count as f64 / (source_file_count + test_file_count) as f64) * 100.0,
            )
        };

        let root = targets
            .first()
            .map(|t| t.root_dir.clone())
            .unwrap_or_default();
        let coverage_percent = match coverage::load_cover_out(&root).and_then(|t| t.percent()) {
            Some(pct) => RawMetric::available(pct),
            None => RawMetric::unavailable(),
        };

        let metrics = C6Metrics {
            test_to_code_ratio,
            coverage_percent,
            test_isolation: avg_or_unavailable(&isolation_scores),
            assertion_density: avg_or_unavailable(&assertion_counts),
            test_file_ratio,
        };

        AnalysisResult {
            name: self.name().to_string(),
            category: self.category(),
            metrics: super::CategoryMetrics::C6(metrics),
        }
    }
}

fn avg_or_unavailable(values: &[f64]) -> RawMetric {
    if values.is_empty() {
        return RawMetric::unavailable();
    }
    RawMetric::available(values.iter().sum::<f64>() / values.len() as f64)
}

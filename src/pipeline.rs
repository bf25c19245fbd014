//! Pipeline orchestrator: discovery → parsing → analysis → scoring →
//! recommendation + rendering (spec.md §4).
//!
//! The five static analyzers (C1/C2/C3/C5/C6) run concurrently on rayon's
//! thread pool, joined with mutex-guarded result collection; C7 runs on a
//! tokio runtime since it drives async subprocess I/O. Every other stage is
//! serial, matching spec.md §5's scheduling model.

use crate::analysis::{
    c1_code_health::C1CodeHealth, c2_semantic::C2Semantic, c3_architecture::C3Architecture,
    c5_temporal::C5Temporal, c6_testing::C6Testing, c7, Analyzer, AnalysisResult,
};
use crate::config::{C7Config, ScoringConfig};
use crate::core::build_targets;
use crate::discovery;
use crate::errors::Result;
use crate::observability::{ProgressEvent, ProgressReporter, Stage};
use crate::parsing::TreeSitterProvider;
use crate::recommend::{self, Recommendation};
use crate::report::{self, Report};
use crate::scoring::aggregate::{self, ScoredResult};
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

pub struct PipelineOptions {
    pub scoring_config: ScoringConfig,
    pub c7_config: C7Config,
    pub c7_executor: Option<Arc<dyn c7::executor::Executor>>,
    pub c7_debug_sink: Arc<dyn c7::debug::DebugSink>,
    pub progress: ProgressReporter,
}

pub struct PipelineOutcome {
    pub scored: ScoredResult,
    pub recommendations: Vec<Recommendation>,
    pub report: Report,
}

/// Run the full pipeline against `root`. Discovery errors are fatal;
/// analyzer panics degrade to a missing category rather than aborting the
/// run (spec.md §7).
pub async fn run(root: &Path, options: PipelineOptions) -> Result<PipelineOutcome> {
    let PipelineOptions { scoring_config, c7_config, c7_executor, c7_debug_sink, progress } = options;

    (progress)(ProgressEvent { stage: Stage::Discover, detail: root.display().to_string() });
    let scan = discovery::discover(root)?;
    let targets = build_targets(root, &scan);

    (progress)(ProgressEvent { stage: Stage::Parse, detail: format!("{} targets", targets.len()) });
    let provider = TreeSitterProvider;

    (progress)(ProgressEvent { stage: Stage::Analyze, detail: "running analyzers".to_string() });
    let results: Arc<Mutex<Vec<AnalysisResult>>> = Arc::new(Mutex::new(Vec::new()));
    run_static_analyzers(&targets, &provider, &results);

    let c7_result = match c7_executor {
        Some(executor) => {
            let analyzer = c7::C7Analyzer {
                executor,
                config: c7_config,
                debug_sink: c7_debug_sink,
            };
            analyzer.run(&targets).await
        }
        None => c7::disabled_result(),
    };
    results.lock().push(c7_result);

    let mut results = Arc::try_unwrap(results).expect("analyzers joined").into_inner();
    // Deterministic ordering by category name before scoring (spec.md §5).
    results.sort_by_key(|r| r.category.config_key());

    (progress)(ProgressEvent { stage: Stage::Score, detail: String::new() });
    let scored = aggregate::score(&results, &scoring_config);
    let recommendations = recommend::generate(&scored, &scoring_config);

    (progress)(ProgressEvent { stage: Stage::Render, detail: String::new() });
    let report = report::build_report(&scored, &recommendations);

    Ok(PipelineOutcome { scored, recommendations, report })
}

/// Run C1/C2/C3/C5/C6 concurrently on rayon's pool. A panicking analyzer
/// is logged and simply contributes no `AnalysisResult`; its category's
/// weight is redistributed by the scorer rather than aborting the scan.
fn run_static_analyzers(
    targets: &[crate::core::AnalysisTarget],
    provider: &TreeSitterProvider,
    results: &Arc<Mutex<Vec<AnalysisResult>>>,
) {
    let analyzers: Vec<Box<dyn Analyzer>> = vec![
        Box::new(C1CodeHealth),
        Box::new(C2Semantic),
        Box::new(C3Architecture),
        Box::new(C5Temporal),
        Box::new(C6Testing),
    ];

    rayon::scope(|scope| {
        for analyzer in &analyzers {
            let results = results.clone();
            scope.spawn(move |_| {
                let outcome = catch_unwind(AssertUnwindSafe(|| analyzer.analyze(targets, provider)));
                match outcome {
                    Ok(result) => results.lock().push(result),
                    Err(payload) => {
                        let message = crate::observability::extract_thread_panic_message(&payload);
                        tracing::warn!(analyzer = analyzer.name(), "analyzer panicked: {message}");
                    }
                }
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::observability::default_reporter;
    use std::io::Write;
    use tempfile::tempdir;

    #[tokio::test]
    async fn empty_directory_is_a_fatal_error() {
        let dir = tempdir().unwrap();
        let options = PipelineOptions {
            scoring_config: ScoringConfig::default_config(),
            c7_config: C7Config::from_scoring(&Default::default(), dir.path().to_path_buf(), None, false),
            c7_executor: None,
            c7_debug_sink: Arc::new(c7::debug::NullDebugSink),
            progress: default_reporter(),
        };
        let result = run(dir.path(), options).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn single_go_file_scores_without_c7() {
        let dir = tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join("main.go")).unwrap();
        writeln!(file, "package main\n\nfunc main() {{}}\n").unwrap();

        let options = PipelineOptions {
            scoring_config: ScoringConfig::default_config(),
            c7_config: C7Config::from_scoring(&Default::default(), dir.path().to_path_buf(), None, false),
            c7_executor: None,
            c7_debug_sink: Arc::new(c7::debug::NullDebugSink),
            progress: default_reporter(),
        };
        let outcome = run(dir.path(), options).await.unwrap();
        assert!(outcome.scored.composite >= 1.0);
        assert!(outcome.scored.categories.iter().any(|c| c.name == "C1"));
    }
}

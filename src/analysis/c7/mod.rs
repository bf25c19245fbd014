//! C7 Agent Evaluation: drives an external LLM CLI subprocess to measure
//! whether an autonomous agent can perform five MECE capability tasks
//! (M1-M5) against the scanned repository.
//!
//! This is the only analyzer not implemented against the synchronous
//! [`Analyzer`](super::Analyzer) trait: it owns an [`Executor`], runs its
//! five metrics concurrently on a tokio runtime, accumulates token/cost
//! totals under a mutex, and optionally persists or replays debug
//! records. The pipeline drives it through [`C7Analyzer::run`] instead of
//! through the shared analyzer trait.

pub mod cost;
pub mod debug;
pub mod executor;
pub mod metrics;
pub mod sample;
pub mod scoring_trace;

use super::{AnalysisResult, C7Metrics, Category, CategoryMetrics, RawMetric};
use crate::config::C7Config;
use crate::core::{AnalysisTarget, EvidenceItem};
use cost::CostAccumulator;
use debug::{DebugResponse, DebugSink};
use executor::Executor;
use metrics::{MetricId, MetricOutcome};
use parking_lot::Mutex;
use std::sync::Arc;

pub struct C7Analyzer {
    pub executor: Arc<dyn Executor>,
    pub config: C7Config,
    pub debug_sink: Arc<dyn DebugSink>,
}

impl C7Analyzer {
    /// Run all five metrics concurrently and fold them into one
    /// `AnalysisResult`. `Available=false` on the whole category iff no
    /// executor is configured -- callers should construct a disabled
    /// [`C7Analyzer`] (see `executor::disabled`) rather than calling this
    /// at all in that case, but `run` still degrades gracefully.
    pub async fn run(&self, targets: &[AnalysisTarget]) -> AnalysisResult {
        let cost = Arc::new(CostAccumulator::default());
        let debug_samples: Arc<Mutex<Vec<debug::C7DebugSample>>> = Arc::new(Mutex::new(Vec::new()));

        let ids = [
            MetricId::M1,
            MetricId::M2,
            MetricId::M3,
            MetricId::M4,
            MetricId::M5,
        ];

        // At most `max_parallel` metrics run at once (spec.md §4.4.2:
        // "parallel tasks, at most N (configurable; default unlimited up to
        // 5)"). `ids.len()` is always 5, so this only ever throttles, never
        // expands, concurrency.
        let semaphore = Arc::new(tokio::sync::Semaphore::new(self.config.max_parallel.max(1)));

        let mut handles = Vec::new();
        for id in ids {
            let executor = self.executor.clone();
            let config = self.config.clone();
            let targets = targets.to_vec();
            let cost = cost.clone();
            let debug_samples = debug_samples.clone();
            let semaphore = semaphore.clone();
            handles.push((
                id,
                tokio::spawn(async move {
                    let _permit = semaphore.acquire_owned().await.expect("semaphore never closed");
                    metrics::run_metric(id, &executor, &config, &targets, &cost, &debug_samples).await
                }),
            ));
        }

        let mut outcomes: Vec<MetricOutcome> = Vec::new();
        for (id, handle) in handles {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(join_err) => outcomes.push(MetricOutcome::cancelled_from_join(id, join_err)),
            }
        }
        outcomes.sort_by_key(|o| o.id as u8);

        // Persistence happens only after every metric's errgroup-equivalent
        // join completes, never during parallel execution, to avoid
        // interleaved writes (spec.md §4.4.5). Persistence triggers on
        // `debug_dir` being set and this not being a replay run -- it is
        // independent of whether `--debug-c7`'s human-readable sink is also
        // active (spec.md §4.4.5: "a single option `debugDir` controls both
        // modes; there is no separate replay flag").
        for sample in debug_samples.lock().iter() {
            self.debug_sink.record(sample);
        }
        if let Some(dir) = &self.config.debug_dir {
            if !self.config.is_replay {
                for sample in debug_samples.lock().iter() {
                    let record = DebugResponse::from_sample(sample);
                    if let Err(e) = debug::persist(dir, &record) {
                        tracing::warn!("failed to persist C7 debug sample: {e}");
                    }
                }
            }
        }

        let cost_usd = cost.cost_usd(self.config.blended_rate_usd_per_mtok);
        tracing::info!(
            tokens = cost.totals().tokens,
            cost_usd,
            "C7 agent-evaluation token/cost total"
        );

        let metrics = C7Metrics {
            task_execution_consistency: outcome_to_raw(&outcomes, MetricId::M1),
            code_behavior_comprehension: outcome_to_raw(&outcomes, MetricId::M2),
            cross_file_navigation: outcome_to_raw(&outcomes, MetricId::M3),
            identifier_interpretability: outcome_to_raw(&outcomes, MetricId::M4),
            documentation_accuracy_detection: outcome_to_raw(&outcomes, MetricId::M5),
        };

        AnalysisResult {
            name: "agent_evaluation".to_string(),
            category: Category::C7,
            metrics: CategoryMetrics::C7(metrics),
        }
    }
}

/// The C7 result produced when no executor is wired in at all -- `--no-llm`
/// or a missing `ANTHROPIC_API_KEY` (spec.md §6: "Absence disables
/// LLM-dependent paths cleanly"). Every metric is unavailable rather than
/// the category being omitted, so the evidence-map invariant still holds.
pub fn disabled_result() -> AnalysisResult {
    AnalysisResult {
        name: "agent_evaluation".to_string(),
        category: Category::C7,
        metrics: CategoryMetrics::C7(C7Metrics::default()),
    }
}

fn outcome_to_raw(outcomes: &[MetricOutcome], id: MetricId) -> RawMetric {
    match outcomes.iter().find(|o| o.id == id) {
        Some(outcome) if outcome.score.is_some() => RawMetric::available_with_evidence(
            outcome.score.unwrap(),
            outcome
                .samples
                .iter()
                .map(|s| EvidenceItem {
                    file_path: s.file_path.clone(),
                    line: None,
                    value: s.score.unwrap_or(0.0),
                    description: s.description.clone(),
                })
                .collect(),
        ),
        _ => RawMetric::unavailable(),
    }
}

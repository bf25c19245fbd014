//! The five MECE metrics (M1-M5) and their parallel execution.

mod m1_consistency;
mod m2_comprehension;
mod m3_navigation;
mod m4_identifier;
mod m5_doc_accuracy;

use super::cost::CostAccumulator;
use super::debug::C7DebugSample;
use super::executor::{Executor, ExecutorError};
use super::sample::{select_samples, Sample};
use crate::analysis::c7::scoring_trace::ScoreTrace;
use crate::config::C7Config;
use crate::core::AnalysisTarget;
use crate::parsing::TreeSitterProvider;
use parking_lot::Mutex;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricId {
    M1,
    M2,
    M3,
    M4,
    M5,
}

impl MetricId {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricId::M1 => "task_execution_consistency",
            MetricId::M2 => "code_behavior_comprehension",
            MetricId::M3 => "cross_file_navigation",
            MetricId::M4 => "identifier_interpretability",
            MetricId::M5 => "documentation_accuracy_detection",
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            MetricId::M1 => 0.20,
            MetricId::M2 => 0.25,
            MetricId::M3 => 0.25,
            MetricId::M4 => 0.15,
            MetricId::M5 => 0.15,
        }
    }
}

impl std::convert::From<MetricId> for u8 {
    fn from(id: MetricId) -> u8 {
        match id {
            MetricId::M1 => 1,
            MetricId::M2 => 2,
            MetricId::M3 => 3,
            MetricId::M4 => 4,
            MetricId::M5 => 5,
        }
    }
}

pub struct MetricOutcome {
    pub id: MetricId,
    pub score: Option<f64>,
    pub samples: Vec<SampleOutcome>,
}

#[derive(Clone)]
pub struct SampleOutcome {
    pub file_path: String,
    pub score: Option<f64>,
    pub description: String,
}

impl MetricOutcome {
    pub fn cancelled_from_join(id: MetricId, _join_err: tokio::task::JoinError) -> Self {
        MetricOutcome {
            id,
            score: None,
            samples: Vec::new(),
        }
    }
}

/// One sample's scored execution: the response, duration, optional error,
/// and the score/trace produced by the metric-specific scorer.
pub struct Execution {
    pub sample: Sample,
    pub response: Option<String>,
    pub duration_sec: f64,
    pub error: Option<String>,
    pub score: Option<f64>,
    pub trace: Option<ScoreTrace>,
}

async fn execute_sample(
    executor: &dyn Executor,
    sample: &Sample,
    prompt: &str,
    allowed_tools: &[&str],
    timeout: Duration,
    work_dir: &Path,
    cost: &CostAccumulator,
) -> Execution {
    match executor
        .execute_prompt(work_dir, prompt, allowed_tools, timeout)
        .await
    {
        Ok(outcome) => {
            cost.add_tokens(outcome.tokens_estimated);
            Execution {
                sample: sample.clone(),
                response: Some(outcome.response),
                duration_sec: outcome.duration.as_secs_f64(),
                error: None,
                score: None,
                trace: None,
            }
        }
        Err(err) => Execution {
            sample: sample.clone(),
            response: None,
            duration_sec: 0.0,
            error: Some(describe_error(&err)),
            score: None,
            trace: None,
        },
    }
}

fn describe_error(err: &ExecutorError) -> String {
    err.to_string()
}

/// Run one metric end to end: select samples, execute, score, aggregate,
/// and push debug samples into the shared collector. Cancellation
/// (timeout or join failure) surfaces as `score: None` with the
/// cancellation cause recorded on whatever samples did complete.
pub async fn run_metric(
    id: MetricId,
    executor: &std::sync::Arc<dyn Executor>,
    config: &C7Config,
    targets: &[AnalysisTarget],
    cost: &CostAccumulator,
    debug_samples: &std::sync::Arc<Mutex<Vec<C7DebugSample>>>,
) -> MetricOutcome {
    let provider = TreeSitterProvider;
    let samples = select_samples(targets, &provider);
    let timeout = Duration::from_secs(config.per_prompt_timeout_secs);
    let work_dir = config.sandbox_dir.clone();

    let (score, sample_outcomes, debug) = match id {
        MetricId::M1 => {
            m1_consistency::run(executor.as_ref(), &samples, timeout, &work_dir, cost, config).await
        }
        MetricId::M2 => {
            m2_comprehension::run(executor.as_ref(), &samples, timeout, &work_dir, cost).await
        }
        MetricId::M3 => {
            m3_navigation::run(executor.as_ref(), &samples, timeout, &work_dir, cost).await
        }
        MetricId::M4 => {
            m4_identifier::run(executor.as_ref(), &samples, timeout, &work_dir, cost).await
        }
        MetricId::M5 => {
            m5_doc_accuracy::run(executor.as_ref(), &samples, timeout, &work_dir, cost).await
        }
    };

    debug_samples.lock().extend(debug.into_iter().enumerate().map(|(idx, mut d)| {
        d.metric_id = id.as_str().to_string();
        d.sample_index = idx;
        d
    }));

    MetricOutcome {
        id,
        score,
        samples: sample_outcomes,
    }
}

//! M1: task_execution_consistency. Runs the *same* prompt three times and
//! scores inversely proportional to the variance across the three
//! resulting scores (spec.md §4.4.4). Because the prompt repeats
//! verbatim, the replay system must store three separate records
//! (indices 0, 1, 2); a replay run therefore always reports zero
//! variance, which is expected, not a bug.

use super::{execute_sample, Execution, SampleOutcome};
use crate::analysis::c7::cost::CostAccumulator;
use crate::analysis::c7::debug::C7DebugSample;
use crate::analysis::c7::executor::Executor;
use crate::analysis::c7::sample::Sample;
use crate::analysis::c7::scoring_trace::{coherence_base, score_with_indicators, Indicator};
use crate::config::C7Config;
use crate::scoring::interpolate::interpolate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::time::Duration;

static POSITIVE: Lazy<Vec<Indicator>> = Lazy::new(|| {
    vec![Indicator {
        name: "lists_identifiers",
        pattern: Regex::new(r"(?i)(function|def|func)\s+\w+").unwrap(),
        delta: 2,
    }]
});

static NEGATIVE: Lazy<Vec<Indicator>> = Lazy::new(|| {
    vec![Indicator {
        name: "refuses_or_errors",
        pattern: Regex::new(r"(?i)(cannot complete|unable to)").unwrap(),
        delta: -2,
    }]
});

fn build_prompt(sample: &Sample) -> String {
    format!(
        "List the names of every function defined in `{}`, one per line.\n\n{}",
        sample.file_path, sample.snippet
    )
}

pub async fn run(
    executor: &dyn Executor,
    samples: &[Sample],
    timeout: Duration,
    work_dir: &Path,
    cost: &CostAccumulator,
    config: &C7Config,
) -> (Option<f64>, Vec<SampleOutcome>, Vec<C7DebugSample>) {
    let Some(sample) = samples.first() else {
        return (None, Vec::new(), Vec::new());
    };

    let prompt = build_prompt(sample);
    let mut per_run_scores = Vec::new();
    let mut outcomes = Vec::new();
    let mut debug = Vec::new();

    for _run_index in 0..3 {
        let exec: Execution =
            execute_sample(executor, sample, &prompt, &["Read"], timeout, work_dir, cost).await;

        let (score, trace) = match &exec.response {
            Some(response) => {
                let trace =
                    score_with_indicators(response, coherence_base(response), &POSITIVE, &NEGATIVE);
                (Some(trace.final_score), Some(trace))
            }
            None => (None, None),
        };

        debug.push(C7DebugSample {
            metric_id: String::new(),
            sample_index: 0,
            file_path: sample.file_path.clone(),
            description: "repeat-run consistency probe".to_string(),
            prompt: prompt.clone(),
            response: exec.response.unwrap_or_default(),
            score,
            duration_sec: exec.duration_sec,
            score_trace: trace,
            error: exec.error,
        });

        if let Some(s) = score {
            per_run_scores.push(s);
        }
    }

    let aggregate = if per_run_scores.is_empty() {
        None
    } else if per_run_scores.len() < 3 {
        // Flagged in the debug trace already via fewer recorded samples;
        // score with whatever survived (spec.md §4.4.6).
        Some(variance_to_score(&per_run_scores, config))
    } else {
        Some(variance_to_score(&per_run_scores, config))
    };

    outcomes.push(SampleOutcome {
        file_path: sample.file_path.clone(),
        score: aggregate,
        description: format!("task_execution_consistency on {}", sample.file_path),
    });

    (aggregate, outcomes, debug)
}

fn variance(scores: &[f64]) -> f64 {
    if scores.len() < 2 {
        return 0.0;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / scores.len() as f64
}

fn variance_to_score(scores: &[f64], config: &C7Config) -> f64 {
    let var = variance(scores);
    interpolate(&config.variance_breakpoints, var)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_scores_have_zero_variance() {
        assert_eq!(variance(&[7.0, 7.0, 7.0]), 0.0);
    }
}

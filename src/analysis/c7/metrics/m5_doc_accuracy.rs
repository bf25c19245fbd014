use super::{execute_sample, Execution, SampleOutcome};
use crate::analysis::c7::cost::CostAccumulator;
use crate::analysis::c7::debug::C7DebugSample;
use crate::analysis::c7::executor::Executor;
use crate::analysis::c7::sample::Sample;
use crate::analysis::c7::scoring_trace::{coherence_base, score_with_indicators, Indicator};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::time::Duration;

static POSITIVE: Lazy<Vec<Indicator>> = Lazy::new(|| {
    vec![
        Indicator {
            name: "flags_mismatch_or_confirms_match",
            pattern: Regex::new(r"(?i)(matches the documentation|inconsistent with|docstring (says|claims)|comment (says|claims))").unwrap(),
            delta: 2,
        },
        Indicator {
            name: "cites_specific_line",
            pattern: Regex::new(r"(?i)\bline \d+\b").unwrap(),
            delta: 1,
        },
    ]
});

static NEGATIVE: Lazy<Vec<Indicator>> = Lazy::new(|| {
    vec![Indicator {
        name: "ignores_docs_entirely",
        pattern: Regex::new(r"(?i)(no documentation (was )?(provided|found))").unwrap(),
        delta: -2,
    }]
});

fn build_prompt(sample: &Sample) -> String {
    format!(
        "Compare the doc comment (if any) above `{}` in `{}` against what the code actually does. Report any inconsistency:\n\n{}",
        sample.function_name.as_deref().unwrap_or("<anonymous>"),
        sample.file_path,
        sample.snippet
    )
}

pub async fn run(
    executor: &dyn Executor,
    samples: &[Sample],
    timeout: Duration,
    work_dir: &Path,
    cost: &CostAccumulator,
) -> (Option<f64>, Vec<SampleOutcome>, Vec<C7DebugSample>) {
    let mut scores = Vec::new();
    let mut outcomes = Vec::new();
    let mut debug = Vec::new();

    for sample in samples {
        let prompt = build_prompt(sample);
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

        outcomes.push(SampleOutcome {
            file_path: sample.file_path.clone(),
            score,
            description: format!("documentation_accuracy_detection on {}", sample.file_path),
        });

        debug.push(C7DebugSample {
            metric_id: String::new(),
            sample_index: 0,
            file_path: sample.file_path.clone(),
            description: "detect doc/code inconsistency".to_string(),
            prompt,
            response: exec.response.unwrap_or_default(),
            score,
            duration_sec: exec.duration_sec,
            score_trace: trace,
            error: exec.error,
        });

        if let Some(s) = score {
            scores.push(s);
        }
    }

    let aggregate = if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    };

    (aggregate, outcomes, debug)
}

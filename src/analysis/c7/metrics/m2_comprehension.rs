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
            name: "describes_behavior",
            pattern: Regex::new(r"(?i)this (function|method) (does|performs|computes|returns|handles)").unwrap(),
            delta: 2,
        },
        Indicator {
            name: "mentions_return_value",
            pattern: Regex::new(r"(?i)\breturns?\b").unwrap(),
            delta: 2,
        },
        Indicator {
            name: "mentions_parameters",
            pattern: Regex::new(r"(?i)\b(parameter|argument)s?\b").unwrap(),
            delta: 1,
        },
    ]
});

static NEGATIVE: Lazy<Vec<Indicator>> = Lazy::new(|| {
    vec![
        Indicator {
            name: "vague",
            pattern: Regex::new(r"(?i)(not sure|hard to tell|unclear|i don't know)").unwrap(),
            delta: -2,
        },
        Indicator {
            name: "off_topic",
            pattern: Regex::new(r"(?i)(as an ai language model|i cannot access)").unwrap(),
            delta: -3,
        },
    ]
});

fn build_prompt(sample: &Sample) -> String {
    format!(
        "Explain what the function `{}` in `{}` does, including what it returns:\n\n{}",
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
                let trace = score_with_indicators(response, coherence_base(response), &POSITIVE, &NEGATIVE);
                (Some(trace.final_score), Some(trace))
            }
            None => (None, None),
        };

        outcomes.push(SampleOutcome {
            file_path: sample.file_path.clone(),
            score,
            description: format!("code_behavior_comprehension on {}", sample.file_path),
        });

        debug.push(C7DebugSample {
            metric_id: String::new(),
            sample_index: 0,
            file_path: sample.file_path.clone(),
            description: "explain function behavior".to_string(),
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

//! Heuristic indicator scoring with trace capture (spec.md §4.4.3).
//!
//! Indicators are grouped rather than independent: a base score is chosen
//! by a representative indicator, then positive/negative indicators each
//! nudge the score by a fixed delta. The trace records every indicator
//! that was checked, whether it matched, and its delta, regardless of
//! whether human-readable debug output is enabled -- it is always
//! attached to the debug sample.

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorCheck {
    pub name: String,
    pub matched: bool,
    pub delta: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreTrace {
    pub base_score: f64,
    pub final_score: f64,
    pub indicators: Vec<IndicatorCheck>,
}

pub struct Indicator {
    pub name: &'static str,
    pub pattern: Regex,
    pub delta: i32,
}

/// Apply a base score plus a set of signed indicators to a response,
/// producing the final clamped score and its trace.
/// `final_score = clamp(base_score + sum(matched deltas), 1, 10)`.
pub fn score_with_indicators(
    response: &str,
    base_score: f64,
    positive: &[Indicator],
    negative: &[Indicator],
) -> ScoreTrace {
    let mut indicators = Vec::new();
    let mut total_delta = 0i32;

    for indicator in positive.iter().chain(negative.iter()) {
        let matched = indicator.pattern.is_match(response);
        if matched {
            total_delta += indicator.delta;
        }
        indicators.push(IndicatorCheck {
            name: indicator.name.to_string(),
            matched,
            delta: indicator.delta,
        });
    }

    let final_score = (base_score + total_delta as f64).clamp(1.0, 10.0);

    ScoreTrace {
        base_score,
        final_score,
        indicators,
    }
}

/// Representative "is this response coherent at all" indicator that
/// decides the base score for most M2-M5 scorers: a non-empty, non-trivial
/// response starts at 5, an empty or gibberish one starts at 1.
pub fn coherence_base(response: &str) -> f64 {
    if response.trim().len() < 10 {
        1.0
    } else {
        5.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_one_and_ten() {
        let positive = vec![Indicator {
            name: "always",
            pattern: Regex::new(r".").unwrap(),
            delta: 20,
        }];
        let trace = score_with_indicators("hello world response", 5.0, &positive, &[]);
        assert_eq!(trace.final_score, 10.0);

        let negative = vec![Indicator {
            name: "always",
            pattern: Regex::new(r".").unwrap(),
            delta: -20,
        }];
        let trace = score_with_indicators("hello world response", 5.0, &[], &negative);
        assert_eq!(trace.final_score, 1.0);
    }

    #[test]
    fn trace_matches_final_score_formula() {
        let positive = vec![Indicator {
            name: "mentions_return",
            pattern: Regex::new(r"return").unwrap(),
            delta: 2,
        }];
        let negative = vec![Indicator {
            name: "vague",
            pattern: Regex::new(r"(?i)unclear").unwrap(),
            delta: -1,
        }];
        let trace = score_with_indicators("it will return a value", 5.0, &positive, &negative);
        let matched_sum: i32 = trace
            .indicators
            .iter()
            .filter(|i| i.matched)
            .map(|i| i.delta)
            .sum();
        assert_eq!(trace.final_score, (trace.base_score + matched_sum as f64).clamp(1.0, 10.0));
    }
}

//! Report rendering: terminal, JSON (v2, with v1-compatible loading), and
//! HTML.

pub mod html;
pub mod json;
pub mod terminal;

pub use json::{Report, ReportCategory, ReportSubScore};

use crate::recommend::Recommendation;
use crate::scoring::aggregate::ScoredResult;

/// Assemble the renderer-agnostic report view from a scored result and its
/// recommendations.
pub fn build_report(scored: &ScoredResult, recommendations: &[Recommendation]) -> Report {
    Report {
        version: "2".to_string(),
        composite_score: scored.composite,
        tier: scored.tier.clone(),
        categories: scored
            .categories
            .iter()
            .map(|c| ReportCategory {
                name: c.name.clone(),
                score: c.score,
                weight: c.weight,
                sub_scores: c
                    .sub_scores
                    .iter()
                    .map(|s| ReportSubScore {
                        name: s.metric_name.clone(),
                        raw_value: s.raw_value,
                        score: s.score,
                        weight: s.weight,
                        available: s.available,
                        evidence: s.evidence.clone(),
                    })
                    .collect(),
            })
            .collect(),
        recommendations: recommendations.to_vec(),
    }
}

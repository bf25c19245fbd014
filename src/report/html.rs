//! HTML rendering via an embedded handlebars template, in the style of
//! the report-generator approach used for multi-format output elsewhere in
//! the pack (templates registered once, rendered against the JSON view of
//! the report).

use crate::errors::{AnalysisError, Result};
use crate::report::Report;
use handlebars::{handlebars_helper, Handlebars};
use once_cell::sync::Lazy;

const TEMPLATE_NAME: &str = "report";
const TEMPLATE_SOURCE: &str = include_str!("../../templates/report.html.hbs");

handlebars_helper!(format_score: |score: f64| format!("{:.1}", score));
handlebars_helper!(tier_class: |tier: String| match tier.as_str() {
    "Agent-Ready" => "tier-ready",
    "Agent-Assisted" => "tier-assisted",
    "Agent-Limited" => "tier-limited",
    _ => "tier-hostile",
});

static ENGINE: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut handlebars = Handlebars::new();
    handlebars.register_helper("format_score", Box::new(format_score));
    handlebars.register_helper("tier_class", Box::new(tier_class));
    handlebars
        .register_template_string(TEMPLATE_NAME, TEMPLATE_SOURCE)
        .expect("embedded report.html.hbs is valid handlebars");
    handlebars
});

pub fn render(report: &Report) -> Result<String> {
    ENGINE
        .render(TEMPLATE_NAME, report)
        .map_err(|e| AnalysisError::Render(format!("failed to render HTML report: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommend::Recommendation;
    use crate::report::{ReportCategory, ReportSubScore};

    fn sample_report() -> Report {
        Report {
            version: "2".into(),
            composite_score: 7.3,
            tier: "Agent-Assisted".into(),
            categories: vec![ReportCategory {
                name: "C1".into(),
                score: 8.0,
                weight: 0.2,
                sub_scores: vec![ReportSubScore {
                    name: "complexity_avg".into(),
                    raw_value: 4.0,
                    score: 8.0,
                    weight: 0.3,
                    available: true,
                    evidence: vec![],
                }],
            }],
            recommendations: vec![],
        }
    }

    #[test]
    fn renders_composite_and_tier() {
        let html = render(&sample_report()).unwrap();
        assert!(html.contains("7.3"));
        assert!(html.contains("tier-assisted"));
    }

    #[test]
    fn empty_recommendations_render_fallback_message() {
        let html = render(&sample_report()).unwrap();
        assert!(html.contains("No recommendations"));
    }
}

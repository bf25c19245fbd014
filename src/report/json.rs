//! JSON report schema (v2) plus a v1-compatible loader (spec.md §6): the
//! emitter always writes `sub_scores`; the loader accepts either
//! `sub_scores` (v2) or `metrics` (v1) so an older baseline file still
//! diffs cleanly.

use crate::core::EvidenceItem;
use crate::errors::{AnalysisError, Result};
use crate::recommend::Recommendation;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSubScore {
    pub name: String,
    pub raw_value: f64,
    pub score: f64,
    pub weight: f64,
    pub available: bool,
    pub evidence: Vec<EvidenceItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportCategory {
    pub name: String,
    pub score: f64,
    pub weight: f64,
    #[serde(alias = "metrics")]
    pub sub_scores: Vec<ReportSubScore>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub version: String,
    pub composite_score: f64,
    pub tier: String,
    pub categories: Vec<ReportCategory>,
    pub recommendations: Vec<Recommendation>,
}

impl Report {
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::Render(format!("failed to serialize JSON report: {e}")))
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        let json = self.to_json_string()?;
        writer
            .write_all(json.as_bytes())
            .map_err(|e| AnalysisError::Render(format!("failed to write JSON report: {e}")))
    }

    /// Load a prior report for baseline diffing. Accepts both the v2 shape
    /// (`sub_scores`) and the v1 shape (`metrics`) via serde's field alias.
    pub fn load_baseline(path: &Path) -> Result<Report> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AnalysisError::Configuration(format!("cannot read baseline {}: {e}", path.display())))?;
        serde_json::from_str(&content)
            .map_err(|e| AnalysisError::Configuration(format!("invalid baseline JSON in {}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_v1_metrics_field_as_sub_scores() {
        let v1 = r#"{
            "version": "1",
            "composite_score": 7.2,
            "tier": "Agent-Assisted",
            "categories": [ { "name": "C1", "score": 8.0, "weight": 0.2,
                "metrics": [ { "name": "complexity_avg", "raw_value": 3.0,
                    "score": 9.0, "weight": 0.3, "available": true, "evidence": [] } ] } ],
            "recommendations": []
        }"#;
        let report: Report = serde_json::from_str(v1).unwrap();
        assert_eq!(report.categories[0].sub_scores[0].name, "complexity_avg");
    }

    #[test]
    fn round_trips_v2_shape() {
        let report = Report {
            version: "2".into(),
            composite_score: 6.5,
            tier: "Agent-Assisted".into(),
            categories: vec![ReportCategory {
                name: "C1".into(),
                score: 7.0,
                weight: 0.2,
                sub_scores: vec![ReportSubScore {
                    name: "complexity_avg".into(),
                    raw_value: 4.0,
                    score: 7.0,
                    weight: 0.3,
                    available: true,
                    evidence: vec![],
                }],
            }],
            recommendations: vec![],
        };
        let json = report.to_json_string().unwrap();
        let reloaded: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded.composite_score, 6.5);
    }
}

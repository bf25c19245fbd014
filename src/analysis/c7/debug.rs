//! Debug capture and replay persistence (spec.md §4.4.5).
//!
//! One JSON document per sample, named `{metricId}_{sampleIndex}.json`.
//! Saving happens after all metrics join, never during parallel
//! execution, so writes never interleave. The debug sink defaults to a
//! null writer so call sites never branch on "is debug enabled" -- they
//! always write; only the sink differs (spec.md §9).

use super::scoring_trace::ScoreTrace;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct C7DebugSample {
    pub metric_id: String,
    pub sample_index: usize,
    pub file_path: String,
    pub description: String,
    pub prompt: String,
    pub response: String,
    pub score: Option<f64>,
    pub duration_sec: f64,
    pub score_trace: Option<ScoreTrace>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugResponse {
    pub metric_id: String,
    pub sample_index: usize,
    pub file_path: String,
    pub prompt: String,
    pub response: String,
    pub duration_sec: f64,
    pub error: Option<String>,
}

impl DebugResponse {
    pub fn from_sample(sample: &C7DebugSample) -> Self {
        DebugResponse {
            metric_id: sample.metric_id.clone(),
            sample_index: sample.sample_index,
            file_path: sample.file_path.clone(),
            prompt: sample.prompt.clone(),
            response: sample.response.clone(),
            duration_sec: sample.duration_sec,
            error: sample.error.clone(),
        }
    }
}

/// Write target for human-readable debug output; independent of whether
/// replay/capture persistence (`persist`, below) is active.
pub trait DebugSink: Send + Sync {
    fn record(&self, sample: &C7DebugSample);
}

pub struct NullDebugSink;

impl DebugSink for NullDebugSink {
    fn record(&self, _sample: &C7DebugSample) {}
}

/// Prints one line per sample to stderr -- the `--debug-c7` trace output,
/// independent of whether `persist` is also writing replay files for the
/// same sample.
pub struct StderrDebugSink;

impl DebugSink for StderrDebugSink {
    fn record(&self, sample: &C7DebugSample) {
        eprintln!(
            "[c7] {}#{} {} score={:?} ({:.2}s){}",
            sample.metric_id,
            sample.sample_index,
            sample.file_path,
            sample.score,
            sample.duration_sec,
            sample.error.as_deref().map(|e| format!(" error={e}")).unwrap_or_default(),
        );
    }
}

fn file_name(metric_id: &str, sample_index: usize) -> String {
    format!("{metric_id}_{sample_index}.json")
}

pub fn persist(dir: &Path, record: &DebugResponse) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name(&record.metric_id, record.sample_index));
    let json = serde_json::to_string_pretty(record)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    std::fs::write(path, json)
}

/// Load every `*.json` record under `dir` into a prompt -> response map
/// for the `ReplayExecutor`. Per spec.md §4.4.5, the replay key is the
/// exact prompt text; the metric/sample identity in the filename is only
/// used to reconstruct per-sample trace context for replayed runs, not
/// for lookup.
pub fn load_replay_responses(dir: &Path) -> std::io::Result<HashMap<String, String>> {
    let mut map = HashMap::new();
    if !dir.exists() {
        return Ok(map);
    }
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let content = std::fs::read_to_string(&path)?;
        if let Ok(record) = serde_json::from_str::<DebugResponse>(&content) {
            map.insert(record.prompt, record.response);
        }
    }
    Ok(map)
}

pub fn has_replay_data(dir: &Path) -> bool {
    dir.exists()
        && std::fs::read_dir(dir)
            .map(|mut it| it.any(|e| e.ok().map(|e| e.path().extension().and_then(|e| e.to_str()) == Some("json")).unwrap_or(false)))
            .unwrap_or(false)
}

pub fn debug_file_path(dir: &Path, metric_id: &str, sample_index: usize) -> PathBuf {
    dir.join(file_name(metric_id, sample_index))
}

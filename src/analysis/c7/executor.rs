//! The `Executor` abstraction: live subprocess vs. replayed recordings.
//! Every C7 metric depends only on this trait -- it never knows which
//! implementation is wired in. This is the textbook interface-based
//! dependency injection case the design notes call out (spec.md §9).

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum ExecutorError {
    #[error("subprocess timed out after {0:?}")]
    Timeout(Duration),
    #[error("subprocess failed: {0}")]
    SubprocessFailed(String),
    #[error("no replay data for key: {0}")]
    NoReplayData(String),
    #[error("cancelled")]
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub response: String,
    pub duration: Duration,
    pub tokens_estimated: u64,
}

#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute_prompt(
        &self,
        work_dir: &Path,
        prompt: &str,
        allowed_tools: &[&str],
        timeout: Duration,
    ) -> Result<ExecutionOutcome, ExecutorError>;
}

/// Invokes the external agent CLI as a subprocess inside an isolated
/// workspace (a `tempfile::TempDir` copy of the scanned repository, so the
/// agent cannot mutate the original tree). This is the sandboxed exception
/// spec.md's Non-goals carve out: "does not execute... the analyzed code,
/// except through the sandboxed LLM worker."
pub struct LiveExecutor {
    pub cli_path: PathBuf,
}

impl LiveExecutor {
    pub fn from_env() -> Self {
        let cli_path = std::env::var("READY_SCAN_AGENT_CLI")
            .unwrap_or_else(|_| "claude".to_string())
            .into();
        LiveExecutor { cli_path }
    }
}

#[async_trait]
impl Executor for LiveExecutor {
    async fn execute_prompt(
        &self,
        work_dir: &Path,
        prompt: &str,
        allowed_tools: &[&str],
        timeout: Duration,
    ) -> Result<ExecutionOutcome, ExecutorError> {
        use std::process::Stdio;
        use tokio::io::AsyncWriteExt;

        let start = std::time::Instant::now();
        let mut command = tokio::process::Command::new(&self.cli_path);
        command
            .current_dir(work_dir)
            .arg("--allowedTools")
            .arg(allowed_tools.join(","))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command
            .spawn()
            .map_err(|e| ExecutorError::SubprocessFailed(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            let _ = stdin.write_all(prompt.as_bytes()).await;
        }

        let wait = tokio::time::timeout(timeout, child.wait_with_output()).await;
        let output = match wait {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(ExecutorError::SubprocessFailed(e.to_string())),
            Err(_) => return Err(ExecutorError::Timeout(timeout)),
        };

        if !output.status.success() {
            return Err(ExecutorError::SubprocessFailed(format!(
                "exit status {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let response = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let tokens_estimated = (prompt.len() + response.len()) as u64 / 4;

        Ok(ExecutionOutcome {
            response,
            duration: start.elapsed(),
            tokens_estimated,
        })
    }
}

/// Test/debug double that serves pre-recorded responses keyed by exact
/// prompt text, eliminating subprocess cost during heuristic iteration.
pub struct ReplayExecutor {
    responses: HashMap<String, String>,
}

impl ReplayExecutor {
    pub fn new(responses: HashMap<String, String>) -> Self {
        ReplayExecutor { responses }
    }
}

#[async_trait]
impl Executor for ReplayExecutor {
    async fn execute_prompt(
        &self,
        _work_dir: &Path,
        prompt: &str,
        _allowed_tools: &[&str],
        _timeout: Duration,
    ) -> Result<ExecutionOutcome, ExecutorError> {
        match self.responses.get(prompt) {
            Some(response) => Ok(ExecutionOutcome {
                response: response.clone(),
                duration: Duration::from_secs(0),
                tokens_estimated: 0,
            }),
            None => Err(ExecutorError::NoReplayData(prompt_key(prompt))),
        }
    }
}

/// Copy `root` into a fresh temp directory so the live executor's
/// subprocess can read (and, if it chooses to, write) files without ever
/// touching the scanned repository itself.
pub fn sandbox_copy(root: &Path) -> std::io::Result<tempfile::TempDir> {
    let dir = tempfile::tempdir()?;
    for entry in walkdir::WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        let rel = match entry.path().strip_prefix(root) {
            Ok(rel) => rel,
            Err(_) => continue,
        };
        if rel.as_os_str().is_empty() {
            continue;
        }
        let target = dir.path().join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else if entry.file_type().is_file() {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(dir)
}

fn prompt_key(prompt: &str) -> String {
    match prompt.char_indices().nth(60) {
        Some((idx, _)) => format!("{}…", &prompt[..idx]),
        None => prompt.to_string(),
    }
}

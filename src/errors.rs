//! Structured error types for the analysis pipeline.
//!
//! Each variant corresponds to one of the error-handling policies in the
//! design: configuration and discovery errors are fatal before the pipeline
//! starts, while parse/analyzer/scoring/render errors are recoverable at
//! their stage and only ever logged as warnings by the orchestrator.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("discovery failed for {path}: {message}")]
    Discovery { path: PathBuf, message: String },

    #[error("parse error in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("analyzer {category} failed: {message}")]
    Analyzer { category: String, message: String },

    #[error("C7 sample error ({metric_id}#{sample_index}): {message}")]
    C7Sample {
        metric_id: String,
        sample_index: usize,
        message: String,
    },

    #[error("scoring error: {0}")]
    Scoring(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("no recognized source files found under {0}")]
    NoSourceFiles(PathBuf),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

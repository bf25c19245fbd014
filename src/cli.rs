//! Command-line surface: a single `scan` subcommand (spec.md §6).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ready-scan")]
#[command(about = "Predicts how well autonomous AI coding agents can work in a repository", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a repository and produce an agent readiness score
    Scan {
        /// Directory to scan
        path: PathBuf,

        /// Print progress and per-category detail to stderr
        #[arg(short, long)]
        verbose: bool,

        /// Emit the JSON report (v2 schema) to stdout instead of the
        /// terminal report
        #[arg(long)]
        json: bool,

        /// Fail (exit code 2) if the composite score is below this value
        #[arg(long)]
        threshold: Option<f64>,

        /// Scoring config YAML overlaying the embedded default
        #[arg(long)]
        config: Option<PathBuf>,

        /// Also write an HTML report to this path
        #[arg(long)]
        html: Option<PathBuf>,

        /// A prior JSON report (v1 or v2 schema) to diff against
        #[arg(long)]
        baseline: Option<PathBuf>,

        /// Print a one-line shields.io-style badge summary
        #[arg(long)]
        badge: bool,

        /// Persist every C7 sample's prompt/response under --debug-dir
        #[arg(long = "debug-c7")]
        debug_c7: bool,

        /// Directory for C7 debug records; also the replay source when it
        /// already contains recordings
        #[arg(long = "debug-dir")]
        debug_dir: Option<PathBuf>,

        /// Skip the C7 Agent Evaluation category entirely
        #[arg(long = "no-llm")]
        no_llm: bool,
    },
}

//! `ready-scan` CLI entry point.
//!
//! Installs the panic hook and tracing subscriber, parses arguments, and
//! spawns the actual run on a thread with a larger stack -- recursive
//! tree-sitter node walks on deeply nested source files can otherwise
//! overflow the default ~1MB main-thread stack.

use agent_readiness::cli::{Cli, Commands};
use agent_readiness::config::{C7Config, ScoringConfig};
use agent_readiness::observability::{
    default_reporter, extract_thread_panic_message, init_tracing, install_panic_hook,
};
use agent_readiness::pipeline::{self, PipelineOptions};
use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

const MAIN_STACK_SIZE: usize = 16 * 1024 * 1024;

fn main() -> Result<()> {
    install_panic_hook();
    init_tracing();

    std::thread::Builder::new()
        .stack_size(MAIN_STACK_SIZE)
        .spawn(main_inner)?
        .join()
        .map_err(|e| anyhow::anyhow!("thread panic: {}", extract_thread_panic_message(&e)))?
}

fn main_inner() -> Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start the tokio runtime")?;

    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let Commands::Scan {
        path,
        verbose,
        json,
        threshold,
        config,
        html,
        baseline,
        badge,
        debug_c7,
        debug_dir,
        no_llm,
    } = cli.command;

    let scoring_config = match config {
        Some(path) => ScoringConfig::load(&path).context("failed to load --config")?,
        None => ScoringConfig::default_config(),
    };

    let is_replay = debug_dir
        .as_deref()
        .map(agent_readiness::analysis::c7::debug::has_replay_data)
        .unwrap_or(false);
    let c7_executor = resolve_c7_executor(no_llm, is_replay, debug_dir.as_deref())?;

    // Only copy the repository into an isolated sandbox when C7 is
    // actually going to invoke it; `_sandbox` must outlive the pipeline
    // run or the TempDir is deleted out from under the executor.
    let _sandbox = c7_executor
        .is_some()
        .then(|| agent_readiness::analysis::c7::executor::sandbox_copy(&path))
        .transpose()
        .context("failed to prepare C7 sandbox")?;
    let sandbox_dir = _sandbox
        .as_ref()
        .map(|d| d.path().to_path_buf())
        .unwrap_or_else(std::env::temp_dir);

    // `debug_dir` alone controls both capture and replay (spec.md §4.4.5);
    // `--debug-c7` only switches on the human-readable stderr trace on top
    // of that, it must not gate whether samples get persisted at all.
    let c7_config = C7Config::from_scoring(&scoring_config.c7, sandbox_dir, debug_dir.clone(), is_replay);
    let c7_debug_sink: Arc<dyn agent_readiness::analysis::c7::debug::DebugSink> = if debug_c7 {
        Arc::new(agent_readiness::analysis::c7::debug::StderrDebugSink)
    } else {
        Arc::new(agent_readiness::analysis::c7::debug::NullDebugSink)
    };

    let options = PipelineOptions {
        scoring_config,
        c7_config,
        c7_executor,
        c7_debug_sink,
        progress: default_reporter(),
    };

    let outcome = pipeline::run(&path, options).await?;

    if verbose {
        for category in &outcome.scored.categories {
            eprintln!("  {:<4} {:>5.1}  (weight {:.2})", category.name, category.score, category.weight);
        }
    }

    if let Some(baseline_path) = &baseline {
        if let Err(e) = agent_readiness::report::json::Report::load_baseline(baseline_path) {
            eprintln!("warning: failed to load baseline: {e}");
        }
    }

    if json {
        println!("{}", outcome.report.to_json_string()?);
    } else if badge {
        println!(
            "agent readiness: {:.1}/10 ({})",
            outcome.scored.composite, outcome.scored.tier
        );
    } else {
        println!("{}", agent_readiness::report::terminal::render(&outcome.report));
    }

    if let Some(html_path) = &html {
        match agent_readiness::report::html::render(&outcome.report) {
            Ok(content) => {
                if let Err(e) = std::fs::write(html_path, content) {
                    eprintln!("warning: failed to write HTML report: {e}");
                }
            }
            Err(e) => eprintln!("warning: failed to render HTML report: {e}"),
        }
    }

    if let Some(threshold) = threshold {
        if outcome.scored.composite < threshold {
            eprintln!(
                "Score {:.1} is below threshold {:.1}",
                outcome.scored.composite, threshold
            );
            std::process::exit(2);
        }
    }

    Ok(())
}

fn resolve_c7_executor(
    no_llm: bool,
    is_replay: bool,
    debug_dir: Option<&std::path::Path>,
) -> Result<Option<Arc<dyn agent_readiness::analysis::c7::executor::Executor>>> {
    if no_llm || std::env::var("ANTHROPIC_API_KEY").is_err() && !is_replay {
        return Ok(None);
    }
    if is_replay {
        let dir = debug_dir.expect("is_replay implies a debug_dir with recordings");
        let responses = agent_readiness::analysis::c7::debug::load_replay_responses(dir)
            .context("failed to load replay recordings")?;
        return Ok(Some(Arc::new(agent_readiness::analysis::c7::executor::ReplayExecutor::new(responses))));
    }
    Ok(Some(Arc::new(agent_readiness::analysis::c7::executor::LiveExecutor::from_env())))
}

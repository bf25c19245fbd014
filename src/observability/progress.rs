//! Stage-level progress events.
//!
//! The pipeline emits one `ProgressEvent` per stage transition. `ready-scan`
//! wires a spinner to these events when stderr is a TTY (via `indicatif`)
//! and stays silent otherwise; library consumers can instead pass their own
//! callback.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Discover,
    Parse,
    Analyze,
    Score,
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Discover => "discover",
            Stage::Parse => "parse",
            Stage::Analyze => "analyze",
            Stage::Score => "score",
            Stage::Render => "render",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub stage: Stage,
    pub detail: String,
}

/// A callback invoked once per stage transition. Boxed so the orchestrator
/// can hold either a TTY spinner or a no-op closure behind the same type.
pub type ProgressReporter = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// Default reporter: prints one line to stderr per stage iff stderr is a
/// TTY, otherwise does nothing. Mirrors debtmap's auto-disable-on-non-tty
/// rule for its spinner.
pub fn default_reporter() -> ProgressReporter {
    use std::io::IsTerminal;
    let interactive = std::io::stderr().is_terminal();
    Box::new(move |event: ProgressEvent| {
        if interactive {
            eprintln!("→ {:<10} {}", event.stage.to_string(), event.detail);
        }
    })
}

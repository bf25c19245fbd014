//! Logging, panic handling, and progress reporting.
//!
//! Grounded on debtmap's `observability` module: a tracing init that reads
//! `RUST_LOG`, a panic hook that turns analyzer-thread panics into
//! structured warnings instead of raw backtraces, and a mutex-guarded
//! progress tracker driven by a periodic timer.

mod panic_hook;
mod progress;
mod tracing_init;

pub use panic_hook::{extract_thread_panic_message, install_panic_hook};
pub use progress::{ProgressEvent, ProgressReporter, Stage};
pub use tracing_init::init_tracing;

use tracing_subscriber::EnvFilter;

/// Initialize structured logging, controlled by `RUST_LOG` (default: warn).
///
/// Safe to call more than once; subsequent calls are no-ops.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

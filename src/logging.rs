use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Installs the global subscriber. `RUST_LOG` wins over `DEFAULT_LOG_LEVEL`.
///
/// Logs go to stderr so stdout only carries the precheck verdict.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

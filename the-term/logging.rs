//! Logging setup for the command line client.

use tracing_subscriber::{
  EnvFilter,
  Layer,
  fmt,
  layer::SubscriberExt,
  util::SubscriberInitExt,
};

/// Log to stderr, filtered by `RUST_LOG` (default `warn`). Stdout is kept for
/// command output.
pub fn init() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

  tracing_subscriber::registry()
    .with(
      fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter),
    )
    .init();
}

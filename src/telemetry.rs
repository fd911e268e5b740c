//! Tracing subscriber setup shared by both binaries.

use tracing_subscriber::EnvFilter;

fn filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Human-readable logs on stdout. `RUST_LOG` overrides `default_directive`.
pub fn init(default_directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(default_directive))
        .with_target(false)
        .init();
}

/// Logs on stderr, for binaries whose stdout is a protocol channel.
pub fn init_stderr(default_directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(default_directive))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

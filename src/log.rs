// src/log.rs
use tracing_subscriber::{fmt::time::Uptime, EnvFilter};

/// Install the global subscriber: stderr, elapsed-time stamps, level from
/// `RUST_LOG` or `info`/`debug`. Safe to call more than once.
pub fn init(verbose: bool) {
    let default = if verbose { "gtr_scrape=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(Uptime::default())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

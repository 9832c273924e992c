//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Default filter directive when `RUST_LOG` is unset.
pub const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects `debug` over `info`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

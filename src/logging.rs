//! Diagnostics for the `anniversary` binary.
//!
//! Only the binary installs a subscriber; the library just emits `tracing`
//! events. Screen output goes to stdout, diagnostics to stderr, so `watch`
//! stays readable with logging turned up.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
fn default_directives(verbose: bool) -> &'static str {
    if verbose { "warn,anniversary=debug" } else { "warn" }
}

/// Installs a stderr subscriber for the process.
///
/// `RUST_LOG` wins when set, e.g. `RUST_LOG=anniversary=trace` to see every
/// tick. Otherwise only warnings are shown, plus this crate's `debug` events
/// when `verbose` is set (`--verbose` on the command line).
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
    if installed.is_err() {
        tracing::debug!("subscriber already installed");
    }
}

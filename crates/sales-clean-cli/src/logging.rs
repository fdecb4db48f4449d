//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Log events go to stderr so they never mix with the progress output on
//! stdout. `RUST_LOG` takes precedence over `--verbose`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,sales_clean=debug,sales_clean_cli=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    // A subscriber may already be set when embedded in tests.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init();
}

//! Diagnostic logging setup
//!
//! The audit log records what changed; this is for tracing how. Output goes
//! to stderr so command output on stdout stays clean.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "BASKET_LOG";

/// Install the global subscriber for the CLI
///
/// `BASKET_LOG` wins over `verbose` when set.
pub fn init_cli_logger(verbose: bool) {
    let fallback = if verbose { "basket=debug,info" } else { "basket=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (e.g. from tests) is not an error worth failing on
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}

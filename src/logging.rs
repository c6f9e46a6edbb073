use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter, e.g. `QUOKKA_ALIAS_LOG=quokka_alias=debug`.
pub const LOG_ENV: &str = "QUOKKA_ALIAS_LOG";

/// Install the stderr subscriber. `verbose` raises the fallback level to debug.
///
/// Falls back to `quokka_alias=info` (or `debug`) when the variable is unset
/// or invalid. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let fallback = if verbose {
            "quokka_alias=debug"
        } else {
            "quokka_alias=info"
        };
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time(),
            )
            .with(filter)
            .init();
    });
}

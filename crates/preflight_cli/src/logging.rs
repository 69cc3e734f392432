//! Tracing subscriber setup.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::GlobalArgs;

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV: &str = "PREFLIGHT_LOG";

static INIT: Once = Once::new();

/// Installs the global subscriber, writing to stderr so stdout stays clean
/// for reports.
///
/// `PREFLIGHT_LOG` wins when set and valid (e.g. `PREFLIGHT_LOG=preflight_checks=debug`);
/// otherwise the level follows `-v`/`-q`. Later calls are no-ops.
pub fn init(global: &GlobalArgs) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(global)));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(global.verbose)
                    .with_thread_names(global.verbose)
                    .with_ansi(global.color),
            )
            .with(filter)
            .init();
    });
}

fn default_directive(global: &GlobalArgs) -> &'static str {
    if global.quiet {
        "preflight=error"
    } else if global.verbose {
        "preflight=debug"
    } else {
        "preflight=info"
    }
}

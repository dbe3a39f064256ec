//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "propshift=info,propshift_rewrite=info,propshift_parser=info";
const VERBOSE_FILTER: &str = "propshift=debug,propshift_rewrite=debug,propshift_parser=debug";

/// Initialize logging to stderr.
///
/// Reads `PROPSHIFT_LOG` for per-crate levels, e.g.
/// `PROPSHIFT_LOG=propshift_rewrite=debug`. `verbose` overrides it with debug
/// output for every propshift crate. Safe to call more than once.
pub fn init_tracing(verbose: bool) {
    INIT.call_once(|| {
        let filter = if verbose {
            EnvFilter::new(VERBOSE_FILTER)
        } else {
            EnvFilter::try_from_env("PROPSHIFT_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .init();
    });
}

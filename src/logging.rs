//! Diagnostic logging on stderr
//!
//! Command results go to stdout; everything emitted through `tracing`
//! goes to stderr so the two never mix.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "info";
const VERBOSE_FILTER: &str = "info,foam_streams=debug";

/// Install the global subscriber
///
/// `RUST_LOG` wins over `verbose`. Calling this twice is harmless: the
/// second registration is ignored.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init();
}

//! Logging initialization for chronicler consumers.
//!
//! The library itself only emits `tracing` diagnostics; this entry point is
//! for embedding applications that have no subscriber of their own.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter directive applied when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "chronicler=info";

/// Install a tracing subscriber for chronicler diagnostics.
///
/// Call once at application startup, before spawning the pipeline. The
/// `RUST_LOG` environment variable overrides the default filter. Hosts
/// with their own subscriber should skip this and let chronicler's spans
/// flow into it; calling it anyway is harmless.
pub fn init_logging() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    );

    // Install the subscriber (ignore error if already set)
    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn test_init_logging_does_not_panic() {
        // The subscriber may already be set from a previous test, which is
        // fine; the function ignores that error.
        init_logging();
        init_logging();
    }
}

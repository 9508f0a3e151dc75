//! Diagnostic logging
//!
//! `tracing` output goes to stderr so it never mixes with report or export
//! output on stdout. `RUST_LOG` takes precedence over `--verbose`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "houseshare=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(verbose: bool) {
    let filter = default_filter(verbose);
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(true), "houseshare=debug");
        assert_eq!(default_filter(false), "warn");
    }

    #[test]
    fn test_init_twice() {
        init(false);
        init(true);
        tracing::debug!("still running");
    }
}

//! Progress logging to stderr

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter directive for the given verbosity flags
#[must_use]
pub fn default_filter(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Install the global subscriber; `RUST_LOG` wins over the flags when set
pub fn setup_logging(verbose: bool, quiet: bool) {
    let filter = default_filter(verbose, quiet);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false, false), "info");
        assert_eq!(default_filter(true, false), "debug");
        // quiet wins
        assert_eq!(default_filter(true, true), "error");
    }
}

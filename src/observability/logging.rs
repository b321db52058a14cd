//! # Structured Logging
//!
//! Diagnostic logs go to stderr through `tracing-subscriber`, leaving stdout to
//! the operator-facing progress report. `RUST_LOG` takes precedence over the
//! level picked from the command line.

use tracing_subscriber::{fmt, EnvFilter};

/// Log level used when neither `RUST_LOG` nor `--verbose` is given
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Log level used with `--verbose`
pub const VERBOSE_LOG_LEVEL: &str = "debug";

/// How logs should be emitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoggingOptions {
    pub verbose: bool,
    pub json: bool,
}

impl LoggingOptions {
    /// Filter directive applied when `RUST_LOG` is unset.
    pub fn default_directive(&self) -> &'static str {
        if self.verbose {
            VERBOSE_LOG_LEVEL
        } else {
            DEFAULT_LOG_LEVEL
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.default_directive()))
    }
}

/// Install the global subscriber.
///
/// Returns `false` when a subscriber was already installed (e.g. by a test
/// harness); the existing one is kept.
pub fn init_logging(options: LoggingOptions) -> bool {
    let builder = fmt().with_env_filter(options.env_filter()).with_writer(std::io::stderr);

    let installed = if options.json {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.with_target(false).try_init()
    };

    installed.is_ok()
}

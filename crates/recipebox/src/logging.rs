//! Diagnostics for recipebox.
//!
//! Command output (recipe lists, cards, the shopping list) goes to stdout;
//! everything logged here goes to stderr. At the default verbosity only
//! warnings show: skipped records, a data file set aside, a failed save.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much recipebox reports about loading and saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only (`-q`).
    Quiet,
    /// Warnings about the data file and its records.
    #[default]
    Normal,
    /// Also every load, save and rejected recipe (`-v`).
    Verbose,
    /// Everything (`-vv`).
    Trace,
}

impl Verbosity {
    /// Pick a verbosity from the `--quiet` flag and the `-v` count.
    ///
    /// `--quiet` wins over any number of `-v`.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: u8) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Verbose,
            (false, _) => Self::Trace,
        }
    }

    /// The most detailed level shown.
    #[must_use]
    pub fn to_level_filter(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Filter directive limiting output to this crate at this level.
    #[must_use]
    pub fn directive(&self) -> String {
        format!("{}={}", env!("CARGO_CRATE_NAME"), self.to_level_filter())
    }
}

/// Install the stderr subscriber.
///
/// `RUST_LOG`, when set, replaces the directive derived from `verbosity`.
/// Calling this more than once is harmless; later calls are ignored.
///
/// # Examples
///
/// ```no_run
/// use recipebox::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::from_flags(false, 1));
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time(),
    );

    let _ = subscriber.try_init();
}

/// Route warnings from storage and record decoding into the test output.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

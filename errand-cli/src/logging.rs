//! Log backend for the `errand` binary.
//!
//! Library crates log through the `log` facade; this module installs an
//! `env_logger` backend writing to stderr so stdout stays clean for JSON.

use std::io::Write;

use clap::ValueEnum;
use env_logger::{Builder, Env, Target, fmt::Formatter};
use log::{Level, LevelFilter};

use crate::CliError;

/// Filter applied when neither `--log-level` nor `RUST_LOG` is set.
const DEFAULT_FILTER: &str = "warn";

/// Verbosity accepted by `--log-level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Disable logging.
    Off,
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Progress messages.
    Info,
    /// Per-query detail.
    Debug,
    /// Everything.
    Trace,
}

impl LogLevel {
    /// Corresponding `log` filter.
    #[must_use]
    pub const fn to_filter(self) -> LevelFilter {
        match self {
            Self::Off => LevelFilter::Off,
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

/// Install the stderr logger.
///
/// An explicit `level` wins; otherwise `RUST_LOG` is honoured, falling back to
/// warnings only.
pub(crate) fn init_logger(level: Option<LogLevel>) -> Result<(), CliError> {
    let mut builder = match level {
        Some(explicit) => {
            let mut fixed = Builder::new();
            fixed.filter_level(explicit.to_filter());
            fixed
        }
        None => Builder::from_env(Env::default().default_filter_or(DEFAULT_FILTER)),
    };
    builder
        .write_style(env_logger::WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf: &mut Formatter, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                level_tag(record.level()),
                record.target(),
                record.args()
            )
        });
    builder.try_init()?;
    Ok(())
}

const fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup, after arguments are parsed.

use std::fmt;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Level used when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_LEVEL: &str = "warn";

#[derive(Debug)]
pub struct LoggerError(String);

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "logger: {}", self.0)
    }
}

impl std::error::Error for LoggerError {}

/// Install the global subscriber, writing to stderr so it never interleaves
/// with the study screen on stdout.
///
/// An explicit `level` wins over `RUST_LOG`; without one, `RUST_LOG` is used
/// and [`DEFAULT_LEVEL`] is the fallback.
pub fn init(level: Option<&str>) -> Result<(), LoggerError> {
    let filter = match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| LoggerError(format!("invalid log level '{level}': {e}")))?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(DEFAULT_LEVEL))
            .map_err(|e| LoggerError(e.to_string()))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| LoggerError(format!("failed to set subscriber: {e}")))
}

/// Validate a bare level name such as `"info"`.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    if level.is_empty() {
        return Err(LoggerError("log level must not be empty".into()));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| LoggerError(format!("unrecognised log level: '{level}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_levels_parse() {
        for l in &["error", "warn", "info", "debug", "trace", "off"] {
            assert!(parse_level(l).is_ok(), "expected '{l}' to be valid");
        }
    }

    #[test]
    fn invalid_level_errors() {
        assert!(parse_level("verbose").is_err());
        assert!(parse_level("").is_err());
    }

    #[test]
    fn default_level_is_valid() {
        assert_eq!(parse_level(DEFAULT_LEVEL).unwrap(), LevelFilter::WARN);
    }
}

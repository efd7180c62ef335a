//! Shared configuration for the Shuttle binaries.
//!
//! [`Config`] is a `clap` argument group: every field has a long flag and a
//! `SHUTTLE_*` environment fallback, and the group is flattened into each
//! front end's parser. Values given on the command line win over the
//! environment, which wins over the built-in defaults such as
//! [`DEFAULT_MAX_REPLACEMENTS`].

mod defaults;
mod logging;

use std::ffi::OsString;

use clap::{Args, Parser};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MAX_REPLACEMENTS, default_log_filter, default_log_filter_string,
    default_log_format, default_max_replacements,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Environment variable overriding the log filter.
pub const LOG_FILTER_ENV: &str = "SHUTTLE_LOG_FILTER";
/// Environment variable overriding the log format.
pub const LOG_FORMAT_ENV: &str = "SHUTTLE_LOG_FORMAT";
/// Environment variable overriding the replacement cap.
pub const MAX_REPLACEMENTS_ENV: &str = "SHUTTLE_MAX_REPLACEMENTS";

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The arguments or environment could not be parsed.
    #[error(transparent)]
    Arguments(#[from] clap::Error),
    /// The replacement cap must allow at least one replacement.
    #[error("max replacements must be at least 1, got {value}")]
    InvalidMaxReplacements {
        /// The rejected value.
        value: usize,
    },
}

/// Runtime configuration shared by the front ends.
#[derive(Debug, Clone, PartialEq, Eq, Args, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Tracing filter directives, e.g. `info` or `shuttle_syntax=trace`.
    #[arg(
        long = "log-filter",
        env = LOG_FILTER_ENV,
        default_value = DEFAULT_LOG_FILTER,
        global = true
    )]
    log_filter: String,

    /// Log output format.
    #[arg(
        long = "log-format",
        env = LOG_FORMAT_ENV,
        default_value_t = default_log_format(),
        global = true
    )]
    log_format: LogFormat,

    /// Maximum replacements a single transformation may make.
    #[arg(
        long = "max-replacements",
        env = MAX_REPLACEMENTS_ENV,
        default_value_t = DEFAULT_MAX_REPLACEMENTS,
        global = true
    )]
    max_replacements: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            max_replacements: default_max_replacements(),
        }
    }
}

/// Parser used when the configuration is loaded on its own.
#[derive(Debug, Parser)]
struct ConfigOnly {
    #[command(flatten)]
    config: Config,
}

impl Config {
    /// Loads configuration from `args` (including the binary name) and the
    /// process environment, then validates it.
    ///
    /// # Errors
    /// Returns [`ConfigError::Arguments`] for unparsable input and
    /// [`ConfigError::InvalidMaxReplacements`] for a zero cap.
    pub fn load_from_iter<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let parsed = ConfigOnly::try_parse_from(args)?;
        parsed.config.validate()?;
        Ok(parsed.config)
    }

    /// Checks invariants clap cannot express.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidMaxReplacements`] for a zero cap.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_replacements == 0 {
            return Err(ConfigError::InvalidMaxReplacements {
                value: self.max_replacements,
            });
        }
        Ok(())
    }

    /// Returns the tracing filter directives.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns the replacement cap for transformations.
    #[must_use]
    pub const fn max_replacements(&self) -> usize {
        self.max_replacements
    }
}

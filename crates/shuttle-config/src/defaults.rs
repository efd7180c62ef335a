//! Built-in configuration defaults.

use crate::logging::LogFormat;

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default cap on replacements made by a single transformation run.
pub const DEFAULT_MAX_REPLACEMENTS: usize = 100;

/// Default log filter expression used by the binaries.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binaries.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default replacement cap; a function so serde can use it.
#[must_use]
pub const fn default_max_replacements() -> usize {
    DEFAULT_MAX_REPLACEMENTS
}
